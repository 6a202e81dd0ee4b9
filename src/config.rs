//! Configuration management for the Universal Account workshop
//!
//! Layers built-in defaults, an optional `config.toml` and `UA_WORKSHOP_`
//! environment overrides. Transaction parameters are fixed per deployment and
//! never come from the user at runtime.

use config::{Config, Environment, File};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::account::TargetCall;

/// Upper bound for slippage tolerance, 100% in basis points.
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// Complete workshop configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub account: AccountConfig,
    pub trade: TradeConfig,
    pub transaction: TransactionConfig,
    pub sandbox: SandboxConfig,
}

/// Project identifiers handed to every account client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    pub project_id: String,
    pub project_client_key: String,
    pub project_app_id: String,

    /// Bind each client to the chain the wallet is connected to
    pub route_via_wallet_chain: bool,
}

/// Trade settings applied by the account client when routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeConfig {
    /// Slippage tolerance in basis points
    /// Environment: UA_WORKSHOP_TRADE__SLIPPAGE_BPS
    pub slippage_bps: u16,

    /// Pay gas from the universal balance instead of native tokens
    pub universal_gas: bool,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 100,
            universal_gas: true,
        }
    }
}

/// The single preconfigured transaction the workshop submits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionConfig {
    /// Destination chain of the intent
    pub chain_id: u64,
    pub contract_address: String,

    /// ABI-encoded call, `mint()` by default
    pub call_data: String,
    pub value: String,

    /// The transaction id is appended as the `id` query parameter
    pub result_url_base: String,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            chain_id: crate::account::chains::BASE_MAINNET,
            contract_address: "0x0287f57A1a17a725428689dfD9E65ECA01d82510".to_string(),
            call_data: "0x1249c58b".to_string(),
            value: "0x0".to_string(),
            result_url_base: "https://universalx.app/activity/details".to_string(),
        }
    }
}

/// Settings for the offline collaborators used by the console binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    pub balance_usd: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            balance_usd: "0".to_string(),
        }
    }
}

/// Searched in order below the working directory; the first existing file wins
const CONFIG_PATHS: [&str; 2] = ["ua-workshop/config", "config"];

impl AppConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Search `base` for a configuration file, falling back to defaults when none exists
    pub fn load_in(base: &Path) -> Result<Self, config::ConfigError> {
        for config_path in CONFIG_PATHS {
            let candidate = base.join(config_path);
            if config_file_exists(&candidate) {
                info!("Loading configuration from {}", candidate.display());
                return Self::load_from(&candidate);
            }
        }

        warn!(
            "No configuration file found under {}, using defaults",
            base.display()
        );
        Self::build(None)
    }

    /// Load from one file name (extension optional); the file must exist
    pub fn load_from(config_path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(config_path))
    }

    fn build(config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&AppConfig::default())?);
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(&path.to_string_lossy()).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("UA_WORKSHOP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.account.project_id.is_empty() {
            warn!("account.project_id is empty; the account service may reject requests");
        }

        if self.trade.slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(config::ConfigError::Message(format!(
                "slippage_bps must be at most {MAX_SLIPPAGE_BPS}"
            )));
        }

        self.transaction.validate()?;

        match Decimal::from_str(self.sandbox.balance_usd.trim()) {
            Ok(balance) if balance.is_sign_negative() => Err(config::ConfigError::Message(
                "sandbox.balance_usd cannot be negative".into(),
            )),
            Ok(_) => Ok(()),
            Err(e) => Err(config::ConfigError::Message(format!(
                "sandbox.balance_usd is not a decimal: {e}"
            ))),
        }
    }
}

impl TransactionConfig {
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.chain_id == 0 {
            return Err(config::ConfigError::Message("chain_id cannot be 0".into()));
        }

        match decode_hex(&self.contract_address) {
            Some(bytes) if bytes.len() == 20 => {}
            _ => {
                return Err(config::ConfigError::Message(format!(
                    "contract_address is not a 20-byte hex address: {}",
                    self.contract_address
                )));
            }
        }

        match decode_hex(&self.call_data) {
            Some(bytes) if bytes.len() >= 4 => {}
            _ => {
                return Err(config::ConfigError::Message(
                    "call_data must be hex and contain at least a 4-byte selector".into(),
                ));
            }
        }

        if !self.value.starts_with("0x") || u128::from_str_radix(&self.value[2..], 16).is_err() {
            return Err(config::ConfigError::Message(format!(
                "value must be a 0x-prefixed hex quantity: {}",
                self.value
            )));
        }

        if !self.result_url_base.starts_with("http://")
            && !self.result_url_base.starts_with("https://")
        {
            return Err(config::ConfigError::Message(
                "result_url_base must be an http(s) URL".into(),
            ));
        }

        Ok(())
    }

    /// The call compiled into this deployment
    pub fn target_call(&self) -> TargetCall {
        TargetCall {
            to: self.contract_address.clone(),
            data: self.call_data.clone(),
            value: self.value.clone(),
        }
    }
}

fn config_file_exists(path: &Path) -> bool {
    path.is_file() || path.with_extension("toml").is_file()
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    value.strip_prefix("0x").and_then(|rest| hex::decode(rest).ok())
}
