use async_trait::async_trait;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::account::{
    AccountClient, AccountClientFactory, AccountClientOptions, PrimaryAssets,
    SmartAccountOptions, TargetCall, TransactionId, TransactionIntent,
};
use crate::config::SandboxConfig;
use crate::error::CollaboratorError;

const SIGNATURE_LEN: usize = 65;

/// Builds sandbox clients that all report the same balance.
pub struct SandboxAccountFactory {
    balance_usd: Decimal,
}

impl SandboxAccountFactory {
    pub fn new(balance_usd: Decimal) -> Self {
        Self { balance_usd }
    }

    pub fn from_config(config: &SandboxConfig) -> Result<Self, CollaboratorError> {
        let balance_usd = Decimal::from_str(config.balance_usd.trim())?;
        Ok(Self::new(balance_usd))
    }
}

impl AccountClientFactory for SandboxAccountFactory {
    fn create(
        &self,
        options: AccountClientOptions,
    ) -> Result<Arc<dyn AccountClient>, CollaboratorError> {
        Ok(Arc::new(SandboxAccountClient::new(options, self.balance_usd)))
    }
}

/// Account client answering from derived data.
pub struct SandboxAccountClient {
    options: AccountClientOptions,
    balance_usd: Decimal,
    nonce: AtomicU64,
}

impl SandboxAccountClient {
    pub fn new(options: AccountClientOptions, balance_usd: Decimal) -> Self {
        Self {
            options,
            balance_usd,
            nonce: AtomicU64::new(0),
        }
    }

    fn derive(&self, family: &str) -> [u8; 32] {
        Sha256::new()
            .chain_update(family)
            .chain_update(&self.options.owner_address)
            .chain_update(&self.options.project_id)
            .finalize()
            .into()
    }
}

#[async_trait]
impl AccountClient for SandboxAccountClient {
    fn owner_address(&self) -> &str {
        &self.options.owner_address
    }

    async fn smart_account_options(&self) -> Result<SmartAccountOptions, CollaboratorError> {
        let evm = self.derive("evm");
        let solana = self.derive("solana");
        Ok(SmartAccountOptions {
            smart_account_address: Some(format!("0x{}", hex::encode(&evm[..20]))),
            solana_smart_account_address: Some(bs58::encode(solana).into_string()),
        })
    }

    async fn primary_assets(&self) -> Result<PrimaryAssets, CollaboratorError> {
        Ok(PrimaryAssets {
            total_amount_in_usd: self.balance_usd,
        })
    }

    async fn create_transaction(
        &self,
        chain_id: u64,
        calls: Vec<TargetCall>,
    ) -> Result<TransactionIntent, CollaboratorError> {
        if calls.is_empty() {
            return Err("transaction has no calls".into());
        }

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut hasher = Sha256::new()
            .chain_update(&self.options.owner_address)
            .chain_update(chain_id.to_be_bytes())
            .chain_update(nonce.to_be_bytes());
        for call in &calls {
            hasher.update(&call.to);
            hasher.update(&call.data);
            hasher.update(&call.value);
        }
        let root_hash = format!("0x{}", hex::encode(hasher.finalize()));

        Ok(TransactionIntent::new(chain_id, calls, root_hash))
    }

    async fn send_transaction(
        &self,
        intent: TransactionIntent,
        signature: &[u8],
    ) -> Result<TransactionId, CollaboratorError> {
        if signature.len() != SIGNATURE_LEN {
            return Err(format!(
                "invalid signature length {}, expected {}",
                signature.len(),
                SIGNATURE_LEN
            )
            .into());
        }

        let digest = Sha256::new()
            .chain_update(intent.root_hash())
            .chain_update(signature)
            .finalize();
        Ok(TransactionId(hex::encode(&digest[..16])))
    }
}
