//! Account client and factory traits.

use async_trait::async_trait;
use std::sync::Arc;

use crate::account::types::{
    PrimaryAssets, SmartAccountOptions, TargetCall, TransactionId, TransactionIntent,
};
use crate::config::AppConfig;
use crate::error::CollaboratorError;

/// Everything needed to bind a client to one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountClientOptions {
    pub owner_address: String,
    pub project_id: String,
    pub project_client_key: String,
    pub project_app_id: String,
    pub slippage_bps: u16,
    pub universal_gas: bool,

    /// Chain selector, set only when routing through the wallet's chain
    pub chain_id: Option<u64>,
}

impl AccountClientOptions {
    pub fn new(owner_address: &str, chain_id: Option<u64>, config: &AppConfig) -> Self {
        Self {
            owner_address: owner_address.to_string(),
            project_id: config.account.project_id.clone(),
            project_client_key: config.account.project_client_key.clone(),
            project_app_id: config.account.project_app_id.clone(),
            slippage_bps: config.trade.slippage_bps,
            universal_gas: config.trade.universal_gas,
            chain_id: chain_id.filter(|_| config.account.route_via_wallet_chain),
        }
    }
}

/// Handle to the external universal account service, bound to one owner.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Owner address this client was built for
    fn owner_address(&self) -> &str;

    async fn smart_account_options(&self) -> Result<SmartAccountOptions, CollaboratorError>;

    async fn primary_assets(&self) -> Result<PrimaryAssets, CollaboratorError>;

    async fn create_transaction(
        &self,
        chain_id: u64,
        calls: Vec<TargetCall>,
    ) -> Result<TransactionIntent, CollaboratorError>;

    async fn send_transaction(
        &self,
        intent: TransactionIntent,
        signature: &[u8],
    ) -> Result<TransactionId, CollaboratorError>;
}

/// Builds account clients; construction itself does not contact the service.
pub trait AccountClientFactory: Send + Sync {
    fn create(
        &self,
        options: AccountClientOptions,
    ) -> Result<Arc<dyn AccountClient>, CollaboratorError>;
}
