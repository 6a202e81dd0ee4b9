use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CollaboratorError;
use crate::wallet::WalletSession;

/// Abstraction over the wallet-connection library.
///
/// Implementations publish every connection change on a watch channel; the
/// controller never polls.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Current connection state.
    fn session(&self) -> WalletSession;

    /// Receiver that observes every subsequent connection change.
    fn subscribe(&self) -> watch::Receiver<WalletSession>;

    async fn disconnect(&self) -> Result<(), CollaboratorError>;

    /// Sign a raw payload with `account`. Returns the signature bytes.
    async fn sign_message(
        &self,
        account: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, CollaboratorError>;
}
