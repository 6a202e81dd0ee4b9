use async_trait::async_trait;
use log::info;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::error::CollaboratorError;
use crate::wallet::{WalletConnector, WalletSession, same_owner};

/// Recovery id appended to sandbox signatures
const RECOVERY_ID: u8 = 27;

/// A wallet driven by console commands.
pub struct SandboxWallet {
    updates: watch::Sender<WalletSession>,
    reject_signatures: AtomicBool,
}

impl SandboxWallet {
    pub fn new() -> Self {
        let (updates, _) = watch::channel(WalletSession::disconnected());
        Self {
            updates,
            reject_signatures: AtomicBool::new(false),
        }
    }

    /// Connects as `owner_address`, replacing any previous account.
    pub fn connect(&self, owner_address: &str, chain_id: Option<u64>) {
        info!("Sandbox wallet connected as {}", owner_address);
        self.updates
            .send_replace(WalletSession::connected(owner_address, chain_id));
    }

    /// Switches chains without changing the connected account.
    pub fn switch_chain(&self, chain_id: u64) -> bool {
        self.updates.send_if_modified(|session| {
            if session.identity().is_none() || session.chain_id() == Some(chain_id) {
                return false;
            }
            session.set_chain_id(Some(chain_id));
            true
        })
    }

    /// Makes every signing request fail as if the user declined it.
    pub fn set_reject_signatures(&self, reject: bool) {
        self.reject_signatures.store(reject, Ordering::SeqCst);
    }
}

impl Default for SandboxWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletConnector for SandboxWallet {
    fn session(&self) -> WalletSession {
        self.updates.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.updates.subscribe()
    }

    async fn disconnect(&self) -> Result<(), CollaboratorError> {
        self.updates.send_replace(WalletSession::disconnected());
        Ok(())
    }

    async fn sign_message(
        &self,
        account: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, CollaboratorError> {
        if self.reject_signatures.load(Ordering::SeqCst) {
            return Err("user rejected".into());
        }

        let session = self.session();
        if !session.identity().is_some_and(|owner| same_owner(owner, account)) {
            return Err(format!("account {account} is not connected").into());
        }

        let head = Sha256::new().chain_update(account).chain_update(payload).finalize();
        let tail = Sha256::new().chain_update(payload).chain_update(account).finalize();

        let mut signature = Vec::with_capacity(65);
        signature.extend_from_slice(&head);
        signature.extend_from_slice(&tail);
        signature.push(RECOVERY_ID);
        Ok(signature)
    }
}
