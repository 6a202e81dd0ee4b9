use log::info;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use crate::account::AccountClientFactory;
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::session::state::{SessionState, SessionView, SharedState};
use crate::wallet::{WalletConnector, WalletSession};

/// Drives one wallet session and everything derived from it.
///
/// The wallet connection is the only upstream input. Connection changes go
/// through [`SessionController::on_wallet_changed`]; the presentation layer
/// reads [`SessionController::view`] and issues
/// [`SessionController::submit_transaction`].
pub struct SessionController {
    pub(super) state: SharedState,
    pub(super) wallet: Arc<dyn WalletConnector>,
    pub(super) factory: Arc<dyn AccountClientFactory>,
    pub(super) config: Arc<AppConfig>,

    /// Woken whenever a lifecycle change or lookup result is committed
    pub(super) committed: Arc<Notify>,
}

impl SessionController {
    pub fn new(
        config: Arc<AppConfig>,
        wallet: Arc<dyn WalletConnector>,
        factory: Arc<dyn AccountClientFactory>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            wallet,
            factory,
            config,
            committed: Arc::new(Notify::new()),
        }
    }

    /// Snapshot of the session for rendering
    pub async fn view(&self) -> SessionView {
        self.state.lock().await.view()
    }

    /// Waits until no lookup is loading and returns that view.
    pub async fn settled(&self) -> SessionView {
        self.wait_until(|view| !view.is_loading()).await
    }

    /// Waits until `check` holds for a committed view and returns it.
    ///
    /// Does not drive anything itself, so it can be used alongside
    /// [`SessionController::follow_wallet`].
    pub async fn wait_until<F>(&self, check: F) -> SessionView
    where
        F: Fn(&SessionView) -> bool,
    {
        loop {
            let committed = self.committed.notified();
            tokio::pin!(committed);
            committed.as_mut().enable();

            let view = self.view().await;
            if check(&view) {
                return view;
            }
            committed.await;
        }
    }

    /// Feeds every connection change into the lifecycle manager until the
    /// connector goes away.
    pub async fn follow_wallet(&self) {
        let mut updates = self.wallet.subscribe();

        loop {
            let session = updates.borrow_and_update().clone();
            self.on_wallet_changed(session).await;

            if updates.changed().await.is_err() {
                info!("Wallet connector closed, no longer following connection changes");
                break;
            }
        }
    }

    /// Disconnects the wallet and tears the session down without waiting
    /// for the connector to report it.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        self.wallet.disconnect().await.map_err(SessionError::Wallet)?;
        self.on_wallet_changed(WalletSession::disconnected()).await;
        Ok(())
    }
}
