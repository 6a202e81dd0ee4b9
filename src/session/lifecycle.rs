//! Session lifecycle manager
//!
//! Turns wallet connection changes into account client construction and
//! teardown. A change of owner identity always discards the live client
//! before anything else happens.

use log::{info, warn};

use crate::account::AccountClientOptions;
use crate::error::{ResolutionError, describe};
use crate::session::controller::SessionController;
use crate::session::resolve::ResolutionTasks;
use crate::session::state::{ClientTicket, Resolution, SessionState};
use crate::wallet::{WalletSession, same_owner};

impl SessionController {
    /// Applies a connection change reported by the wallet connector.
    ///
    /// Returns the resolution tasks started for a newly constructed client,
    /// or `None` when no client was constructed.
    pub async fn on_wallet_changed(&self, session: WalletSession) -> Option<ResolutionTasks> {
        let ticket = {
            let mut state = self.state.lock().await;
            let identity_changed = !state.wallet().same_identity(&session);
            state.set_wallet(session);

            if identity_changed {
                if let Some(old) = state.teardown() {
                    info!(
                        "Discarded account client #{} for {}",
                        old.id(),
                        old.owner()
                    );
                }
            }

            if state.has_client() {
                None
            } else {
                self.construct_client(&mut state)
            }
        };
        self.committed.notify_waiters();

        Some(self.spawn_resolutions(ticket?, true, true))
    }

    /// Builds a client for the current identity. Lookups are marked failed
    /// when construction fails.
    pub(super) fn construct_client(&self, state: &mut SessionState) -> Option<ClientTicket> {
        let owner = state.wallet().identity()?.to_string();
        let options = AccountClientOptions::new(&owner, state.wallet().chain_id(), &self.config);

        let created = self.factory.create(options).and_then(|client| {
            if same_owner(client.owner_address(), &owner) {
                Ok(client)
            } else {
                Err(format!("client is bound to {}", client.owner_address()).into())
            }
        });

        match created {
            Ok(client) => {
                let ticket = state.install(owner, client);
                info!(
                    "Account client #{} initialized for {}",
                    ticket.id(),
                    ticket.owner()
                );
                Some(ticket)
            }
            Err(e) => {
                let reason = ResolutionError::Construction(describe(&*e)).to_string();
                warn!("{} (owner {})", reason, owner);
                state.set_smart_accounts(Resolution::Failed(reason.clone()));
                state.set_balance(Resolution::Failed(reason));
                None
            }
        }
    }
}
