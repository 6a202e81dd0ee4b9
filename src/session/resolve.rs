//! Smart-account and balance resolvers
//!
//! Each resolver issues one request against the client named by its ticket
//! and commits the answer only if that client is still the live one.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::error::{ResolutionError, describe};
use crate::session::controller::SessionController;
use crate::session::state::{
    AggregatedBalance, ClientTicket, Resolution, SharedState, SmartAccountInfo,
};

/// Handles of the lookups started for one client.
///
/// Dropping them detaches the tasks; awaiting [`ResolutionTasks::join`]
/// waits until both have committed or been discarded.
#[derive(Debug)]
pub struct ResolutionTasks {
    smart_accounts: Option<JoinHandle<()>>,
    balance: Option<JoinHandle<()>>,
}

impl ResolutionTasks {
    pub async fn join(self) {
        for handle in [self.smart_accounts, self.balance].into_iter().flatten() {
            if let Err(e) = handle.await {
                warn!("Resolution task did not complete: {}", e);
            }
        }
    }
}

impl SessionController {
    pub(super) fn spawn_resolutions(
        &self,
        ticket: ClientTicket,
        smart_accounts: bool,
        balance: bool,
    ) -> ResolutionTasks {
        let smart_accounts = smart_accounts.then(|| {
            tokio::spawn(resolve_smart_accounts(
                self.state.clone(),
                self.committed.clone(),
                ticket.clone(),
            ))
        });
        let balance = balance.then(|| {
            tokio::spawn(resolve_balance(
                self.state.clone(),
                self.committed.clone(),
                ticket,
            ))
        });

        ResolutionTasks {
            smart_accounts,
            balance,
        }
    }

    /// Re-issues lookups that are unresolved or failed. Rebuilds the client
    /// first if its construction failed earlier.
    pub async fn retry_resolutions(&self) -> Option<ResolutionTasks> {
        let (ticket, smart_accounts, balance) = {
            let mut state = self.state.lock().await;

            match state.current_ticket() {
                Some(ticket) => {
                    let smart_accounts = state.smart_accounts().needs_request();
                    let balance = state.balance().needs_request();
                    if smart_accounts {
                        state.set_smart_accounts(Resolution::Loading);
                    }
                    if balance {
                        state.set_balance(Resolution::Loading);
                    }
                    (ticket, smart_accounts, balance)
                }
                None => (self.construct_client(&mut state)?, true, true),
            }
        };

        if !smart_accounts && !balance {
            return None;
        }

        Some(self.spawn_resolutions(ticket, smart_accounts, balance))
    }
}

async fn resolve_smart_accounts(
    state: SharedState,
    committed: Arc<Notify>,
    ticket: ClientTicket,
) {
    let outcome = ticket
        .client()
        .smart_account_options()
        .await
        .map(|options| SmartAccountInfo::from_options(ticket.owner(), options))
        .map_err(ResolutionError::Client);

    let mut state = state.lock().await;
    if !state.is_current(&ticket) {
        debug!(
            "Discarding smart accounts from stale client #{} ({})",
            ticket.id(),
            ticket.owner()
        );
        return;
    }

    match outcome {
        Ok(info) => {
            info!(
                "Smart accounts for {}: evm={} solana={}",
                info.owner_address, info.evm_smart_account, info.solana_smart_account
            );
            state.set_smart_accounts(Resolution::Resolved(info));
        }
        Err(e) => {
            warn!("Smart account lookup failed for {}: {}", ticket.owner(), e);
            state.set_smart_accounts(Resolution::Failed(describe(&e)));
        }
    }
    committed.notify_waiters();
}

async fn resolve_balance(
    state: SharedState,
    committed: Arc<Notify>,
    ticket: ClientTicket,
) {
    let outcome = match ticket.client().primary_assets().await {
        Ok(assets) if assets.total_amount_in_usd < Decimal::ZERO => {
            Err(ResolutionError::NegativeBalance(assets.total_amount_in_usd))
        }
        Ok(assets) => Ok(AggregatedBalance {
            total_amount_in_usd: assets.total_amount_in_usd,
        }),
        Err(e) => Err(ResolutionError::Client(e)),
    };

    let mut state = state.lock().await;
    if !state.is_current(&ticket) {
        debug!(
            "Discarding balance from stale client #{} ({})",
            ticket.id(),
            ticket.owner()
        );
        return;
    }

    match outcome {
        Ok(balance) => {
            info!(
                "Universal balance for {}: ${}",
                ticket.owner(),
                balance.total_amount_in_usd
            );
            state.set_balance(Resolution::Resolved(balance));
        }
        Err(e) => {
            warn!("Balance lookup failed for {}: {}", ticket.owner(), e);
            state.set_balance(Resolution::Failed(describe(&e)));
        }
    }
    committed.notify_waiters();
}
