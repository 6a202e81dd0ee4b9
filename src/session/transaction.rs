//! Transaction submitter
//!
//! `Idle -> Pending -> {Succeeded, Failed}`. The Pending flag is the only
//! lock: a submission while Pending is rejected, never queued.

use log::{debug, info, warn};

use crate::account::TransactionId;
use crate::display::result_url;
use crate::error::{SessionError, TransactionError, TransactionStage, describe};
use crate::session::controller::SessionController;
use crate::session::state::{ClientTicket, TransactionAttempt};

impl SessionController {
    /// Submits the preconfigured transaction for the live session.
    ///
    /// Returns the terminal attempt that was committed. Errors when no client
    /// is live, when an attempt is already pending, or when the session
    /// changed before the outcome could be applied.
    pub async fn submit_transaction(&self) -> Result<TransactionAttempt, SessionError> {
        let ticket = {
            let mut state = self.state.lock().await;
            let ticket = state.current_ticket().ok_or(SessionError::NotConnected)?;
            if state.transaction().is_pending() {
                return Err(SessionError::AlreadyPending);
            }
            state.set_transaction(TransactionAttempt::Pending);
            ticket
        };

        info!(
            "Submitting transaction for {} via client #{} to chain {}",
            ticket.owner(),
            ticket.id(),
            self.config.transaction.chain_id
        );

        let attempt = match self.execute_intent(&ticket).await {
            Ok(transaction_id) => {
                let result_url =
                    result_url(&self.config.transaction.result_url_base, &transaction_id);
                info!("Transaction {} submitted: {}", transaction_id, result_url);
                TransactionAttempt::Succeeded {
                    transaction_id,
                    result_url,
                }
            }
            Err(TransactionError::Interrupted(stage)) => {
                warn!(
                    "Session changed during submission from client #{}, stopped before {:?}",
                    ticket.id(),
                    stage
                );
                return Err(SessionError::SessionChanged);
            }
            Err(e) => {
                warn!("Transaction failed at {:?}: {}", e.stage(), e);
                TransactionAttempt::Failed(describe(&e))
            }
        };

        let mut state = self.state.lock().await;
        if !state.is_current(&ticket) {
            warn!(
                "Session changed during submission from client #{}, dropping outcome {:?}",
                ticket.id(),
                attempt
            );
            return Err(SessionError::SessionChanged);
        }
        state.set_transaction(attempt.clone());
        Ok(attempt)
    }

    /// Returns a finished attempt to Idle. Pending attempts are left alone.
    pub async fn dismiss_transaction(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.transaction().is_terminal() {
            state.set_transaction(TransactionAttempt::Idle);
            true
        } else {
            false
        }
    }

    /// Build, sign and submit, in that order. The ticket is checked against
    /// the live session before every step that follows an await.
    async fn execute_intent(
        &self,
        ticket: &ClientTicket,
    ) -> Result<TransactionId, TransactionError> {
        let transaction = &self.config.transaction;
        let client = ticket.client();

        let intent = client
            .create_transaction(transaction.chain_id, vec![transaction.target_call()])
            .await
            .map_err(TransactionError::Intent)?;
        debug!(
            "Intent {} built for chain {} with {} call(s)",
            intent.root_hash(),
            intent.chain_id(),
            intent.calls().len()
        );
        self.ensure_current(ticket, TransactionStage::Sign).await?;

        let payload = intent
            .root_hash_bytes()
            .map_err(|e| TransactionError::RootHash(format!("{} ({})", intent.root_hash(), e)))?;

        let signature = self
            .wallet
            .sign_message(ticket.owner(), &payload)
            .await
            .map_err(TransactionError::Signing)?;
        self.ensure_current(ticket, TransactionStage::Submit).await?;

        client
            .send_transaction(intent, &signature)
            .await
            .map_err(TransactionError::Submission)
    }

    async fn ensure_current(
        &self,
        ticket: &ClientTicket,
        next: TransactionStage,
    ) -> Result<(), TransactionError> {
        if self.state.lock().await.is_current(ticket) {
            Ok(())
        } else {
            Err(TransactionError::Interrupted(next))
        }
    }
}
