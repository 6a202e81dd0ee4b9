//! Session state
//!
//! Derived values and the single-slot transaction state, plus the bookkeeping
//! that ties each value to the account client that produced it.

use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::account::{AccountClient, SmartAccountOptions, TransactionId};
use crate::wallet::WalletSession;

/// Outcome of a lookup against the account client.
///
/// `Unresolved` means nothing was requested for the live client, `Loading`
/// that a request is in flight, `Failed` that the last request errored.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Unresolved,
    Loading,
    Resolved(T),
    Failed(String),
}

impl<T> Default for Resolution<T> {
    fn default() -> Self {
        Resolution::Unresolved
    }
}

impl<T> Resolution<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resolution::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Resolution::Failed(_))
    }

    /// Whether a new request should be issued for this value
    pub fn needs_request(&self) -> bool {
        matches!(self, Resolution::Unresolved | Resolution::Failed(_))
    }
}

/// Smart-account addresses of the session owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartAccountInfo {
    pub owner_address: String,
    pub evm_smart_account: String,
    pub solana_smart_account: String,
}

impl SmartAccountInfo {
    /// Families the client did not report become empty strings
    pub fn from_options(owner_address: &str, options: SmartAccountOptions) -> Self {
        Self {
            owner_address: owner_address.to_string(),
            evm_smart_account: options.smart_account_address.unwrap_or_default(),
            solana_smart_account: options.solana_smart_account_address.unwrap_or_default(),
        }
    }
}

/// USD value of primary assets across every chain the client tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedBalance {
    pub total_amount_in_usd: Decimal,
}

/// State of the user-initiated transaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionAttempt {
    #[default]
    Idle,
    Pending,
    Succeeded {
        transaction_id: TransactionId,
        result_url: String,
    },
    Failed(String),
}

impl TransactionAttempt {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionAttempt::Pending)
    }

    /// Succeeded or Failed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionAttempt::Succeeded { .. } | TransactionAttempt::Failed(_)
        )
    }

    /// Submit control is enabled in every state but Pending
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }
}

/// A live account client together with the identity used to detect stale work
#[derive(Clone)]
pub(crate) struct ClientTicket {
    id: u64,
    owner: String,
    client: Arc<dyn AccountClient>,
}

impl ClientTicket {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn client(&self) -> &dyn AccountClient {
        self.client.as_ref()
    }
}

impl fmt::Debug for ClientTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientTicket")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Shared session state
pub(crate) type SharedState = Arc<Mutex<SessionState>>;

/// Everything the controller owns. At most one client is live.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    wallet: WalletSession,
    client: Option<ClientTicket>,
    clients_created: u64,
    smart_accounts: Resolution<SmartAccountInfo>,
    balance: Resolution<AggregatedBalance>,
    transaction: TransactionAttempt,
}

impl SessionState {
    /// Binds a freshly constructed client; both lookups start as Loading.
    pub(crate) fn install(&mut self, owner: String, client: Arc<dyn AccountClient>) -> ClientTicket {
        self.clients_created += 1;
        let ticket = ClientTicket {
            id: self.clients_created,
            owner,
            client,
        };
        self.client = Some(ticket.clone());
        self.smart_accounts = Resolution::Loading;
        self.balance = Resolution::Loading;
        self.transaction = TransactionAttempt::Idle;
        ticket
    }

    /// Drops the live client and clears all derived state.
    pub(crate) fn teardown(&mut self) -> Option<ClientTicket> {
        self.smart_accounts = Resolution::Unresolved;
        self.balance = Resolution::Unresolved;
        self.transaction = TransactionAttempt::Idle;
        self.client.take()
    }

    /// Whether `ticket` still names the live client
    pub(crate) fn is_current(&self, ticket: &ClientTicket) -> bool {
        self.client.as_ref().is_some_and(|live| live.id == ticket.id)
    }

    pub(crate) fn current_ticket(&self) -> Option<ClientTicket> {
        self.client.clone()
    }

    pub(crate) fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub(crate) fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    pub(crate) fn smart_accounts(&self) -> &Resolution<SmartAccountInfo> {
        &self.smart_accounts
    }

    pub(crate) fn balance(&self) -> &Resolution<AggregatedBalance> {
        &self.balance
    }

    pub(crate) fn transaction(&self) -> &TransactionAttempt {
        &self.transaction
    }

    pub(crate) fn set_wallet(&mut self, wallet: WalletSession) {
        self.wallet = wallet;
    }

    pub(crate) fn set_smart_accounts(&mut self, value: Resolution<SmartAccountInfo>) {
        self.smart_accounts = value;
    }

    pub(crate) fn set_balance(&mut self, value: Resolution<AggregatedBalance>) {
        self.balance = value;
    }

    pub(crate) fn set_transaction(&mut self, attempt: TransactionAttempt) {
        self.transaction = attempt;
    }

    /// Read-only copy for the presentation layer
    pub(crate) fn view(&self) -> SessionView {
        SessionView {
            wallet: self.wallet.clone(),
            client_id: self.client.as_ref().map(ClientTicket::id),
            smart_accounts: self.smart_accounts.clone(),
            balance: self.balance.clone(),
            transaction: self.transaction.clone(),
        }
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub wallet: WalletSession,

    /// Identity of the live account client, if any
    pub client_id: Option<u64>,
    pub smart_accounts: Resolution<SmartAccountInfo>,
    pub balance: Resolution<AggregatedBalance>,
    pub transaction: TransactionAttempt,
}

impl SessionView {
    /// Whether either lookup is still in flight
    pub fn is_loading(&self) -> bool {
        self.smart_accounts.is_loading() || self.balance.is_loading()
    }
}
