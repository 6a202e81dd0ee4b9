//! Module `session`
//!
//! Defines the `WalletSession` struct, the connection state reported by the
//! wallet connector and the root of all derived account state.

/// Connection state of the browser-style wallet.
///
/// Tracks the owner address, whether the wallet reports itself connected,
/// and the chain it is currently on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    owner_address: Option<String>,
    connected: bool,
    chain_id: Option<u64>,
}

impl WalletSession {
    /// A session connected as `owner_address`.
    pub fn connected(owner_address: impl Into<String>, chain_id: Option<u64>) -> Self {
        Self {
            owner_address: Some(owner_address.into()),
            connected: true,
            chain_id,
        }
    }

    /// A disconnected session.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Owner address that derived state is bound to.
    ///
    /// `None` unless the wallet is connected with a non-empty address; two
    /// sessions with the same identity share one account client.
    pub fn identity(&self) -> Option<&str> {
        match self.owner_address.as_deref() {
            Some(addr) if self.connected && !addr.trim().is_empty() => Some(addr),
            _ => None,
        }
    }

    /// Whether both sessions are bound to the same owner.
    pub fn same_identity(&self, other: &WalletSession) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => same_owner(a, b),
            (a, b) => a == b,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the chain the wallet is on, if known.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Sets the chain id; switching chains keeps the session identity.
    pub fn set_chain_id(&mut self, chain_id: Option<u64>) {
        self.chain_id = chain_id;
    }
}

/// Compares owner addresses. Hex (`0x`) addresses are case-insensitive since
/// checksummed and lowercase spellings name the same account; anything else,
/// such as base58, is compared exactly.
pub fn same_owner(a: &str, b: &str) -> bool {
    if is_hex_address(a) && is_hex_address(b) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

fn is_hex_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_hexdigit()))
}
