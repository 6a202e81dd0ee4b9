//! Data exchanged with the account client.

use rust_decimal::Decimal;

/// Smart-account addresses the client derived for an owner.
/// A family the client does not support is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmartAccountOptions {
    pub smart_account_address: Option<String>,
    pub solana_smart_account_address: Option<String>,
}

/// Primary assets aggregated across every chain the client monitors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryAssets {
    pub total_amount_in_usd: Decimal,
}

/// One contract call inside a cross-chain intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCall {
    pub to: String,
    pub data: String,
    pub value: String,
}

/// A cross-chain action prepared by the client, authorized by signing its root hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    chain_id: u64,
    calls: Vec<TargetCall>,
    root_hash: String,
}

impl TransactionIntent {
    pub fn new(chain_id: u64, calls: Vec<TargetCall>, root_hash: impl Into<String>) -> Self {
        Self {
            chain_id,
            calls,
            root_hash: root_hash.into(),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn calls(&self) -> &[TargetCall] {
        &self.calls
    }

    /// Canonical root hash, 0x-prefixed hex
    pub fn root_hash(&self) -> &str {
        &self.root_hash
    }

    /// Root hash bytes as handed to the wallet for signing
    pub fn root_hash_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(self.root_hash.trim_start_matches("0x"))
    }
}

/// Identifier the account service returns for an executed intent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
