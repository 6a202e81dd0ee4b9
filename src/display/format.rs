use crate::account::TransactionId;
use crate::session::{AggregatedBalance, Resolution};

/// Decimal places shown for a resolved balance
pub const BALANCE_DECIMALS: u32 = 4;

/// Shown while no balance is resolved. Intentionally not 4 decimals.
pub const UNRESOLVED_BALANCE: &str = "0.00";

/// Truncates an address to its first 6 and last 4 characters.
pub fn format_address(addr: &str) -> String {
    if addr.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = addr.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

/// USD total with fixed precision, or `"0.00"` when not resolved.
pub fn format_balance(balance: &Resolution<AggregatedBalance>) -> String {
    match balance.value() {
        Some(balance) => {
            let mut amount = balance.total_amount_in_usd;
            amount.rescale(BALANCE_DECIMALS);
            amount.to_string()
        }
        None => UNRESOLVED_BALANCE.to_string(),
    }
}

/// Link to the submitted transaction's activity page
pub fn result_url(base: &str, transaction_id: &TransactionId) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}id={transaction_id}")
}
