use crate::account::chains::chain_name;
use crate::display::format::{format_address, format_balance};
use crate::session::{Resolution, SessionView, TransactionAttempt};

/// Renders a session as the lines the console prints.
pub fn render_view(view: &SessionView) -> String {
    let mut lines = vec!["Universal Accounts Workshop".to_string()];

    let Some(owner) = view.wallet.identity() else {
        lines.push("Connect your wallet to view account details".to_string());
        return join_lines(lines);
    };

    let chain = match view.wallet.chain_id() {
        Some(id) => match chain_name(id) {
            Some(name) => format!(" (chain {id}, {name})"),
            None => format!(" (chain {id})"),
        },
        None => String::new(),
    };
    lines.push(format!("Wallet Address: {}{}", format_address(owner), chain));

    match &view.smart_accounts {
        Resolution::Resolved(info) => {
            lines.push(format!(
                "EVM Smart Account Address: {}",
                format_address(&info.evm_smart_account)
            ));
            lines.push(format!(
                "SOL Smart Account Address: {}",
                format_address(&info.solana_smart_account)
            ));
        }
        Resolution::Loading => lines.push("Smart Account Addresses: loading...".to_string()),
        Resolution::Failed(reason) => {
            lines.push(format!("Smart Account Addresses: unavailable ({reason})"))
        }
        Resolution::Unresolved => {}
    }

    lines.push(format!("Universal Balance: ${}", format_balance(&view.balance)));
    if let Resolution::Failed(reason) = &view.balance {
        lines.push(format!("  balance unavailable ({reason})"));
    }

    let transaction = match &view.transaction {
        TransactionAttempt::Idle => "ready".to_string(),
        TransactionAttempt::Pending => "pending...".to_string(),
        TransactionAttempt::Succeeded { result_url, .. } => format!("submitted, {result_url}"),
        TransactionAttempt::Failed(message) => format!("failed, {message}"),
    };
    lines.push(format!("Mint Transaction: {transaction}"));

    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::TransactionId;
    use crate::session::{AggregatedBalance, SmartAccountInfo};
    use crate::wallet::WalletSession;
    use rust_decimal::Decimal;

    fn connected_view() -> SessionView {
        SessionView {
            wallet: WalletSession::connected("0x1234567890abcdef1234", Some(8453)),
            client_id: Some(1),
            smart_accounts: Resolution::Resolved(SmartAccountInfo {
                owner_address: "0x1234567890abcdef1234".into(),
                evm_smart_account: "0xaaaaaaaaaaaaaaaabbbb".into(),
                solana_smart_account: "So11111111111111111111111111111111111111112".into(),
            }),
            balance: Resolution::Resolved(AggregatedBalance {
                total_amount_in_usd: Decimal::new(123, 1),
            }),
            transaction: TransactionAttempt::Idle,
        }
    }

    #[test]
    fn test_render_disconnected() {
        let view = SessionView {
            wallet: WalletSession::disconnected(),
            client_id: None,
            smart_accounts: Resolution::Unresolved,
            balance: Resolution::Unresolved,
            transaction: TransactionAttempt::Idle,
        };
        let text = render_view(&view);
        assert_eq!(
            text,
            "Universal Accounts Workshop\nConnect your wallet to view account details\n"
        );
    }

    #[test]
    fn test_render_connected() {
        let text = render_view(&connected_view());
        assert!(text.contains("Wallet Address: 0x1234...1234 (chain 8453, Base)"));
        assert!(text.contains("EVM Smart Account Address: 0xaaaa...bbbb"));
        assert!(text.contains("SOL Smart Account Address: So1111...1112"));
        assert!(text.contains("Universal Balance: $12.3000"));
        assert!(text.ends_with("Mint Transaction: ready\n"));
    }

    #[test]
    fn test_render_loading_lookups() {
        let mut view = connected_view();
        view.smart_accounts = Resolution::Loading;
        view.balance = Resolution::Loading;
        let text = render_view(&view);
        assert!(text.contains("Smart Account Addresses: loading..."));
        assert!(text.contains("Universal Balance: $0.00"));
        assert!(!text.contains("EVM Smart Account Address"));
    }

    #[test]
    fn test_render_transaction_outcomes() {
        let mut view = connected_view();
        view.transaction = TransactionAttempt::Succeeded {
            transaction_id: TransactionId("abc123".into()),
            result_url: "https://universalx.app/activity/details?id=abc123".into(),
        };
        assert!(render_view(&view).contains("id=abc123"));

        view.transaction = TransactionAttempt::Failed("user rejected".into());
        assert!(render_view(&view).contains("failed, user rejected"));
    }

    #[test]
    fn test_render_failed_balance_keeps_placeholder() {
        let mut view = connected_view();
        view.balance = Resolution::Failed("service down".into());
        let text = render_view(&view);
        assert!(text.contains("Universal Balance: $0.00"));
        assert!(text.contains("balance unavailable (service down)"));
    }
}
