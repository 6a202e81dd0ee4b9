/// Console commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Connect {
        address: String,
        chain_id: Option<u64>,
    },
    Chain(u64),
    Disconnect,
    Submit,
    Dismiss,
    Retry,
    Reject(bool),
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Parse a raw console line into a `Command`
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();
    let unknown = || Command::Unknown(trimmed.to_string());

    match (cmd.as_str(), args.as_slice()) {
        ("connect", [address]) => Command::Connect {
            address: address.to_string(),
            chain_id: None,
        },
        ("connect", [address, chain]) => match chain.parse() {
            Ok(chain_id) => Command::Connect {
                address: address.to_string(),
                chain_id: Some(chain_id),
            },
            Err(_) => unknown(),
        },
        ("chain", [chain]) => chain.parse().map(Command::Chain).unwrap_or_else(|_| unknown()),
        ("disconnect", []) => Command::Disconnect,
        ("submit" | "mint", []) => Command::Submit,
        ("dismiss", []) => Command::Dismiss,
        ("retry", []) => Command::Retry,
        ("reject", ["on"]) => Command::Reject(true),
        ("reject", ["off"]) => Command::Reject(false),
        ("status" | "s", []) => Command::Status,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => unknown(),
    }
}
