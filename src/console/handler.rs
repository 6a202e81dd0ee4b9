use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::console::parser::{Command, parse_command};
use crate::display::render_view;
use crate::sandbox::SandboxWallet;
use crate::session::SessionController;
use crate::wallet::WalletConnector;

const MAX_COMMAND_LENGTH: usize = 512;

const HELP: &str = "\
Commands:
  connect <address> [chain]  connect the wallet
  chain <id>                 switch the wallet's chain
  disconnect                 disconnect the wallet
  submit                     submit the mint transaction
  dismiss                    clear a finished transaction
  retry                      retry failed lookups
  reject on|off              make the wallet decline signatures
  status                     show the session
  quit                       exit
";

/// Outcome status of a console command
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Continue,
    Quit,
}

/// Status plus the text to print
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    fn show(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Continue,
            message: Some(message.into()),
        }
    }
}

/// Reads commands line by line until `quit` or end of input.
pub async fn run_console<R, W>(
    reader: R,
    mut writer: W,
    controller: Arc<SessionController>,
    wallet: Arc<SandboxWallet>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    writer.write_all(HELP.as_bytes()).await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.len() > MAX_COMMAND_LENGTH {
            writer.write_all(b"Command too long\n").await?;
            continue;
        }

        let command = parse_command(&line);
        info!("Console command: {:?}", command);

        let result = handle_command(&controller, &wallet, command).await;
        if let Some(message) = result.message {
            writer.write_all(message.as_bytes()).await?;
            if !message.ends_with('\n') {
                writer.write_all(b"\n").await?;
            }
            writer.flush().await?;
        }

        if result.status == CommandStatus::Quit {
            break;
        }
    }

    Ok(())
}

/// Applies one command to the sandbox wallet and the controller.
pub async fn handle_command(
    controller: &SessionController,
    wallet: &SandboxWallet,
    command: Command,
) -> CommandResult {
    match command {
        Command::Connect { address, chain_id } => {
            wallet.connect(&address, chain_id);
            settle(controller, wallet).await;
            CommandResult::show(render_view(&controller.view().await))
        }
        Command::Chain(chain_id) => {
            if !wallet.switch_chain(chain_id) {
                return CommandResult::show("Wallet not connected or already on that chain");
            }
            settle(controller, wallet).await;
            CommandResult::show(render_view(&controller.view().await))
        }
        Command::Disconnect => match controller.disconnect().await {
            Ok(()) => CommandResult::show(render_view(&controller.view().await)),
            Err(e) => CommandResult::show(format!("Disconnect failed: {e}")),
        },
        Command::Submit => match controller.submit_transaction().await {
            Ok(_) => CommandResult::show(render_view(&controller.view().await)),
            Err(e) => {
                warn!("Submission rejected: {}", e);
                CommandResult::show(format!("Cannot submit: {e}"))
            }
        },
        Command::Dismiss => {
            if controller.dismiss_transaction().await {
                CommandResult::show(render_view(&controller.view().await))
            } else {
                CommandResult::show("Nothing to dismiss")
            }
        }
        Command::Retry => match controller.retry_resolutions().await {
            Some(tasks) => {
                tasks.join().await;
                CommandResult::show(render_view(&controller.view().await))
            }
            None => CommandResult::show("Nothing to retry"),
        },
        Command::Reject(reject) => {
            wallet.set_reject_signatures(reject);
            let state = if reject { "decline" } else { "approve" };
            CommandResult::show(format!("Wallet will {state} signature requests"))
        }
        Command::Status => CommandResult::show(render_view(&controller.view().await)),
        Command::Help => CommandResult::show(HELP),
        Command::Quit => CommandResult {
            status: CommandStatus::Quit,
            message: Some("Goodbye".to_string()),
        },
        Command::Unknown(raw) => CommandResult::show(format!("Unknown command: {raw:?} (try help)")),
    }
}

/// Applies the wallet's current state and waits until the controller has
/// committed it with no lookup in flight. Applying is idempotent, so a
/// wallet follower may be running at the same time.
async fn settle(controller: &SessionController, wallet: &SandboxWallet) {
    let expected = wallet.session();
    controller.on_wallet_changed(expected.clone()).await;
    controller
        .wait_until(|view| view.wallet == expected && !view.is_loading())
        .await;
}
