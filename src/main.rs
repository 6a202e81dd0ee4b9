//! Universal Account workshop - Entry Point
//!
//! Runs the session controller against the offline sandbox wallet and
//! account service, driven from the terminal.

use log::{error, info};
use std::sync::Arc;
use tokio::io::BufReader;

use ua_workshop::AppConfig;
use ua_workshop::console::run_console;
use ua_workshop::error::{AppError, handle_error};
use ua_workshop::sandbox::{SandboxAccountFactory, SandboxWallet};
use ua_workshop::session::SessionController;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching universal account workshop...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Arc::new(AppConfig::load()?);
    info!(
        "Transactions target {} on chain {}",
        config.transaction.contract_address, config.transaction.chain_id
    );

    let factory = match SandboxAccountFactory::from_config(&config.sandbox) {
        Ok(factory) => Arc::new(factory),
        Err(e) => {
            error!("Invalid sandbox configuration: {}", e);
            return Err(config::ConfigError::Message(e.to_string()).into());
        }
    };
    let wallet = Arc::new(SandboxWallet::new());
    let controller = Arc::new(SessionController::new(
        Arc::clone(&config),
        wallet.clone(),
        factory,
    ));

    let follower = Arc::clone(&controller);
    tokio::spawn(async move { follower.follow_wallet().await });

    run_console(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        controller,
        wallet,
    )
    .await?;

    info!("Workshop console closed");
    Ok(())
}
