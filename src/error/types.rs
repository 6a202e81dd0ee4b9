//! Error types
//!
//! Domain-specific error types for the session controller and the failures
//! reported by its external collaborators.

use rust_decimal::Decimal;
use std::io;
use thiserror::Error;

/// Failure reported by a wallet connector or account client
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Rejections of controller commands
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No wallet connected")]
    NotConnected,

    #[error("A transaction is already pending")]
    AlreadyPending,

    /// The session was torn down while the command was in flight
    #[error("Session changed while the transaction was in flight")]
    SessionChanged,

    #[error("Wallet connector error: {0}")]
    Wallet(CollaboratorError),
}

/// Stage at which a transaction submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStage {
    BuildIntent,
    RootHash,
    Sign,
    Submit,
}

/// Transaction submission failure; displays as the collaborator's own message
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("{0}")]
    Intent(CollaboratorError),

    #[error("Malformed root hash: {0}")]
    RootHash(String),

    #[error("{0}")]
    Signing(CollaboratorError),

    #[error("{0}")]
    Submission(CollaboratorError),

    /// The session changed identity before the given stage could run
    #[error("Session changed before {0:?}")]
    Interrupted(TransactionStage),
}

impl TransactionError {
    pub fn stage(&self) -> TransactionStage {
        match self {
            TransactionError::Intent(_) => TransactionStage::BuildIntent,
            TransactionError::RootHash(_) => TransactionStage::RootHash,
            TransactionError::Signing(_) => TransactionStage::Sign,
            TransactionError::Submission(_) => TransactionStage::Submit,
            TransactionError::Interrupted(stage) => *stage,
        }
    }
}

/// Failed smart-account or balance lookup
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("{0}")]
    Client(CollaboratorError),

    #[error("Account client reported a negative balance: {0}")]
    NegativeBalance(Decimal),

    #[error("Account client could not be constructed: {0}")]
    Construction(String),
}

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
