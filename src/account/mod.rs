//! Universal account client seam
//!
//! The account client is an external collaborator. This module only defines
//! the contract the session controller relies on and the data it exchanges.

pub mod chains;
pub mod client;
pub mod types;

pub use client::{AccountClient, AccountClientFactory, AccountClientOptions};
pub use types::{PrimaryAssets, SmartAccountOptions, TargetCall, TransactionId, TransactionIntent};
