//! Offline collaborators
//!
//! In-memory stand-ins for the wallet connector and the account service so
//! the console can run without network access. Addresses, hashes and
//! transaction ids are derived deterministically with sha256.

pub mod account;
pub mod wallet;

pub use account::{SandboxAccountClient, SandboxAccountFactory};
pub use wallet::SandboxWallet;
