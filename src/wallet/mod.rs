//! Wallet connection
//!
//! The wallet connector is the sole upstream input of the controller: it
//! reports connection state and signs payloads on behalf of the owner.

pub mod connector;
pub mod session;

pub use connector::WalletConnector;
pub use session::{WalletSession, same_owner};
