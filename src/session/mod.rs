//! Account session controller
//!
//! Owns the live wallet session, the account client bound to it and every
//! value derived from that client. All mutation goes through the transition
//! functions in `lifecycle`, `resolve` and `transaction`.

pub mod controller;
pub mod lifecycle;
pub mod resolve;
pub mod state;
pub mod transaction;

pub use controller::SessionController;
pub use resolve::ResolutionTasks;
pub use state::{AggregatedBalance, Resolution, SessionView, SmartAccountInfo, TransactionAttempt};
