//! Error handling
//!
//! Defines error types and handling for the session controller.

pub mod handlers;
pub mod types;

pub use handlers::{describe, handle_error};
pub use types::*;
