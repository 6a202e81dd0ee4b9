//! Console front-end
//!
//! Line-oriented commands that drive the sandbox wallet and the session
//! controller, printing the rendered session after each change.

pub mod handler;
pub mod parser;

pub use handler::{CommandResult, CommandStatus, handle_command, run_console};
pub use parser::{Command, parse_command};
