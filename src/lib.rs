pub mod account;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod sandbox;
pub mod session;
pub mod wallet;

pub use crate::config::AppConfig;
pub use crate::session::SessionController;
