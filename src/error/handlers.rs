//! Error handlers
//!
//! Converts errors into the text shown to the user and the log.

use crate::error::types::AppError;
use log::error;
use std::error::Error;

/// Handle an application error
pub fn handle_error(err: &AppError) {
    error!("Workshop error: {}", err);
}

/// Human readable description of an error, falling back to its debug form
pub fn describe(err: &(dyn Error + 'static)) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        format!("{err:?}")
    } else {
        message
    }
}
