//! Presentation helpers
//!
//! Text formatting shared by every front-end that renders a session.

pub mod format;
pub mod view;

pub use format::{format_address, format_balance, result_url};
pub use view::render_view;
