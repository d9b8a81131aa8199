//! UI primitives for the signup CLI.
//!
//! - **Context**: Environment detection (TTY, color, width)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and colors
//! - **Render**: Tables, badges, key-value lines, errors

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{badge, kv, print, print_error, table, Column};
