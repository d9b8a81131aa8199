//! Application-level utilities for the signup CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - A lazily-loaded application context

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
