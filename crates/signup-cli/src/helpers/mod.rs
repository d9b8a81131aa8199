//! Helper functions for the signup CLI.
//!
//! - **Fields**: Document data from `--field` and `--data` arguments
//! - **Input**: Password reading from flags, env, or prompt

mod fields;
mod input;

pub use fields::{collect_fields, parse_value};
pub use input::read_password;
