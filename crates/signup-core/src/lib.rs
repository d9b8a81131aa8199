//! # Signup Core
//!
//! Core library for signup - a document-store access layer and the user
//! registration workflow built on top of it.
//!
//! This crate is independent of the CLI front end.
//!
//! ## Architecture
//!
//! - **storage**: `DocumentBackend` trait, memory and SQLite backends, filters
//! - **manager**: `DatabaseManager`, the validated store access layer
//! - **credentials**: Argon2id password hashing
//! - **signup**: `SignUpWorkflow` and its user-facing outcomes

pub mod credentials;
pub mod error;
pub mod manager;
pub mod signup;
pub mod storage;

pub use credentials::CredentialHasher;
pub use error::{Result, SignupError};
pub use manager::DatabaseManager;
pub use signup::{
    check_sign_up_input, SignInOutcome, SignInStatus, SignUpOutcome, SignUpPolicy, SignUpStatus,
    SignUpWorkflow, DEFAULT_USERS_COLLECTION, PASSWORD_HASH_FIELD,
};
pub use storage::DocumentBackend;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
