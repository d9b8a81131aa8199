//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (store failures, unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, store, document).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (unknown email or wrong password).
    pub const AUTH_FAILED: i32 = 5;

    /// Target already exists (email registered, document ID taken).
    pub const CONFLICT: i32 = 6;
}

/// Placeholder printed instead of credential fields.
pub const REDACTED: &str = "<redacted>";
