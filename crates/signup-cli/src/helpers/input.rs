//! Password input for `register`.

use std::io::{self, IsTerminal};

use dialoguer::Password;

use crate::errors::CliError;

/// Environment variable read when `--password` is not given.
pub const PASSWORD_ENV: &str = "SIGNUP_PASSWORD";

/// Resolve the password from the flag, SIGNUP_PASSWORD, or a hidden prompt.
///
/// An explicitly empty flag is returned as-is so the workflow reports the
/// missing field. `confirm` asks twice when prompting.
pub fn read_password(flag: Option<&str>, no_input: bool, confirm: bool) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    if let Ok(value) = std::env::var(PASSWORD_ENV) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    if no_input || !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Pass --password or set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
