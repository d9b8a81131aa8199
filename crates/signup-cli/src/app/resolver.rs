//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, SignupConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking SIGNUP_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("SIGNUP_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path from CLI args, falling back to the config file.
pub fn resolve_store_path(cli: &Cli, config: Option<&SignupConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.store.path)),
        None => Err(CliError::not_found(
            missing_config_message(&resolve_config_path()?),
            "Hint: Run `signup init`, or pass --store /path/to/store.db",
        )
        .into()),
    }
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config found at {}", config_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use signup_core::SignUpPolicy;

    #[test]
    fn test_store_flag_wins_over_config() {
        let cli = Cli::parse_from(["signup", "--store", "/tmp/flag.db", "list", "users"]);
        let config = SignupConfig::new(PathBuf::from("/tmp/config.db"), SignUpPolicy::default());

        let path = resolve_store_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_config_path_used_without_flag() {
        let cli = Cli::parse_from(["signup", "list", "users"]);
        if cli.store.is_some() {
            // SIGNUP_STORE is set in this environment
            return;
        }
        let config = SignupConfig::new(PathBuf::from("/tmp/config.db"), SignUpPolicy::default());

        let path = resolve_store_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/config.db"));
    }

    #[test]
    fn test_missing_config_message_names_path() {
        let message = missing_config_message(Path::new("/tmp/none.toml"));
        assert_eq!(message, "No config found at /tmp/none.toml");
    }
}
