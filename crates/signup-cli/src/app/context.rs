//! Application context for the signup CLI.
//!
//! Bundles CLI arguments with a lazily-loaded config file.

use once_cell::unsync::OnceCell;

use signup_core::storage::SqliteBackend;
use signup_core::{CredentialHasher, DatabaseManager, SignUpPolicy, SignUpWorkflow};

use crate::cli::Cli;
use crate::config::{read_config, LoggingSection, SignupConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_store_path};

/// Application context that bundles CLI args with the config file.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<SignupConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded on first use.
    pub fn config(&self) -> anyhow::Result<Option<&SignupConfig>> {
        let loaded = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                read_config(&path).map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(loaded.as_ref())
    }

    /// Logging settings from config, or defaults when no config is readable.
    pub fn logging(&self) -> LoggingSection {
        match self.config() {
            Ok(Some(config)) => config.logging.clone(),
            _ => LoggingSection::default(),
        }
    }

    /// Sign-up policy from config, or defaults.
    pub fn policy(&self) -> anyhow::Result<SignUpPolicy> {
        Ok(self
            .config()?
            .map(|config| config.signup.clone())
            .unwrap_or_default())
    }

    /// Build a UI context from CLI flags and the environment.
    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(self.cli.json, self.cli.no_color)
    }

    /// Open the document store and wrap it in a manager.
    pub fn open_manager(&self) -> anyhow::Result<DatabaseManager<SqliteBackend>> {
        let config = self.config()?;
        let path = resolve_store_path(self.cli, config)?;
        let backend = SqliteBackend::open(&path)?;
        Ok(DatabaseManager::new(backend))
    }

    /// Open the store and build the sign-up workflow with the configured policy.
    pub fn open_workflow(&self) -> anyhow::Result<SignUpWorkflow<SqliteBackend>> {
        let manager = self.open_manager()?;
        Ok(SignUpWorkflow::new(
            manager,
            self.policy()?,
            CredentialHasher::new()?,
        ))
    }
}
