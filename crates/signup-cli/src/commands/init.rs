use std::path::PathBuf;

use signup_core::storage::SqliteBackend;
use signup_core::SignUpPolicy;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, SignupConfig};
use crate::errors::CliError;
use crate::ui::{badge, kv, print, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let config_path = resolve_config_path()?;

    if config_path.exists() && !args.force {
        return Err(CliError::Conflict(format!(
            "Config already exists at {}\nHint: Re-run with --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let store_path = match args.path.as_deref().or(ctx.cli().store.as_deref()) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => default_store_path()?,
    };

    let mut policy = SignUpPolicy::default();
    if let Some(collection) = args.users_collection.as_deref() {
        let collection = collection.trim();
        if collection.is_empty() || collection.contains('/') {
            return Err(CliError::invalid_input(format!(
                "Invalid users collection: {:?}",
                collection
            ))
            .into());
        }
        policy.collection = collection.to_string();
    }
    policy.key_by_email = args.key_by_email;

    // Opening creates the file and schema.
    SqliteBackend::open(&store_path)?;
    write_config(&config_path, &SignupConfig::new(store_path.clone(), policy))?;
    tracing::info!(
        config = %config_path.display(),
        store = %store_path.display(),
        "initialized signup store"
    );

    if ui.mode.is_json() {
        let output = serde_json::json!({
            "config": config_path,
            "store": store_path,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ctx.quiet() {
        print(
            &ui,
            &badge(&ui, Badge::Ok, "Initialized signup store"),
        );
        print(&ui, &kv(&ui, "Config", &config_path.display().to_string()));
        print(&ui, &kv(&ui, "Store", &store_path.display().to_string()));
    }
    Ok(())
}
