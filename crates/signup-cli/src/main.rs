//! Signup CLI - user registration and document store tooling
//!
//! Command-line front end for the signup core library: registers users
//! and reads or edits documents in the local store.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{documents, init, login, misc, register};
use crate::errors::exit_code_for;
use crate::logging::init_logging;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    init_logging(&ctx.logging());

    match run(&ctx, &cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let ui_ctx = ctx.ui_context();

            let error_msg = format!("{}", e);
            let (message, hint) = split_hint(&error_msg);

            print_error(&ui_ctx, message, hint);
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Split a trailing "Hint: ..." line off an error message.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => (error, None),
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::handle_init(ctx, args)?,
        Commands::Register(args) => return register::handle_register(ctx, args),
        Commands::Login(args) => return login::handle_login(ctx, args),
        Commands::Add(args) => documents::handle_add(ctx, args)?,
        Commands::Get(args) => documents::handle_get(ctx, args)?,
        Commands::List { collection } => documents::handle_list(ctx, collection)?,
        Commands::Query(args) => documents::handle_query(ctx, args)?,
        Commands::Update(args) => documents::handle_update(ctx, args)?,
        Commands::Delete(args) => documents::handle_delete(ctx, args)?,
        Commands::Completions { shell } => misc::handle_completions(*shell)?,
    }
    Ok(0)
}
