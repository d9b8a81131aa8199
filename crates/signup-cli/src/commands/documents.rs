//! Handlers for the document commands: add, get, list, query, update, delete.

use std::str::FromStr;

use signup_core::storage::FilterOp;

use crate::app::AppContext;
use crate::cli::{AddArgs, DocumentRef, QueryArgs, UpdateArgs};
use crate::errors::CliError;
use crate::helpers::{collect_fields, parse_value};
use crate::output::{document_json, documents_json, print_document, print_document_list};
use crate::ui::{badge, print, Badge};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let fields = collect_fields(&args.data)?;
    let db = ctx.open_manager()?;

    let id = db.add_document(&args.collection, fields)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::json!({ "id": id }));
    } else if ctx.quiet() || !ui.mode.is_pretty() {
        print(&ui, &id);
    } else {
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Added {} to {}", id, args.collection)),
        );
    }
    Ok(())
}

pub fn handle_get(ctx: &AppContext, args: &DocumentRef) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let db = ctx.open_manager()?;

    let doc = db.get_document(&args.collection, &args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Document {} not found in {}", args.id, args.collection),
            format!(
                "Hint: Run `signup list {}` to see document IDs.",
                args.collection
            ),
        )
    })?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&document_json(&doc))?);
    } else {
        print_document(&ui, &doc);
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, collection: &str) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let db = ctx.open_manager()?;

    let docs = db.fetch_collection(collection)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&documents_json(&docs))?);
    } else {
        print_document_list(&ui, &docs, ctx.quiet());
    }
    Ok(())
}

pub fn handle_query(ctx: &AppContext, args: &QueryArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let op = FilterOp::from_str(&args.op)?;
    let value = parse_value(&args.value);
    let db = ctx.open_manager()?;

    let docs = db.query_collection(&args.collection, &args.field, op, value)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&documents_json(&docs))?);
    } else {
        print_document_list(&ui, &docs, ctx.quiet());
    }
    Ok(())
}

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let fields = collect_fields(&args.data)?;
    let db = ctx.open_manager()?;

    db.update_document(&args.collection, &args.id, fields)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::json!({ "id": args.id, "updated": true }));
    } else if !ctx.quiet() {
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Updated {} in {}", args.id, args.collection)),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DocumentRef) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let db = ctx.open_manager()?;

    db.delete_document(&args.collection, &args.id)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::json!({ "id": args.id, "deleted": true }));
    } else if !ctx.quiet() {
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Deleted {} from {}", args.id, args.collection)),
        );
    }
    Ok(())
}
