use signup_core::{SignInOutcome, SignInStatus};

use crate::app::AppContext;
use crate::cli::LoginArgs;
use crate::constants::exit_codes;
use crate::helpers::read_password;
use crate::ui::{badge, kv, print, print_error, Badge};

/// Exit code reported for a sign-in outcome.
pub fn status_exit_code(status: SignInStatus) -> i32 {
    match status {
        SignInStatus::SignedIn => 0,
        SignInStatus::MissingFields => exit_codes::INVALID_INPUT,
        SignInStatus::InvalidCredentials => exit_codes::AUTH_FAILED,
        SignInStatus::LookupFailed => exit_codes::FAILURE,
    }
}

/// Check credentials and report the result. Returns the process exit code.
pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<i32> {
    let ui = ctx.ui_context();
    let password = read_password(args.password.as_deref(), args.no_input, false)?;

    let outcome = if args.email.is_empty() || password.is_empty() {
        SignInOutcome::rejected(SignInStatus::MissingFields)
    } else {
        ctx.open_workflow()?.sign_in(&args.email, &password)
    };

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if !outcome.success {
        print_error(&ui, &outcome.message, None);
    } else if ctx.quiet() {
        if let Some(id) = outcome.user_id.as_deref() {
            print(&ui, id);
        }
    } else {
        print(&ui, &badge(&ui, Badge::Ok, &outcome.message));
        if let Some(id) = outcome.user_id.as_deref() {
            print(&ui, &kv(&ui, "User ID", id));
        }
    }

    Ok(status_exit_code(outcome.status))
}
