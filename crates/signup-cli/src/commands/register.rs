use signup_core::{check_sign_up_input, SignUpOutcome, SignUpStatus};

use crate::app::AppContext;
use crate::cli::RegisterArgs;
use crate::constants::exit_codes;
use crate::helpers::read_password;
use crate::ui::{badge, kv, print, print_error, Badge, UiContext};

/// Exit code reported for a sign-up outcome.
pub fn status_exit_code(status: SignUpStatus) -> i32 {
    match status {
        SignUpStatus::Registered => 0,
        SignUpStatus::MissingFields | SignUpStatus::InvalidEmail => exit_codes::INVALID_INPUT,
        SignUpStatus::EmailTaken => exit_codes::CONFLICT,
        SignUpStatus::LookupFailed | SignUpStatus::WriteFailed => exit_codes::FAILURE,
    }
}

/// Run a sign-up and report it. Returns the process exit code.
///
/// Input checks run before the store is opened, so a rejected form never
/// depends on config or store state.
pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<i32> {
    let ui = ctx.ui_context();
    let password = read_password(args.password.as_deref(), args.no_input, true)?;

    let outcome = match check_sign_up_input(&args.username, &args.email, &password) {
        Err(status) => SignUpOutcome::rejected(status),
        Ok(()) => ctx
            .open_workflow()?
            .sign_up(&args.username, &args.email, &password),
    };

    report(ctx, &ui, &outcome)?;
    Ok(status_exit_code(outcome.status))
}

fn report(ctx: &AppContext, ui: &UiContext, outcome: &SignUpOutcome) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else if !outcome.success {
        print_error(ui, &outcome.message, None);
    } else if ctx.quiet() {
        if let Some(id) = outcome.user_id.as_deref() {
            print(ui, id);
        }
    } else {
        print(ui, &badge(ui, Badge::Ok, &outcome.message));
        if let Some(id) = outcome.user_id.as_deref() {
            print(ui, &kv(ui, "User ID", id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_exit_codes() {
        assert_eq!(status_exit_code(SignUpStatus::Registered), 0);
        assert_eq!(status_exit_code(SignUpStatus::MissingFields), 4);
        assert_eq!(status_exit_code(SignUpStatus::InvalidEmail), 4);
        assert_eq!(status_exit_code(SignUpStatus::EmailTaken), 6);
        assert_eq!(status_exit_code(SignUpStatus::LookupFailed), 1);
        assert_eq!(status_exit_code(SignUpStatus::WriteFailed), 1);
    }
}
