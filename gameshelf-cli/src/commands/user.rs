use gameshelf_core::User;

use crate::cli_types::UserAction;
use crate::commands::{Session, log_lines};
use crate::display;
use crate::error::CliError;

/// Run a user command. Returns whether the catalog changed.
pub(crate) fn run_user(session: &mut Session, action: UserAction) -> Result<bool, CliError> {
    match action {
        UserAction::Add { name, email } => {
            let user = User::new(name, email);
            let email = user.email.trim().to_string();
            if !session.ctx.user_service().add(user)? {
                return Err(CliError::duplicate(format!("a user with email {email}")));
            }
            log::info!("Registered {email}");
            Ok(true)
        }
        UserAction::List => {
            let users = session.ctx.users().list();
            if users.is_empty() {
                log::info!("No users registered.");
            }
            for user in &users {
                log::info!("{}", display::user_summary(user));
            }
            Ok(false)
        }
        UserAction::Show { email } => {
            let user = session
                .ctx
                .users()
                .find(&email)
                .ok_or_else(|| CliError::not_found(format!("user {email}")))?;
            log_lines(&display::user_details(user));
            Ok(false)
        }
        UserAction::Remove { email } => {
            if !session.ctx.user_service().remove(&email) {
                return Err(CliError::not_found(format!("user {email}")));
            }
            log::info!("Removed {email}");
            Ok(true)
        }
        UserAction::Edit {
            email,
            name,
            new_email,
        } => {
            if !session.ctx.users().exists(&email) {
                return Err(CliError::not_found(format!("user {email}")));
            }
            if !session
                .ctx
                .user_service()
                .edit(&email, name.as_deref(), new_email.as_deref())?
            {
                let taken = new_email.unwrap_or_default();
                return Err(CliError::duplicate(format!(
                    "a user with email {}",
                    taken.trim()
                )));
            }
            log::info!("Updated {email}");
            Ok(true)
        }
    }
}
