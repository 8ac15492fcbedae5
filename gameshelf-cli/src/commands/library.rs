use gameshelf_core::validate;

use crate::cli_types::LibraryAction;
use crate::commands::{Session, log_lines};
use crate::display;
use crate::error::CliError;

/// Run a library command. Returns whether the catalog changed.
pub(crate) fn run_library(session: &mut Session, action: LibraryAction) -> Result<bool, CliError> {
    match action {
        LibraryAction::Add { email, title, kind } => {
            let Some(user) = session.ctx.users().find(&email) else {
                return Err(CliError::not_found(format!("user {email}")));
            };
            if user.owns(&title) {
                return Err(CliError::duplicate(format!("'{title}' in {email}'s library")));
            }
            if !session.ctx.user_service().acquire(&email, kind, &title) {
                return Err(CliError::not_found(format!("{kind} '{title}'")));
            }
            log::info!("Added {kind} '{title}' to {email}'s library");
            Ok(true)
        }
        LibraryAction::List { email } => {
            if !session.ctx.users().exists(&email) {
                return Err(CliError::not_found(format!("user {email}")));
            }
            let library = session.ctx.user_service().list_library(&email);
            if library.is_empty() {
                log::info!("{email}'s library is empty.");
            }
            for media in &library {
                log::info!("{}", display::media_summary(media));
            }
            Ok(false)
        }
        LibraryAction::Show { email, title } => {
            let media = session
                .ctx
                .users()
                .find(&email)
                .and_then(|user| user.library_entry(&title))
                .ok_or_else(|| CliError::not_found(format!("'{title}' in {email}'s library")))?;
            log_lines(&display::media_details(media));
            Ok(false)
        }
        LibraryAction::Remove { email, title } => {
            if !session
                .ctx
                .user_service()
                .remove_media_from_library(&email, &title)
            {
                return Err(CliError::not_found(format!("'{title}' in {email}'s library")));
            }
            log::info!("Removed '{title}' from {email}'s library");
            Ok(true)
        }
        LibraryAction::Rate {
            email,
            title,
            rating,
        } => {
            let rating = validate::rating(rating)?;
            if !session
                .ctx
                .user_service()
                .edit_library_media_rating(&email, &title, Some(rating))
            {
                return Err(CliError::not_found(format!("'{title}' in {email}'s library")));
            }
            log::info!("Rated '{title}' {rating:.1} for {email}");
            Ok(true)
        }
    }
}
