use gameshelf_core::{Dlc, MediaService};

use crate::cli_types::DlcAction;
use crate::commands::{Session, apply_shared, log_lines, media_info, shared_edits};
use crate::display;
use crate::error::CliError;

/// Run a DLC command. Returns whether the catalog changed.
pub(crate) fn run_dlc(session: &mut Session, action: DlcAction) -> Result<bool, CliError> {
    match action {
        DlcAction::Add {
            title,
            base,
            fields,
            expansion,
        } => {
            let dlc = Dlc {
                info: media_info(title, fields),
                base_game_title: base,
                expansion,
            };
            let title = dlc.info.title.trim().to_string();
            let base = dlc.base_game_title.trim().to_string();
            if !session.ctx.dlc_service().add(dlc)? {
                return Err(CliError::duplicate(format!("a DLC titled '{title}'")));
            }
            log::info!("Added DLC '{title}'");
            if !base.is_empty() && !session.ctx.games().exists(&base) {
                log::warn!("Base game '{base}' is not in the catalog; the DLC was not linked");
            }
            Ok(true)
        }
        DlcAction::List => {
            let dlcs = session.ctx.dlcs().list();
            if dlcs.is_empty() {
                log::info!("No DLCs in the catalog.");
            }
            for dlc in &dlcs {
                log::info!("{}", display::dlc_summary(dlc));
            }
            Ok(false)
        }
        DlcAction::Show { title } => {
            let dlc = session
                .ctx
                .dlcs()
                .find(&title)
                .ok_or_else(|| CliError::not_found(format!("DLC '{title}'")))?;
            log_lines(&display::dlc_details(dlc));
            Ok(false)
        }
        DlcAction::Remove { title } => {
            if !session.ctx.dlc_service().remove(&title) {
                return Err(CliError::not_found(format!("DLC '{title}'")));
            }
            log::info!("Removed DLC '{title}'");
            Ok(true)
        }
        DlcAction::Edit { title, edits } => {
            if !session.ctx.dlcs().exists(&title) {
                return Err(CliError::not_found(format!("DLC '{title}'")));
            }
            let changes = shared_edits(session.ctx.rules(), edits)?;
            if changes.is_empty() {
                log::warn!("Nothing to change for '{title}'");
                return Ok(false);
            }
            let mut dlcs = session.ctx.dlc_service();
            for change in changes {
                apply_shared(&mut dlcs, &title, change)?;
            }
            if let Some(dlc) = dlcs.find(&title) {
                log_lines(&display::dlc_details(dlc));
            }
            Ok(true)
        }
        DlcAction::Dangling => {
            let dangling = session.ctx.dlc_service().dangling();
            if dangling.is_empty() {
                log::info!("Every DLC's base game is in the catalog.");
            }
            for dlc in &dangling {
                log::info!("{}", display::dlc_summary(dlc));
            }
            Ok(false)
        }
    }
}
