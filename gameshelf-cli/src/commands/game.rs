use gameshelf_core::{Game, MediaService};

use crate::cli_types::{GameAction, MediaEdits};
use crate::commands::{Session, apply_shared, log_lines, media_info, shared_edits};
use crate::display;
use crate::error::CliError;

/// Run a game command. Returns whether the catalog changed.
pub(crate) fn run_game(session: &mut Session, action: GameAction) -> Result<bool, CliError> {
    match action {
        GameAction::Add {
            title,
            fields,
            developer,
            multiplayer,
        } => {
            let game = Game {
                info: media_info(title, fields),
                developer: developer.unwrap_or_default(),
                multiplayer,
                dlc_titles: Vec::new(),
            };
            let title = game.info.title.trim().to_string();
            if !session.ctx.game_service().add(game)? {
                return Err(CliError::duplicate(format!("a game titled '{title}'")));
            }
            log::info!("Added game '{title}'");
            Ok(true)
        }
        GameAction::List => {
            let games = session.ctx.games().list();
            if games.is_empty() {
                log::info!("No games in the catalog.");
            }
            for game in &games {
                log::info!("{}", display::game_summary(game));
            }
            Ok(false)
        }
        GameAction::Show { title } => {
            let game = session
                .ctx
                .games()
                .find(&title)
                .ok_or_else(|| CliError::not_found(format!("game '{title}'")))?;
            log_lines(&display::game_details(game));
            Ok(false)
        }
        GameAction::Remove { title } => {
            if !session.ctx.game_service().remove(&title) {
                return Err(CliError::not_found(format!("game '{title}'")));
            }
            log::info!("Removed game '{title}'");
            Ok(true)
        }
        GameAction::Edit {
            title,
            edits,
            developer,
            multiplayer,
            genres,
            platforms,
        } => edit_game(session, &title, edits, developer, multiplayer, genres, platforms),
    }
}

fn edit_game(
    session: &mut Session,
    title: &str,
    edits: MediaEdits,
    developer: Option<String>,
    multiplayer: Option<bool>,
    genres: Option<Vec<String>>,
    platforms: Option<Vec<String>>,
) -> Result<bool, CliError> {
    if !session.ctx.games().exists(title) {
        return Err(CliError::not_found(format!("game '{title}'")));
    }
    let changes = shared_edits(session.ctx.rules(), edits)?;
    let nothing_else =
        developer.is_none() && multiplayer.is_none() && genres.is_none() && platforms.is_none();
    if changes.is_empty() && nothing_else {
        log::warn!("Nothing to change for '{title}'");
        return Ok(false);
    }

    let mut games = session.ctx.game_service();
    if let Some(genres) = genres {
        games.replace_genres(title, &genres);
    }
    if let Some(platforms) = platforms {
        games.replace_platforms(title, &platforms);
    }
    for change in changes {
        apply_shared(&mut games, title, change)?;
    }
    if let Some(developer) = developer {
        games.edit_developer(title, &developer);
    }
    if let Some(multiplayer) = multiplayer {
        games.edit_multiplayer(title, multiplayer);
    }

    if let Some(game) = games.find(title) {
        log_lines(&display::game_details(game));
    }
    Ok(true)
}
