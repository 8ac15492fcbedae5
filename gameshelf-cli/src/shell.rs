//! Interactive numbered-menu front-end.
//!
//! Reads replies line by line from any `BufRead` and writes menus and results
//! to any `Write`, so the whole loop can be driven from a test. Validation
//! failures are printed and the menu continues; end of input exits the shell.

use std::io::{BufRead, Write};

use gameshelf_core::{Dlc, Game, MediaInfo, MediaKind, MediaService, User};

use crate::commands::{Session, SharedEdit, apply_shared};
use crate::display;
use crate::error::CliError;

const MAIN_MENU: &[&str] = &["Games", "DLCs", "Users", "Libraries", "Save now"];
const GAME_MENU: &[&str] = &["Add game", "List games", "Find game", "Edit game", "Remove game"];
const DLC_MENU: &[&str] = &[
    "Add DLC",
    "List DLCs",
    "Find DLC",
    "Edit DLC",
    "Remove DLC",
    "List DLCs without a base game",
];
const USER_MENU: &[&str] = &["Add user", "List users", "Find user", "Edit user", "Remove user"];
const LIBRARY_MENU: &[&str] = &[
    "Add to library",
    "List library",
    "Find in library",
    "Rate owned copy",
    "Remove from library",
];
const SHARED_EDIT_MENU: &[&str] = &["Year", "Price", "Rating", "Add genre", "Add platform"];
const GAME_EDIT_MENU: &[&str] = &[
    "Year",
    "Price",
    "Rating",
    "Add genre",
    "Add platform",
    "Replace genres",
    "Replace platforms",
    "Developer",
    "Multiplayer",
];

/// Run the shell until the user exits or input ends.
pub(crate) fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    save_on_exit: bool,
    input: R,
    output: W,
) -> Result<(), CliError> {
    let mut shell = Shell {
        session,
        input,
        out: output,
    };
    let exit_label = if save_on_exit { "Exit and save" } else { "Exit" };

    loop {
        let choice = match shell.choose("gameshelf", MAIN_MENU, exit_label) {
            Ok(choice) => choice,
            Err(CliError::InputClosed) => break,
            Err(e) => return Err(e),
        };
        let result = match choice {
            0 => break,
            1 => shell.games_menu(),
            2 => shell.dlcs_menu(),
            3 => shell.users_menu(),
            4 => shell.library_menu(),
            _ => shell.save(),
        };
        match result {
            Err(CliError::InputClosed) => break,
            other => shell.recover(other)?,
        }
    }

    if save_on_exit {
        shell.save()?;
    }
    writeln!(shell.out, "Bye!")?;
    Ok(())
}

struct Shell<'s, R, W> {
    session: &'s mut Session,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    // ── Prompts ─────────────────────────────────────────────────────────

    fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.out, "{prompt}: ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the reply. A blank reply gives `None`.
    fn ask_optional<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, CliError> {
        loop {
            let raw = self.ask(prompt)?;
            if raw.is_empty() {
                return Ok(None);
            }
            match parse(&raw) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.out, "Invalid value, try again.")?,
            }
        }
    }

    /// Ask until `parse` accepts a non-blank reply.
    fn ask_required<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, CliError> {
        loop {
            if let Some(value) = self.ask_optional(prompt, &parse)? {
                return Ok(value);
            }
        }
    }

    fn choose(&mut self, heading: &str, options: &[&str], exit_label: &str) -> Result<usize, CliError> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "== {heading} ==")?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.out, "{}. {}", i + 1, option)?;
            }
            writeln!(self.out, "0. {exit_label}")?;
            let raw = self.ask("Choose an option")?;
            match parse_choice(&raw, options.len()) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.out, "Invalid option.")?,
            }
        }
    }

    // ── Output ──────────────────────────────────────────────────────────

    fn say(&mut self, line: &str) -> Result<(), CliError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn say_all(&mut self, lines: &[String]) -> Result<(), CliError> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn outcome(&mut self, ok: bool, success: &str, failure: &str) -> Result<(), CliError> {
        self.say(if ok { success } else { failure })
    }

    /// Print a recoverable error. Closed input is passed through.
    fn recover(&mut self, result: Result<(), CliError>) -> Result<(), CliError> {
        match result {
            Ok(()) => Ok(()),
            Err(CliError::InputClosed) => Err(CliError::InputClosed),
            Err(e) => self.say(&format!("Error: {e}")),
        }
    }

    fn save(&mut self) -> Result<(), CliError> {
        self.session.save()?;
        let line = format!("Saved to {}", self.session.path.display());
        self.say(&line)
    }

    // ── Games ───────────────────────────────────────────────────────────

    fn games_menu(&mut self) -> Result<(), CliError> {
        loop {
            let result = match self.choose("Games", GAME_MENU, "Back")? {
                0 => return Ok(()),
                1 => self.add_game(),
                2 => {
                    let games = self.session.ctx.games().list();
                    let lines: Vec<String> = games.iter().map(display::game_summary).collect();
                    self.list(&lines, "No games in the catalog.")
                }
                3 => {
                    let title = self.ask("Title")?;
                    let details = self.session.ctx.games().find(&title).map(display::game_details);
                    self.details(details, "Game not found.")
                }
                4 => self.edit_game(),
                _ => {
                    let title = self.ask("Title")?;
                    let removed = self.session.ctx.game_service().remove(&title);
                    self.outcome(removed, "Game removed.", "Game not found.")
                }
            };
            self.recover(result)?;
        }
    }

    fn ask_media_info(&mut self) -> Result<MediaInfo, CliError> {
        let mut info = MediaInfo::new(self.ask("Title")?);
        info.release_year = self
            .ask_optional("Release year (blank if unknown)", parse_year)?
            .unwrap_or(0);
        info.price = self
            .ask_optional("Price (blank if free)", parse_decimal)?
            .unwrap_or(0.0);
        info.rating = self
            .ask_optional("Rating 0-10 (blank for none)", parse_decimal)?
            .unwrap_or(0.0);
        info.genres = parse_list(&self.ask("Genres (comma-separated)")?);
        info.platforms = parse_list(&self.ask("Platforms (comma-separated)")?);
        Ok(info)
    }

    fn add_game(&mut self) -> Result<(), CliError> {
        let info = self.ask_media_info()?;
        let developer = self.ask("Developer")?;
        let multiplayer = self
            .ask_optional("Multiplayer? (y/n)", parse_yes_no)?
            .unwrap_or(false);
        let game = Game {
            info,
            developer,
            multiplayer,
            dlc_titles: Vec::new(),
        };
        let stored = self.session.ctx.game_service().add(game)?;
        self.outcome(stored, "Game added.", "A game with that title already exists.")
    }

    fn edit_game(&mut self) -> Result<(), CliError> {
        let title = self.ask("Title")?;
        if !self.session.ctx.games().exists(&title) {
            return self.say("Game not found.");
        }
        loop {
            let choice = self.choose(&format!("Edit {title}"), GAME_EDIT_MENU, "Done")?;
            let result = match choice {
                0 => return Ok(()),
                1..=5 => self.edit_shared(MediaKind::Game, &title, choice),
                6 => {
                    let genres = parse_list(&self.ask("Genres (comma-separated)")?);
                    let ok = self.session.ctx.game_service().replace_genres(&title, &genres);
                    self.outcome(ok, "Genres replaced.", "Game not found.")
                }
                7 => {
                    let platforms = parse_list(&self.ask("Platforms (comma-separated)")?);
                    let ok = self
                        .session
                        .ctx
                        .game_service()
                        .replace_platforms(&title, &platforms);
                    self.outcome(ok, "Platforms replaced.", "Game not found.")
                }
                8 => {
                    let developer = self.ask("Developer")?;
                    let ok = self.session.ctx.game_service().edit_developer(&title, &developer);
                    self.outcome(ok, "Developer updated.", "Game not found.")
                }
                _ => {
                    let multiplayer = self.ask_required("Multiplayer? (y/n)", parse_yes_no)?;
                    let ok = self
                        .session
                        .ctx
                        .game_service()
                        .edit_multiplayer(&title, multiplayer);
                    self.outcome(ok, "Multiplayer updated.", "Game not found.")
                }
            };
            self.recover(result)?;
        }
    }

    /// Prompt for and apply one of the edits games and DLCs share.
    fn edit_shared(&mut self, kind: MediaKind, title: &str, choice: usize) -> Result<(), CliError> {
        let edit = match choice {
            1 => SharedEdit::Year(self.ask_required("Release year", parse_year)?),
            2 => SharedEdit::Price(self.ask_required("Price", parse_decimal)?),
            3 => SharedEdit::Rating(self.ask_required("Rating 0-10", parse_decimal)?),
            4 => SharedEdit::Genre(self.ask("Genre")?),
            _ => SharedEdit::Platform(self.ask("Platform")?),
        };
        let ok = match kind {
            MediaKind::Game => apply_shared(&mut self.session.ctx.game_service(), title, edit)?,
            MediaKind::Dlc => apply_shared(&mut self.session.ctx.dlc_service(), title, edit)?,
        };
        self.outcome(ok, "Updated.", "Nothing changed.")
    }

    // ── DLCs ────────────────────────────────────────────────────────────

    fn dlcs_menu(&mut self) -> Result<(), CliError> {
        loop {
            let result = match self.choose("DLCs", DLC_MENU, "Back")? {
                0 => return Ok(()),
                1 => self.add_dlc(),
                2 => {
                    let dlcs = self.session.ctx.dlcs().list();
                    let lines: Vec<String> = dlcs.iter().map(display::dlc_summary).collect();
                    self.list(&lines, "No DLCs in the catalog.")
                }
                3 => {
                    let title = self.ask("Title")?;
                    let details = self.session.ctx.dlcs().find(&title).map(display::dlc_details);
                    self.details(details, "DLC not found.")
                }
                4 => self.edit_dlc(),
                5 => {
                    let title = self.ask("Title")?;
                    let removed = self.session.ctx.dlc_service().remove(&title);
                    self.outcome(removed, "DLC removed.", "DLC not found.")
                }
                _ => {
                    let dangling = self.session.ctx.dlc_service().dangling();
                    let lines: Vec<String> = dangling.iter().map(display::dlc_summary).collect();
                    self.list(&lines, "Every DLC's base game is in the catalog.")
                }
            };
            self.recover(result)?;
        }
    }

    fn add_dlc(&mut self) -> Result<(), CliError> {
        let info = self.ask_media_info()?;
        let base_game_title = self.ask("Base game title")?;
        let expansion = self
            .ask_optional("Full expansion? (y/n)", parse_yes_no)?
            .unwrap_or(false);
        let dlc = Dlc {
            info,
            base_game_title,
            expansion,
        };
        let stored = self.session.ctx.dlc_service().add(dlc)?;
        self.outcome(stored, "DLC added.", "A DLC with that title already exists.")
    }

    fn edit_dlc(&mut self) -> Result<(), CliError> {
        let title = self.ask("Title")?;
        if !self.session.ctx.dlcs().exists(&title) {
            return self.say("DLC not found.");
        }
        loop {
            let choice = self.choose(&format!("Edit {title}"), SHARED_EDIT_MENU, "Done")?;
            if choice == 0 {
                return Ok(());
            }
            let result = self.edit_shared(MediaKind::Dlc, &title, choice);
            self.recover(result)?;
        }
    }

    // ── Users ───────────────────────────────────────────────────────────

    fn users_menu(&mut self) -> Result<(), CliError> {
        loop {
            let result = match self.choose("Users", USER_MENU, "Back")? {
                0 => return Ok(()),
                1 => {
                    let name = self.ask("Name")?;
                    let email = self.ask("Email")?;
                    let stored = self.session.ctx.user_service().add(User::new(name, email))?;
                    self.outcome(stored, "User added.", "That email is already registered.")
                }
                2 => {
                    let users = self.session.ctx.users().list();
                    let lines: Vec<String> = users.iter().map(display::user_summary).collect();
                    self.list(&lines, "No users registered.")
                }
                3 => {
                    let email = self.ask("Email")?;
                    let details = self.session.ctx.users().find(&email).map(display::user_details);
                    self.details(details, "User not found.")
                }
                4 => self.edit_user(),
                _ => {
                    let email = self.ask("Email")?;
                    let removed = self.session.ctx.user_service().remove(&email);
                    self.outcome(removed, "User removed.", "User not found.")
                }
            };
            self.recover(result)?;
        }
    }

    fn edit_user(&mut self) -> Result<(), CliError> {
        let email = self.ask("Current email")?;
        if !self.session.ctx.users().exists(&email) {
            return self.say("User not found.");
        }
        let name = self.ask("New name (blank to keep)")?;
        let new_email = self.ask("New email (blank to keep)")?;
        let ok = self
            .session
            .ctx
            .user_service()
            .edit(&email, Some(&name), Some(&new_email))?;
        self.outcome(ok, "User updated.", "That email is already registered.")
    }

    // ── Libraries ───────────────────────────────────────────────────────

    fn library_menu(&mut self) -> Result<(), CliError> {
        loop {
            let choice = self.choose("Libraries", LIBRARY_MENU, "Back")?;
            if choice == 0 {
                return Ok(());
            }
            let email = self.ask("User email")?;
            let result = if self.session.ctx.users().exists(&email) {
                self.library_action(choice, &email)
            } else {
                self.say("User not found.")
            };
            self.recover(result)?;
        }
    }

    fn library_action(&mut self, choice: usize, email: &str) -> Result<(), CliError> {
        match choice {
            1 => {
                let kind = self.ask_required("Type (game/dlc)", |raw| raw.parse::<MediaKind>().ok())?;
                let title = self.ask("Title")?;
                let acquired = self.session.ctx.user_service().acquire(email, kind, &title);
                self.outcome(
                    acquired,
                    "Added to library.",
                    "Not in the catalog, or already owned.",
                )
            }
            2 => {
                let library = self.session.ctx.user_service().list_library(email);
                let lines: Vec<String> = library.iter().map(display::media_summary).collect();
                self.list(&lines, "The library is empty.")
            }
            3 => {
                let title = self.ask("Title")?;
                let details = self
                    .session
                    .ctx
                    .users()
                    .find(email)
                    .and_then(|user| user.library_entry(&title))
                    .map(display::media_details);
                self.details(details, "Not in the library.")
            }
            4 => {
                let title = self.ask("Title")?;
                let rating = self.ask_optional("Rating 0-10 (blank to keep)", parse_decimal)?;
                let ok = self
                    .session
                    .ctx
                    .user_service()
                    .edit_library_media_rating(email, &title, rating);
                self.outcome(
                    ok,
                    "Rating updated.",
                    "Not in the library, or the rating is outside 0-10.",
                )
            }
            _ => {
                let title = self.ask("Title")?;
                let removed = self
                    .session
                    .ctx
                    .user_service()
                    .remove_media_from_library(email, &title);
                self.outcome(removed, "Removed from library.", "Not in the library.")
            }
        }
    }

    // ── Shared rendering ────────────────────────────────────────────────

    fn list(&mut self, lines: &[String], empty: &str) -> Result<(), CliError> {
        if lines.is_empty() {
            return self.say(empty);
        }
        self.say_all(lines)
    }

    fn details(&mut self, lines: Option<Vec<String>>, missing: &str) -> Result<(), CliError> {
        match lines {
            Some(lines) => self.say_all(&lines),
            None => self.say(missing),
        }
    }
}

// ── Reply parsing ───────────────────────────────────────────────────────

/// A menu choice between `0` and `max`.
fn parse_choice(raw: &str, max: usize) -> Option<usize> {
    raw.trim().parse().ok().filter(|choice| *choice <= max)
}

fn parse_year(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

/// A finite decimal, accepting a comma as the separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use gameshelf_core::CatalogContext;
    use gameshelf_store::Format;
    use tempfile::TempDir;

    use super::*;

    fn session(tmp: &TempDir) -> Session {
        Session {
            ctx: CatalogContext::new(),
            path: tmp.path().join("shelf.txt"),
            format: Format::Text,
            unreadable: false,
        }
    }

    fn run(session: &mut Session, save_on_exit: bool, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(session, save_on_exit, Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("0", 5), Some(0));
        assert_eq!(parse_choice(" 5 ", 5), Some(5));
        assert_eq!(parse_choice("6", 5), None);
        assert_eq!(parse_choice("-1", 5), None);
        assert_eq!(parse_choice("games", 5), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("9.99"), Some(9.99));
        assert_eq!(parse_decimal("9,99"), Some(9.99));
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("free"), None);
    }

    #[test]
    fn test_parse_yes_no_and_list() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_list(" RPG , ,Action"), vec!["RPG", "Action"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_add_game_and_exit_saves() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        // Games > Add: title, year, price, rating, genres, platforms, developer, multiplayer
        let script = "1\n1\nPortal 2\n2011\n9,99\n\nPuzzle\nPC\nValve\ny\n0\n0\n";
        let output = run(&mut session, true, script);

        assert!(output.contains("Game added."));
        assert!(output.contains("Saved to"));
        let game = session.ctx.games().find("portal 2").unwrap();
        assert_eq!(game.info.price, 9.99);
        assert!(game.multiplayer);

        let saved = std::fs::read_to_string(tmp.path().join("shelf.txt")).unwrap();
        assert!(saved.starts_with("GAME;Portal 2;2011;9.99;0;Valve;true;Puzzle;PC;"));
    }

    #[test]
    fn test_unreadable_file_is_moved_aside_before_exit_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shelf.json");
        let broken = r#"{"games": [{"title": "Hades"}], "users": [ BROKEN"#;
        std::fs::write(&path, broken).unwrap();

        let mut session = Session::open_or_empty(path.clone(), Format::Json);
        assert!(session.unreadable);
        assert!(session.ctx.is_empty());
        run(&mut session, true, "0\n");

        let kept = std::fs::read_to_string(tmp.path().join("shelf.json.bak")).unwrap();
        assert_eq!(kept, broken);
        assert!(path.exists());
        assert!(!session.unreadable);
    }

    #[test]
    fn test_unreadable_file_is_untouched_without_a_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shelf.txt");
        std::fs::write(&path, [0xff, 0xfe, b'G']).unwrap();

        let mut session = Session::open_or_empty(path.clone(), Format::Text);
        assert!(session.unreadable);
        run(&mut session, false, "0\n");

        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xfe, b'G']);
        assert!(!tmp.path().join("shelf.txt.bak").exists());
    }

    #[test]
    fn test_validation_error_is_reported_and_menu_continues() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        // Users > Add with a bad email, then a good one
        let script = "3\n1\nAda\nada@example.com\n1\nAda\nada@gmail.com\n0\n0\n";
        let output = run(&mut session, false, script);

        assert!(output.contains("Error: Invalid input"));
        assert!(output.contains("User added."));
        assert!(session.ctx.users().exists("ada@gmail.com"));
        assert!(!tmp.path().join("shelf.txt").exists());
    }

    #[test]
    fn test_invalid_numbers_are_asked_again() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        let script = "9\n1\n1\nCeleste\nsoon\n2018\n\n\n\n\n\n\n0\n0\n";
        let output = run(&mut session, false, script);

        assert!(output.contains("Invalid option."));
        assert!(output.contains("Invalid value, try again."));
        assert_eq!(
            session.ctx.games().find("Celeste").unwrap().info.release_year,
            2018
        );
    }

    #[test]
    fn test_library_flow() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        session.ctx.game_service().add(Game::new("Portal 2")).unwrap();
        session
            .ctx
            .user_service()
            .add(User::new("Chell", "chell@gmail.com"))
            .unwrap();

        // Libraries > Add, Rate out of range, Rate 7.5, Back, Exit
        let script = "4\n\
            1\nchell@gmail.com\ngame\nPortal 2\n\
            4\nchell@gmail.com\nPortal 2\n11\n\
            4\nchell@gmail.com\nPortal 2\n7.5\n\
            0\n0\n";
        let output = run(&mut session, false, script);

        assert!(output.contains("Added to library."));
        assert!(output.contains("Not in the library, or the rating is outside 0-10."));
        assert!(output.contains("Rating updated."));
        let owned = session
            .ctx
            .user_service()
            .find_library_media("chell@gmail.com", "Portal 2")
            .cloned()
            .unwrap();
        assert_eq!(owned.info().rating, 7.5);
    }

    #[test]
    fn test_end_of_input_exits_and_saves() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        session.ctx.game_service().add(Game::new("Tetris")).unwrap();

        let output = run(&mut session, true, "1\n");
        assert!(output.ends_with("Bye!\n"));
        assert!(tmp.path().join("shelf.txt").exists());
    }
}
