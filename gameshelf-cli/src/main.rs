//! gameshelf CLI
//!
//! Command-line and interactive front-end for the game catalog.

mod cli_types;
mod commands;
mod display;
mod error;
mod shell;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_store::Format;
use gameshelf_store::settings;

use crate::cli_types::{Cli, Commands};
use crate::commands::Session;
pub(crate) use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings::load_settings();
    let (data_path, data_source) = settings::resolve_data_path(cli.data, &settings);
    let format = settings::resolve_format(cli.format, &settings, &data_path);

    match cli.command {
        Commands::Config { action } => commands::config::run_config(
            action,
            settings,
            &data_path,
            data_source,
            format,
            cli.format,
        ),
        Commands::Shell => {
            let mut session = Session::open_or_empty(data_path, format);
            let stdin = io::stdin();
            shell::run_shell(
                &mut session,
                settings.general.save_on_exit,
                stdin.lock(),
                io::stdout(),
            )
        }
        Commands::Game { action } => one_shot(data_path, format, |s| {
            commands::game::run_game(s, action)
        }),
        Commands::Dlc { action } => one_shot(data_path, format, |s| {
            commands::dlc::run_dlc(s, action)
        }),
        Commands::User { action } => one_shot(data_path, format, |s| {
            commands::user::run_user(s, action)
        }),
        Commands::Library { action } => one_shot(data_path, format, |s| {
            commands::library::run_library(s, action)
        }),
    }
}

/// Load, run one command, and save if it changed anything.
fn one_shot(
    path: PathBuf,
    format: Format,
    command: impl FnOnce(&mut Session) -> Result<bool, CliError>,
) -> Result<(), CliError> {
    let mut session = Session::open(path, format)?;
    if command(&mut session)? {
        session.save()?;
    }
    Ok(())
}

/// Info lines print bare; warnings and errors get a coloured prefix.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            level => writeln!(buf, "[{} {}] {}", level, record.target(), record.args()),
        })
        .init();
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
