use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_store::settings::{self, AppSettings};
use gameshelf_store::{DataSource, Format};

use crate::cli_types::ConfigAction;
use crate::error::CliError;

pub(crate) fn run_config(
    action: ConfigAction,
    settings: AppSettings,
    data_path: &Path,
    data_source: DataSource,
    format: Format,
    format_override: Option<Format>,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            run_config_show(&settings, data_path, data_source, format);
            Ok(())
        }
        ConfigAction::Path => {
            log::info!("{}", settings::settings_path().display());
            Ok(())
        }
        ConfigAction::SetData { path } => run_config_set_data(settings, path, format_override),
    }
}

/// Show current settings and the values they resolve to.
fn run_config_show(
    settings: &AppSettings,
    data_path: &Path,
    source: DataSource,
    format: Format,
) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "gameshelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let saved_file = settings
        .data
        .file
        .as_ref()
        .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string());
    let saved_format = settings
        .data
        .format
        .map_or_else(|| "(from extension)".to_string(), |f| f.to_string());
    log::info!("  data.file:            {saved_file}");
    log::info!("  data.format:          {saved_format}");
    log::info!("  general.save_on_exit: {}", settings.general.save_on_exit);
    crate::log_blank();

    log::info!(
        "  Data file in use: {} (from {}) [{}]",
        data_path.display().if_supports_color(Stdout, |t| t.cyan()),
        source,
        format,
    );
}

fn run_config_set_data(
    mut settings: AppSettings,
    path: PathBuf,
    format: Option<Format>,
) -> Result<(), CliError> {
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    settings.data.file = Some(path.clone());
    if format.is_some() {
        settings.data.format = format;
    }
    settings::save_settings(&settings)
        .map_err(|e| CliError::config(format!("Failed to save settings: {e}")))?;
    log::info!(
        "{} Data file set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
