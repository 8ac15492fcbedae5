pub(crate) mod config;
pub(crate) mod dlc;
pub(crate) mod game;
pub(crate) mod library;
pub(crate) mod user;

use std::fs;
use std::path::{Path, PathBuf};

use gameshelf_core::validate::{self, ValidationRules};
use gameshelf_core::{CatalogContext, MediaInfo, MediaService, ValidationError};
use gameshelf_store::{Format, load_into, save_from};

use crate::cli_types::{MediaEdits, MediaFields};
use crate::error::CliError;

/// A loaded catalog together with where it came from.
pub(crate) struct Session {
    pub(crate) ctx: CatalogContext,
    pub(crate) path: PathBuf,
    pub(crate) format: Format,
    /// The file at `path` exists but could not be loaded.
    pub(crate) unreadable: bool,
}

impl Session {
    /// Load the catalog, failing if an existing file cannot be read.
    pub(crate) fn open(path: PathBuf, format: Format) -> Result<Self, CliError> {
        let mut ctx = CatalogContext::new();
        load_into(&mut ctx, &path, format)?;
        Ok(Self {
            ctx,
            path,
            format,
            unreadable: false,
        })
    }

    /// Load the catalog, starting empty if the file cannot be read.
    ///
    /// An unreadable file is moved aside on the first save instead of being
    /// overwritten.
    pub(crate) fn open_or_empty(path: PathBuf, format: Format) -> Self {
        let mut ctx = CatalogContext::new();
        let unreadable = load_into(&mut ctx, &path, format).is_err();
        if unreadable {
            log::warn!(
                "Starting with an empty catalog; {} will be kept as {} when saving",
                path.display(),
                backup_path(&path).display()
            );
        }
        Self {
            ctx,
            path,
            format,
            unreadable,
        }
    }

    pub(crate) fn save(&mut self) -> Result<(), CliError> {
        if self.unreadable && self.path.exists() {
            let backup = backup_path(&self.path);
            fs::rename(&self.path, &backup)?;
            log::warn!(
                "Moved unreadable {} to {}",
                self.path.display(),
                backup.display()
            );
        }
        self.unreadable = false;
        save_from(&self.ctx, &self.path, self.format)?;
        Ok(())
    }
}

/// `shelf.json` becomes `shelf.json.bak`.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// A single change to the fields games and DLCs share.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SharedEdit {
    Year(u16),
    Price(f64),
    Rating(f64),
    Genre(String),
    Platform(String),
}

/// Apply one shared edit. `Ok(false)` means the title is unknown or the value was blank.
pub(crate) fn apply_shared<S: MediaService>(
    service: &mut S,
    title: &str,
    edit: SharedEdit,
) -> Result<bool, ValidationError> {
    match edit {
        SharedEdit::Year(year) => service.edit_year(title, year),
        SharedEdit::Price(price) => service.edit_price(title, price),
        SharedEdit::Rating(rating) => service.edit_rating(title, rating),
        SharedEdit::Genre(genre) => Ok(service.add_genre(title, &genre)),
        SharedEdit::Platform(platform) => Ok(service.add_platform(title, &platform)),
    }
}

/// Flatten command-line edits, validating every value before any is applied.
pub(crate) fn shared_edits(
    rules: ValidationRules,
    edits: MediaEdits,
) -> Result<Vec<SharedEdit>, ValidationError> {
    let mut out = Vec::new();
    if let Some(year) = edits.year {
        out.push(SharedEdit::Year(rules.release_year(year)?));
    }
    if let Some(price) = edits.price {
        out.push(SharedEdit::Price(validate::price(price)?));
    }
    if let Some(rating) = edits.rating {
        out.push(SharedEdit::Rating(validate::rating(rating)?));
    }
    out.extend(edits.add_genres.into_iter().map(SharedEdit::Genre));
    out.extend(edits.add_platforms.into_iter().map(SharedEdit::Platform));
    Ok(out)
}

pub(crate) fn media_info(title: String, fields: MediaFields) -> MediaInfo {
    let mut info = MediaInfo::new(title);
    info.release_year = fields.year.unwrap_or(0);
    info.price = fields.price.unwrap_or(0.0);
    info.rating = fields.rating.unwrap_or(0.0);
    info.genres = fields.genres;
    info.platforms = fields.platforms;
    info
}

/// Log each line at info level.
pub(crate) fn log_lines(lines: &[String]) {
    for line in lines {
        log::info!("{line}");
    }
}
