//! Loading and saving the whole catalog.
//!
//! A [`SnapshotStore`] turns a [`Snapshot`] into file contents and back.
//! [`load_into`] and [`save_from`] wire a store to a [`CatalogContext`] with
//! the startup and shutdown behavior the front-ends rely on.

use std::fs;
use std::path::Path;

use gameshelf_core::{CatalogContext, Keyed, Snapshot, User, ValidationError, validate};

use crate::error::StoreError;
use crate::format::Format;

/// Encodes and decodes a full catalog snapshot.
///
/// Decoders skip malformed records, and records the services would refuse to
/// add, with a warning. They only fail when the input as a whole is unusable.
pub trait SnapshotStore {
    fn encode(&self, snapshot: &Snapshot) -> Result<String, StoreError>;

    fn decode(&self, contents: &str) -> Result<Snapshot, StoreError>;

    /// Write `snapshot` to `path`, replacing any previous file atomically.
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<(), StoreError> {
        let contents = self.encode(snapshot)?;
        write_atomic(path, &contents)
    }

    fn load(&self, path: &Path) -> Result<Snapshot, StoreError> {
        let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        self.decode(&contents)
    }
}

/// Populate `ctx` from `path`.
///
/// A missing file is not an error: the context stays empty and this returns
/// `Ok(false)`. Any other failure is logged and returned, leaving the
/// context untouched.
pub fn load_into(ctx: &mut CatalogContext, path: &Path, format: Format) -> Result<bool, StoreError> {
    if !path.exists() {
        log::info!(
            "No data file at {}, starting with an empty catalog",
            path.display()
        );
        return Ok(false);
    }

    match format.store().load(path) {
        Ok(snapshot) => {
            log::debug!(
                "Loaded {} games, {} DLCs and {} users from {}",
                snapshot.games.len(),
                snapshot.dlcs.len(),
                snapshot.users.len(),
                path.display()
            );
            ctx.restore(snapshot);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Write the full contents of `ctx` to `path`.
pub fn save_from(ctx: &CatalogContext, path: &Path, format: Format) -> Result<(), StoreError> {
    format.store().save(&ctx.snapshot(), path)?;
    log::debug!("Saved catalog to {} ({})", path.display(), format);
    Ok(())
}

/// Write to a sibling temp file, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Push `item` unless an item with the same key was already decoded.
pub(crate) fn push_unique<T: Keyed>(items: &mut Vec<T>, item: T, what: &str) {
    if item.key().trim().is_empty() {
        log::warn!("Skipping {what} with a blank key");
        return;
    }
    if items
        .iter()
        .any(|existing| gameshelf_core::same_key(existing.key(), item.key()))
    {
        log::warn!("Skipping duplicate {what} '{}'", item.key());
        return;
    }
    items.push(item);
}

/// Run `check` on `item` and push it only if it passes.
pub(crate) fn push_checked<T, F>(items: &mut Vec<T>, mut item: T, what: &str, check: F)
where
    T: Keyed,
    F: FnOnce(&mut T) -> Result<(), ValidationError>,
{
    if let Err(e) = check(&mut item) {
        log::warn!("Skipping {what} '{}': {e}", item.key());
        return;
    }
    push_unique(items, item, what);
}

/// The checks a user must pass on insert, applied to a decoded one.
pub(crate) fn check_user(user: &mut User) -> Result<(), ValidationError> {
    let name = validate::user_name(&user.name)?;
    let email = validate::email(&user.email)?;
    user.name = name;
    user.email = email;
    Ok(())
}
