//! Pretty-printed JSON format.
//!
//! The document is an object with `games`, `dlcs` and `users` arrays. Each
//! element, including every entry of a user's library, is decoded on its own
//! so one bad element does not discard the rest of the file. Elements that
//! fail the checks the services apply on insert are skipped too.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use gameshelf_core::{Dlc, Game, Media, Snapshot, User, ValidationRules, validate};

use crate::error::StoreError;
use crate::gateway::{SnapshotStore, check_user, push_checked};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

/// A user whose library has not been decoded yet.
#[derive(Deserialize)]
struct RawUser {
    name: String,
    email: String,
    #[serde(default)]
    library: Vec<Value>,
}

impl SnapshotStore for JsonStore {
    fn encode(&self, snapshot: &Snapshot) -> Result<String, StoreError> {
        let mut contents = serde_json::to_string_pretty(snapshot)?;
        contents.push('\n');
        Ok(contents)
    }

    fn decode(&self, contents: &str) -> Result<Snapshot, StoreError> {
        let doc: Value = serde_json::from_str(contents)?;
        let Value::Object(mut root) = doc else {
            return Err(StoreError::malformed("top-level JSON value is not an object"));
        };

        let rules = ValidationRules::default();
        let mut snapshot = Snapshot::default();
        for game in decode_each::<Game>(root.remove("games"), "game") {
            push_checked(&mut snapshot.games, game, "game", |g| {
                validate::media_info(&mut g.info, rules)
            });
        }
        for dlc in decode_each::<Dlc>(root.remove("dlcs"), "DLC") {
            push_checked(&mut snapshot.dlcs, dlc, "DLC", |d| {
                validate::media_info(&mut d.info, rules)
            });
        }
        for raw in decode_each::<RawUser>(root.remove("users"), "user") {
            let mut user = User::new(raw.name, raw.email);
            for mut media in decode_each::<Media>(Some(Value::Array(raw.library)), "library entry") {
                if let Err(e) = validate::media_info(media.info_mut(), rules) {
                    log::warn!(
                        "Skipping library entry '{}' for {}: {e}",
                        media.title(),
                        user.email
                    );
                    continue;
                }
                if user.owns(media.title()) {
                    log::warn!(
                        "Skipping duplicate library entry '{}' for {}",
                        media.title(),
                        user.email
                    );
                    continue;
                }
                user.library.push(media);
            }
            push_checked(&mut snapshot.users, user, "user", check_user);
        }
        Ok(snapshot)
    }
}

/// Decode every element of an optional array, warning about the ones that fail.
fn decode_each<T: DeserializeOwned>(value: Option<Value>, what: &str) -> Vec<T> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            log::warn!("Skipping {what} list: expected an array");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("Skipping malformed {what} #{}: {e}", index + 1);
                None
            }
        })
        .collect()
}
