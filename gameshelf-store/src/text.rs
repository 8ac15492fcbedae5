//! `;`-delimited text format, one record per line.
//!
//! ```text
//! GAME;title;year;price;rating;developer;multiplayer;genres;platforms;dlc_titles
//! DLC;title;year;price;rating;base_title;expansion;genres;platforms
//! USER;name;email
//! LIBRARY;email;title;rating;year;price;type
//! ```
//!
//! Lists are comma-joined, with CSV quoting for entries that contain a comma.
//! Library rows only carry the per-copy fields; the rest is recovered from
//! the catalog entry with the same title.
//!
//! Records that fail the same checks the services apply on insert are
//! skipped. Release years are checked against the current year.

use csv::StringRecord;
use gameshelf_core::{Dlc, Game, Media, MediaKind, Snapshot, User, ValidationRules, same_key, validate};

use crate::error::StoreError;
use crate::gateway::{SnapshotStore, check_user, push_checked};

const DELIMITER: u8 = b';';
const LIST_DELIMITER: u8 = b',';

const GAME_TAG: &str = "GAME";
const DLC_TAG: &str = "DLC";
const USER_TAG: &str = "USER";
const LIBRARY_TAG: &str = "LIBRARY";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextStore;

impl SnapshotStore for TextStore {
    fn encode(&self, snapshot: &Snapshot) -> Result<String, StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());

        for game in &snapshot.games {
            writer.write_record(game_record(game)?)?;
        }
        for dlc in &snapshot.dlcs {
            writer.write_record(dlc_record(dlc)?)?;
        }
        for user in &snapshot.users {
            writer.write_record([USER_TAG, user.name.as_str(), user.email.as_str()])?;
            for media in &user.library {
                writer.write_record(library_record(&user.email, media))?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| StoreError::Csv(e.into_error().into()))?;
        String::from_utf8(bytes).map_err(|e| StoreError::malformed(e.to_string()))
    }

    fn decode(&self, contents: &str) -> Result<Snapshot, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(contents.as_bytes());

        let mut decoder = Decoder::default();
        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Skipping malformed record: {e}");
                    continue;
                }
            };
            let line = record.position().map_or(0, |p| p.line());
            if let Err(e) = decoder.accept(&record) {
                log::warn!("Skipping line {line}: {e}");
            }
        }
        Ok(decoder.finish())
    }
}

// ── Encoding ────────────────────────────────────────────────────────────

fn game_record(game: &Game) -> Result<[String; 10], StoreError> {
    Ok([
        GAME_TAG.to_string(),
        game.info.title.clone(),
        game.info.release_year.to_string(),
        game.info.price.to_string(),
        game.info.rating.to_string(),
        game.developer.clone(),
        game.multiplayer.to_string(),
        join_list(&game.info.genres)?,
        join_list(&game.info.platforms)?,
        join_list(&game.dlc_titles)?,
    ])
}

fn dlc_record(dlc: &Dlc) -> Result<[String; 9], StoreError> {
    Ok([
        DLC_TAG.to_string(),
        dlc.info.title.clone(),
        dlc.info.release_year.to_string(),
        dlc.info.price.to_string(),
        dlc.info.rating.to_string(),
        dlc.base_game_title.clone(),
        dlc.expansion.to_string(),
        join_list(&dlc.info.genres)?,
        join_list(&dlc.info.platforms)?,
    ])
}

/// Comma-join `items`, quoting any entry that contains a comma or quote.
fn join_list(items: &[String]) -> Result<String, StoreError> {
    if items.is_empty() {
        return Ok(String::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(LIST_DELIMITER)
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(items)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Csv(e.into_error().into()))?;
    let joined = String::from_utf8(bytes).map_err(|e| StoreError::malformed(e.to_string()))?;
    Ok(joined.trim_end_matches(['\r', '\n']).to_string())
}

fn library_record(email: &str, media: &Media) -> [String; 7] {
    let info = media.info();
    [
        LIBRARY_TAG.to_string(),
        email.to_string(),
        info.title.clone(),
        info.rating.to_string(),
        info.release_year.to_string(),
        info.price.to_string(),
        media.kind().to_string(),
    ]
}

// ── Decoding ────────────────────────────────────────────────────────────

/// A library row waiting for the catalog to be fully read.
struct LibraryRow {
    email: String,
    title: String,
    rating: f64,
    year: u16,
    price: f64,
    kind: MediaKind,
}

#[derive(Default)]
struct Decoder {
    snapshot: Snapshot,
    library: Vec<LibraryRow>,
    rules: ValidationRules,
}

impl Decoder {
    fn accept(&mut self, record: &StringRecord) -> Result<(), StoreError> {
        let tag = field(record, 0).to_ascii_uppercase();
        match tag.as_str() {
            GAME_TAG => {
                require_fields(record, 4)?;
                let mut game = Game::new(field(record, 1))
                    .with_year(parse_year(field(record, 2))?)
                    .with_price(parse_number(field(record, 3))?)
                    .with_rating(parse_number(field(record, 4))?)
                    .with_developer(field(record, 5))
                    .with_multiplayer(parse_bool(field(record, 6)));
                game.info.genres = parse_list(field(record, 7))?;
                game.info.platforms = parse_list(field(record, 8))?;
                game.dlc_titles = parse_list(field(record, 9))?;
                let rules = self.rules;
                push_checked(&mut self.snapshot.games, game, "game", |g| {
                    validate::media_info(&mut g.info, rules)
                });
            }
            DLC_TAG => {
                require_fields(record, 4)?;
                let mut dlc = Dlc::new(field(record, 1), field(record, 5))
                    .with_year(parse_year(field(record, 2))?)
                    .with_price(parse_number(field(record, 3))?)
                    .with_rating(parse_number(field(record, 4))?)
                    .with_expansion(parse_bool(field(record, 6)));
                dlc.info.genres = parse_list(field(record, 7))?;
                dlc.info.platforms = parse_list(field(record, 8))?;
                let rules = self.rules;
                push_checked(&mut self.snapshot.dlcs, dlc, "DLC", |d| {
                    validate::media_info(&mut d.info, rules)
                });
            }
            USER_TAG => {
                require_fields(record, 3)?;
                let user = User::new(field(record, 1), field(record, 2));
                push_checked(&mut self.snapshot.users, user, "user", check_user);
            }
            LIBRARY_TAG => {
                require_fields(record, 7)?;
                let kind = field(record, 6)
                    .parse::<MediaKind>()
                    .map_err(|e| StoreError::malformed(e.to_string()))?;
                self.library.push(LibraryRow {
                    email: field(record, 1).to_string(),
                    title: field(record, 2).to_string(),
                    rating: parse_number(field(record, 3))?,
                    year: parse_year(field(record, 4))?,
                    price: parse_number(field(record, 5))?,
                    kind,
                });
            }
            other => return Err(StoreError::malformed(format!("unknown record type '{other}'"))),
        }
        Ok(())
    }

    /// Attach library rows to their owners now that every catalog row is known.
    fn finish(mut self) -> Snapshot {
        for row in std::mem::take(&mut self.library) {
            let mut media = self.library_media(&row);
            if let Err(e) = validate::media_info(media.info_mut(), self.rules) {
                log::warn!(
                    "Skipping library entry '{}' for {}: {e}",
                    row.title,
                    row.email
                );
                continue;
            }
            let Some(user) = self
                .snapshot
                .users
                .iter_mut()
                .find(|u| same_key(&u.email, &row.email))
            else {
                log::warn!(
                    "Skipping library entry '{}' for unknown user {}",
                    row.title,
                    row.email
                );
                continue;
            };
            if user.owns(&row.title) {
                log::warn!(
                    "Skipping duplicate library entry '{}' for {}",
                    row.title,
                    row.email
                );
                continue;
            }
            user.library.push(media);
        }
        self.snapshot
    }

    /// Copy the same-titled catalog entry if there is one, else start bare.
    fn library_media(&self, row: &LibraryRow) -> Media {
        let mut media: Media = match row.kind {
            MediaKind::Game => self
                .snapshot
                .games
                .iter()
                .find(|g| same_key(&g.info.title, &row.title))
                .map_or_else(|| Game::new(row.title.as_str()), Game::clone_for_library)
                .into(),
            MediaKind::Dlc => self
                .snapshot
                .dlcs
                .iter()
                .find(|d| same_key(&d.info.title, &row.title))
                .map_or_else(|| Dlc::new(row.title.as_str(), ""), Dlc::clone_for_library)
                .into(),
        };
        let info = media.info_mut();
        info.title = row.title.clone();
        info.rating = row.rating;
        info.release_year = row.year;
        info.price = row.price;
        media
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn require_fields(record: &StringRecord, count: usize) -> Result<(), StoreError> {
    if record.len() < count {
        return Err(StoreError::malformed(format!(
            "expected at least {count} fields, found {}",
            record.len()
        )));
    }
    Ok(())
}

/// Empty means zero. A comma decimal separator is accepted.
fn parse_number(raw: &str) -> Result<f64, StoreError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StoreError::malformed(format!("invalid number '{raw}'")))
}

fn parse_year(raw: &str) -> Result<u16, StoreError> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| StoreError::malformed(format!("invalid year '{raw}'")))
}

fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

fn parse_list(raw: &str) -> Result<Vec<String>, StoreError> {
    if raw.is_empty() || raw == "N/A" {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(LIST_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());
    let mut items = Vec::new();
    for record in reader.records() {
        items.extend(record?.iter().filter_map(validate::list_entry));
    }
    Ok(items)
}
