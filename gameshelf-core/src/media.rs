//! Data model types for catalog media.
//!
//! A [`Media`] value is either a [`Game`] or a [`Dlc`]. Both share the
//! fields in [`MediaInfo`]; the variant-specific fields live on the variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::repository::same_key;

// ── Kind ────────────────────────────────────────────────────────────────────

/// Discriminator for the two media variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Game,
    #[serde(rename = "DLC")]
    Dlc,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Dlc => "DLC",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" => Ok(Self::Game),
            "dlc" => Ok(Self::Dlc),
            other => Err(CatalogError::unsupported_media(other)),
        }
    }
}

// ── Shared fields ───────────────────────────────────────────────────────────

/// Fields common to every media variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    /// `0` means the year is unknown.
    #[serde(default)]
    pub release_year: u16,
    #[serde(default)]
    pub price: f64,
}

impl MediaInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genres: Vec::new(),
            platforms: Vec::new(),
            rating: 0.0,
            release_year: 0,
            price: 0.0,
        }
    }
}

/// Access to the shared fields of a catalog variant.
pub trait CatalogItem: Clone {
    const KIND: MediaKind;

    fn info(&self) -> &MediaInfo;

    fn info_mut(&mut self) -> &mut MediaInfo;

    fn title(&self) -> &str {
        &self.info().title
    }

    /// Wrap a copy of this item as a [`Media`] value.
    fn to_media(&self) -> Media;
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A base game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(flatten)]
    pub info: MediaInfo,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub multiplayer: bool,
    /// Titles of DLCs registered against this game. Maintained by the DLC service.
    #[serde(default)]
    pub dlc_titles: Vec<String>,
}

impl Game {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            info: MediaInfo::new(title),
            developer: String::new(),
            multiplayer: false,
            dlc_titles: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.info.release_year = year;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.info.price = price;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.info.rating = rating;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.info.genres.push(genre.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.info.platforms.push(platform.into());
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = developer.into();
        self
    }

    pub fn with_multiplayer(mut self, multiplayer: bool) -> Self {
        self.multiplayer = multiplayer;
        self
    }

    pub fn has_dlc(&self, title: &str) -> bool {
        self.dlc_titles.iter().any(|t| same_key(t, title))
    }

    /// An independent copy for a user's library.
    pub fn clone_for_library(&self) -> Self {
        self.clone()
    }
}

impl CatalogItem for Game {
    const KIND: MediaKind = MediaKind::Game;

    fn info(&self) -> &MediaInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut MediaInfo {
        &mut self.info
    }

    fn to_media(&self) -> Media {
        Media::Game(self.clone())
    }
}

// ── DLC ─────────────────────────────────────────────────────────────────────

/// Downloadable content tied to a base game by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dlc {
    #[serde(flatten)]
    pub info: MediaInfo,
    /// May name a game that is not (or no longer) in the catalog.
    #[serde(default)]
    pub base_game_title: String,
    #[serde(default)]
    pub expansion: bool,
}

impl Dlc {
    pub fn new(title: impl Into<String>, base_game_title: impl Into<String>) -> Self {
        Self {
            info: MediaInfo::new(title),
            base_game_title: base_game_title.into(),
            expansion: false,
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.info.release_year = year;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.info.price = price;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.info.rating = rating;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.info.genres.push(genre.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.info.platforms.push(platform.into());
        self
    }

    pub fn with_expansion(mut self, expansion: bool) -> Self {
        self.expansion = expansion;
        self
    }

    /// An independent copy for a user's library.
    pub fn clone_for_library(&self) -> Self {
        self.clone()
    }
}

impl CatalogItem for Dlc {
    const KIND: MediaKind = MediaKind::Dlc;

    fn info(&self) -> &MediaInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut MediaInfo {
        &mut self.info
    }

    fn to_media(&self) -> Media {
        Media::Dlc(self.clone())
    }
}

// ── Media ───────────────────────────────────────────────────────────────────

/// Either catalog variant, as held in a user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Media {
    Game(Game),
    #[serde(rename = "DLC")]
    Dlc(Dlc),
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Game(_) => MediaKind::Game,
            Self::Dlc(_) => MediaKind::Dlc,
        }
    }

    pub fn info(&self) -> &MediaInfo {
        match self {
            Self::Game(game) => &game.info,
            Self::Dlc(dlc) => &dlc.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut MediaInfo {
        match self {
            Self::Game(game) => &mut game.info,
            Self::Dlc(dlc) => &mut dlc.info,
        }
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn as_game(&self) -> Option<&Game> {
        match self {
            Self::Game(game) => Some(game),
            Self::Dlc(_) => None,
        }
    }

    pub fn as_dlc(&self) -> Option<&Dlc> {
        match self {
            Self::Dlc(dlc) => Some(dlc),
            Self::Game(_) => None,
        }
    }

    /// Deep copy dispatched on the variant; shares no storage with `self`.
    pub fn clone_for_library(&self) -> Self {
        match self {
            Self::Game(game) => Self::Game(game.clone_for_library()),
            Self::Dlc(dlc) => Self::Dlc(dlc.clone_for_library()),
        }
    }
}

impl From<Game> for Media {
    fn from(game: Game) -> Self {
        Self::Game(game)
    }
}

impl From<Dlc> for Media {
    fn from(dlc: Dlc) -> Self {
        Self::Dlc(dlc)
    }
}

// ── Display helpers ─────────────────────────────────────────────────────────

/// Render a release year, using `N/A` for unknown.
pub fn display_year(year: u16) -> String {
    if year == 0 {
        "N/A".to_string()
    } else {
        year.to_string()
    }
}

/// Render a price, using `Free` for zero.
pub fn display_price(price: f64) -> String {
    if price == 0.0 {
        "Free".to_string()
    } else {
        format!("$ {:.2}", price)
    }
}

/// Render a list, using `N/A` when empty.
pub fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("Game".parse::<MediaKind>().unwrap(), MediaKind::Game);
        assert_eq!("dlc".parse::<MediaKind>().unwrap(), MediaKind::Dlc);
        assert_eq!(" GAME ".parse::<MediaKind>().unwrap(), MediaKind::Game);
        assert!(matches!(
            "Soundtrack".parse::<MediaKind>(),
            Err(CatalogError::UnsupportedMedia(_))
        ));
    }

    #[test]
    fn test_clone_for_library_is_independent() {
        let original = Media::Game(Game::new("Portal 2").with_genre("Puzzle"));
        let mut copy = original.clone_for_library();
        copy.info_mut().genres.push("Co-op".to_string());
        copy.info_mut().rating = 9.0;
        assert_eq!(original.info().genres, vec!["Puzzle".to_string()]);
        assert_eq!(original.info().rating, 0.0);
        assert_eq!(copy.kind(), MediaKind::Game);
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(display_year(0), "N/A");
        assert_eq!(display_year(2011), "2011");
        assert_eq!(display_price(0.0), "Free");
        assert_eq!(display_price(9.99), "$ 9.99");
        assert_eq!(display_list(&[]), "N/A");
        assert_eq!(
            display_list(&["PC".to_string(), "PS3".to_string()]),
            "PC, PS3"
        );
    }
}
