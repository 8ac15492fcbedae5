//! Business rules layered over the repositories.

pub mod dlc_service;
pub mod game_service;
pub mod user_service;

pub use dlc_service::DlcService;
pub use game_service::GameService;
pub use user_service::UserService;

use crate::error::ValidationError;
use crate::media::{CatalogItem, MediaInfo};
use crate::repository::{Keyed, Repository};
use crate::validate::{self, ValidationRules};

/// The contract shared by the game and DLC services.
///
/// Edits that change a single field are provided here; adding and removing
/// are variant-specific because of the game/DLC linkage.
pub trait MediaService {
    type Item: CatalogItem + Keyed;

    fn repository(&self) -> &Repository<Self::Item>;

    fn repository_mut(&mut self) -> &mut Repository<Self::Item>;

    fn rules(&self) -> ValidationRules;

    /// Validate and store. Returns `Ok(false)` when the title is already taken.
    fn add(&mut self, item: Self::Item) -> Result<bool, ValidationError>;

    /// Remove by title, cascading to dependent references.
    fn remove(&mut self, title: &str) -> bool;

    fn find(&self, title: &str) -> Option<&Self::Item> {
        self.repository().find(title)
    }

    fn list(&self) -> Vec<Self::Item> {
        self.repository().list()
    }

    fn exists(&self, title: &str) -> bool {
        self.repository().exists(title)
    }

    fn edit_year(&mut self, title: &str, year: u16) -> Result<bool, ValidationError> {
        let year = self.rules().release_year(year)?;
        Ok(update_info(self.repository_mut(), title, |info| {
            info.release_year = year
        }))
    }

    fn edit_price(&mut self, title: &str, price: f64) -> Result<bool, ValidationError> {
        let price = validate::price(price)?;
        Ok(update_info(self.repository_mut(), title, |info| {
            info.price = price
        }))
    }

    fn edit_rating(&mut self, title: &str, rating: f64) -> Result<bool, ValidationError> {
        let rating = validate::rating(rating)?;
        Ok(update_info(self.repository_mut(), title, |info| {
            info.rating = rating
        }))
    }

    /// Append a genre. Blank genres and unknown titles are ignored.
    fn add_genre(&mut self, title: &str, genre: &str) -> bool {
        let Some(genre) = validate::list_entry(genre) else {
            return false;
        };
        update_info(self.repository_mut(), title, |info| info.genres.push(genre))
    }

    /// Append a platform. Blank platforms and unknown titles are ignored.
    fn add_platform(&mut self, title: &str, platform: &str) -> bool {
        let Some(platform) = validate::list_entry(platform) else {
            return false;
        };
        update_info(self.repository_mut(), title, |info| {
            info.platforms.push(platform)
        })
    }
}

fn update_info<T, F>(repo: &mut Repository<T>, title: &str, apply: F) -> bool
where
    T: CatalogItem + Keyed,
    F: FnOnce(&mut MediaInfo),
{
    match repo.find_mut(title) {
        Some(item) => {
            apply(item.info_mut());
            true
        }
        None => false,
    }
}
