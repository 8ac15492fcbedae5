use crate::context::CatalogContext;
use crate::error::ValidationError;
use crate::media::Game;
use crate::repository::GameRepository;
use crate::services::MediaService;
use crate::validate::{self, ValidationRules};

/// Catalog operations for base games.
pub struct GameService<'a> {
    ctx: &'a mut CatalogContext,
}

impl<'a> GameService<'a> {
    pub fn new(ctx: &'a mut CatalogContext) -> Self {
        Self { ctx }
    }

    pub fn edit_developer(&mut self, title: &str, developer: &str) -> bool {
        match self.ctx.games.find_mut(title) {
            Some(game) => {
                game.developer = developer.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn edit_multiplayer(&mut self, title: &str, multiplayer: bool) -> bool {
        match self.ctx.games.find_mut(title) {
            Some(game) => {
                game.multiplayer = multiplayer;
                true
            }
            None => false,
        }
    }

    /// Replace the whole genre list. Blank entries are dropped.
    pub fn replace_genres(&mut self, title: &str, genres: &[String]) -> bool {
        match self.ctx.games.find_mut(title) {
            Some(game) => {
                game.info.genres = validate::clean_list(genres);
                true
            }
            None => false,
        }
    }

    /// Replace the whole platform list. Blank entries are dropped.
    pub fn replace_platforms(&mut self, title: &str, platforms: &[String]) -> bool {
        match self.ctx.games.find_mut(title) {
            Some(game) => {
                game.info.platforms = validate::clean_list(platforms);
                true
            }
            None => false,
        }
    }
}

impl MediaService for GameService<'_> {
    type Item = Game;

    fn repository(&self) -> &GameRepository {
        &self.ctx.games
    }

    fn repository_mut(&mut self) -> &mut GameRepository {
        &mut self.ctx.games
    }

    fn rules(&self) -> ValidationRules {
        self.ctx.rules()
    }

    fn add(&mut self, mut game: Game) -> Result<bool, ValidationError> {
        validate::media_info(&mut game.info, self.rules())?;
        game.developer = game.developer.trim().to_string();
        // DLC links are only ever created by the DLC service.
        game.dlc_titles.clear();

        let title = game.info.title.clone();
        let stored = self.ctx.games.add(game);
        if stored {
            log::debug!("Added game '{}'", title);
        }
        Ok(stored)
    }

    /// Remove a game and purge it from every library.
    ///
    /// DLCs naming this game as their base are kept; their base title is left as is.
    fn remove(&mut self, title: &str) -> bool {
        if !self.ctx.games.remove(title) {
            return false;
        }
        let purged = self.ctx.users.purge_media(title);
        log::debug!("Removed game '{}' from {} user libraries", title, purged);
        true
    }
}
