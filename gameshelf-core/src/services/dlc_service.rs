use crate::context::CatalogContext;
use crate::error::ValidationError;
use crate::media::Dlc;
use crate::repository::{DlcRepository, same_key};
use crate::services::MediaService;
use crate::validate::{self, ValidationRules};

/// Catalog operations for DLCs, including the link to their base game.
pub struct DlcService<'a> {
    ctx: &'a mut CatalogContext,
}

impl<'a> DlcService<'a> {
    pub fn new(ctx: &'a mut CatalogContext) -> Self {
        Self { ctx }
    }

    /// DLCs whose base title names no game in the catalog.
    pub fn dangling(&self) -> Vec<Dlc> {
        self.ctx
            .dlcs
            .iter()
            .filter(|dlc| {
                !dlc.base_game_title.is_empty() && !self.ctx.games.exists(&dlc.base_game_title)
            })
            .cloned()
            .collect()
    }

    /// Register `dlc_title` on its base game, once.
    fn link(&mut self, base_title: &str, dlc_title: &str) {
        if base_title.is_empty() {
            return;
        }
        if let Some(game) = self.ctx.games.find_mut(base_title) {
            if !game.has_dlc(dlc_title) {
                game.dlc_titles.push(dlc_title.to_string());
                log::debug!("Linked DLC '{}' to '{}'", dlc_title, game.info.title);
            }
        }
    }

    fn unlink(&mut self, base_title: &str, dlc_title: &str) {
        if base_title.is_empty() {
            return;
        }
        if let Some(game) = self.ctx.games.find_mut(base_title) {
            game.dlc_titles.retain(|t| !same_key(t, dlc_title));
        }
    }
}

impl MediaService for DlcService<'_> {
    type Item = Dlc;

    fn repository(&self) -> &DlcRepository {
        &self.ctx.dlcs
    }

    fn repository_mut(&mut self) -> &mut DlcRepository {
        &mut self.ctx.dlcs
    }

    fn rules(&self) -> ValidationRules {
        self.ctx.rules()
    }

    /// Validate and store, then link the DLC to its base game if that game exists.
    fn add(&mut self, mut dlc: Dlc) -> Result<bool, ValidationError> {
        validate::media_info(&mut dlc.info, self.rules())?;
        dlc.base_game_title = dlc.base_game_title.trim().to_string();

        let title = dlc.info.title.clone();
        let base_title = dlc.base_game_title.clone();
        if !self.ctx.dlcs.add(dlc) {
            return Ok(false);
        }
        self.link(&base_title, &title);
        Ok(true)
    }

    /// Remove a DLC, detach it from its base game and purge it from every library.
    fn remove(&mut self, title: &str) -> bool {
        let Some(dlc) = self.ctx.dlcs.find(title) else {
            return false;
        };
        let stored_title = dlc.info.title.clone();
        let base_title = dlc.base_game_title.clone();

        if !self.ctx.dlcs.remove(title) {
            return false;
        }
        self.unlink(&base_title, &stored_title);
        let purged = self.ctx.users.purge_media(title);
        log::debug!("Removed DLC '{}' from {} user libraries", stored_title, purged);
        true
    }
}
