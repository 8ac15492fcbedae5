//! Application context holding the three repositories.
//!
//! Build one at startup and hand it to the services by mutable reference.
//! There is no global instance.

use serde::{Deserialize, Serialize};

use crate::media::{Dlc, Game};
use crate::repository::{DlcRepository, GameRepository, UserRepository};
use crate::services::{DlcService, GameService, UserService};
use crate::user::User;
use crate::validate::ValidationRules;

/// Owned copy of the full system state, as written to and read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub dlcs: Vec<Dlc>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.dlcs.is_empty() && self.users.is_empty()
    }
}

/// The canonical catalog and user store.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    pub(crate) games: GameRepository,
    pub(crate) dlcs: DlcRepository,
    pub(crate) users: UserRepository,
    rules: ValidationRules,
}

impl CatalogContext {
    /// Create an empty context with the default rules (current year as cutoff).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context with explicit validation rules.
    pub fn with_rules(rules: ValidationRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    pub fn games(&self) -> &GameRepository {
        &self.games
    }

    pub fn dlcs(&self) -> &DlcRepository {
        &self.dlcs
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn game_service(&mut self) -> GameService<'_> {
        GameService::new(self)
    }

    pub fn dlc_service(&mut self) -> DlcService<'_> {
        DlcService::new(self)
    }

    pub fn user_service(&mut self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Copy out every repository.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            games: self.games.list(),
            dlcs: self.dlcs.list(),
            users: self.users.list(),
        }
    }

    /// Replace every repository with the snapshot's contents.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.games.bulk_load(snapshot.games);
        self.dlcs.bulk_load(snapshot.dlcs);
        self.users.bulk_load(snapshot.users);
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.dlcs.is_empty() && self.users.is_empty()
    }
}
