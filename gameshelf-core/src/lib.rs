//! Catalog model, repositories, and services for gameshelf.
//!
//! Build a [`CatalogContext`] once, then borrow services from it to add,
//! edit, and remove games, DLCs, and users. Every rule that spans more than
//! one repository (DLC linkage, library purges) lives in the services.

pub mod context;
pub mod error;
pub mod media;
pub mod repository;
pub mod services;
pub mod user;
pub mod validate;

pub use context::{CatalogContext, Snapshot};
pub use error::{CatalogError, ValidationError};
pub use media::{CatalogItem, Dlc, Game, Media, MediaInfo, MediaKind};
pub use repository::{DlcRepository, GameRepository, Keyed, Repository, UserRepository, same_key};
pub use services::{DlcService, GameService, MediaService, UserService};
pub use user::User;
pub use validate::ValidationRules;
