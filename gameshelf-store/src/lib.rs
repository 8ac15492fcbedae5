//! Persistence and settings for gameshelf.
//!
//! Snapshots of the catalog are written as `;`-delimited text or JSON
//! ([`Format`]). [`load_into`] and [`save_from`] connect a format to a
//! [`gameshelf_core::CatalogContext`]; [`settings`] locates the data file.

pub mod error;
pub mod format;
pub mod gateway;
pub mod json;
pub mod settings;
pub mod text;

pub use error::StoreError;
pub use format::Format;
pub use gateway::{SnapshotStore, load_into, save_from};
pub use json::JsonStore;
pub use settings::{AppSettings, DataSettings, DataSource, GeneralSettings};
pub use text::TextStore;
