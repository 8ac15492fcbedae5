use serde::{Deserialize, Serialize};

use crate::media::Media;
use crate::repository::same_key;

/// A registered user and the media copies they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    /// Owned copies, independent of the catalog entries they were taken from.
    #[serde(default)]
    pub library: Vec<Media>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            library: Vec::new(),
        }
    }

    pub fn library_entry(&self, title: &str) -> Option<&Media> {
        self.library.iter().find(|m| same_key(m.title(), title))
    }

    pub fn library_entry_mut(&mut self, title: &str) -> Option<&mut Media> {
        self.library.iter_mut().find(|m| same_key(m.title(), title))
    }

    pub fn owns(&self, title: &str) -> bool {
        self.library_entry(title).is_some()
    }

    /// Drop every library entry with this title. Returns whether anything was removed.
    pub fn remove_from_library(&mut self, title: &str) -> bool {
        let before = self.library.len();
        self.library.retain(|m| !same_key(m.title(), title));
        self.library.len() != before
    }
}
