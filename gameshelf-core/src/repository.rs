//! In-memory keyed collections for games, DLCs, and users.
//!
//! Keys compare case-insensitively. The repository only enforces key
//! uniqueness; every other business rule lives in the services.

use crate::media::{Dlc, Game};
use crate::user::User;

/// Case-insensitive key comparison used by every repository and library lookup.
pub fn same_key(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// An entity stored under a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Game {
    fn key(&self) -> &str {
        &self.info.title
    }
}

impl Keyed for Dlc {
    fn key(&self) -> &str {
        &self.info.title
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.email
    }
}

/// Insertion-ordered store of `T`, unique by [`Keyed::key`].
#[derive(Debug, Clone)]
pub struct Repository<T> {
    items: Vec<T>,
}

pub type GameRepository = Repository<Game>;
pub type DlcRepository = Repository<Dlc>;
pub type UserRepository = Repository<User>;

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + Clone> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` unless its key is already taken. Returns whether it was stored.
    pub fn add(&mut self, item: T) -> bool {
        if self.exists(item.key()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove every item matching `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !same_key(item.key(), key));
        self.items.len() != before
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| same_key(item.key(), key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| same_key(item.key(), key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Snapshot of every item in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Replace the whole collection. Used when restoring a saved snapshot.
    pub fn bulk_load(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl UserRepository {
    /// Remove a title from every user's library. Returns how many users were affected.
    pub fn purge_media(&mut self, title: &str) -> usize {
        self.items
            .iter_mut()
            .map(|user| user.remove_from_library(title))
            .filter(|removed| *removed)
            .count()
    }
}
