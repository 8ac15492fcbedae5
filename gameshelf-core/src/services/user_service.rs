use crate::context::CatalogContext;
use crate::error::ValidationError;
use crate::media::{CatalogItem, Media, MediaKind};
use crate::repository::{UserRepository, same_key};
use crate::user::User;
use crate::validate;

/// User registration and library management.
pub struct UserService<'a> {
    ctx: &'a mut CatalogContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a mut CatalogContext) -> Self {
        Self { ctx }
    }

    pub fn repository(&self) -> &UserRepository {
        &self.ctx.users
    }

    /// Validate and register a user. Returns `Ok(false)` if the email is taken.
    pub fn add(&mut self, mut user: User) -> Result<bool, ValidationError> {
        user.name = validate::user_name(&user.name)?;
        user.email = validate::email(&user.email)?;
        if self.ctx.users.exists(&user.email) {
            return Ok(false);
        }
        Ok(self.ctx.users.add(user))
    }

    pub fn remove(&mut self, email: &str) -> bool {
        self.ctx.users.remove(email)
    }

    pub fn find(&self, email: &str) -> Option<&User> {
        self.ctx.users.find(email)
    }

    pub fn list(&self) -> Vec<User> {
        self.ctx.users.list()
    }

    /// Rename a user and/or change their email.
    ///
    /// Blank or absent values leave the field unchanged. Both values are
    /// validated before anything is applied. The name is applied before the
    /// email uniqueness check, so when the new email belongs to another user
    /// this returns `Ok(false)` with the new name already in place.
    pub fn edit(
        &mut self,
        current_email: &str,
        new_name: Option<&str>,
        new_email: Option<&str>,
    ) -> Result<bool, ValidationError> {
        if !self.ctx.users.exists(current_email) {
            return Ok(false);
        }

        let new_name = match new_name.filter(|n| !n.trim().is_empty()) {
            Some(name) => Some(validate::user_name(name)?),
            None => None,
        };
        let new_email = match new_email.filter(|e| !e.trim().is_empty()) {
            Some(email) => Some(validate::email(email)?),
            None => None,
        };

        if let Some(name) = new_name {
            if let Some(user) = self.ctx.users.find_mut(current_email) {
                user.name = name;
            }
        }

        if let Some(email) = new_email {
            if !same_key(&email, current_email) {
                if self.ctx.users.exists(&email) {
                    return Ok(false);
                }
                if let Some(user) = self.ctx.users.find_mut(current_email) {
                    user.email = email;
                }
            }
        }
        Ok(true)
    }

    /// Add an independent copy of `media` to a user's library.
    ///
    /// Returns `false` when the user is unknown or already owns that title.
    pub fn add_media_to_library(&mut self, email: &str, media: &Media) -> bool {
        let Some(user) = self.ctx.users.find_mut(email) else {
            return false;
        };
        if user.owns(media.title()) {
            return false;
        }
        user.library.push(media.clone_for_library());
        true
    }

    /// Copy the catalog entry of the given kind and title into a user's library.
    ///
    /// Returns `false` when the catalog has no such entry.
    pub fn acquire(&mut self, email: &str, kind: MediaKind, title: &str) -> bool {
        let media = match kind {
            MediaKind::Game => self.ctx.games.find(title).map(CatalogItem::to_media),
            MediaKind::Dlc => self.ctx.dlcs.find(title).map(CatalogItem::to_media),
        };
        match media {
            Some(media) => self.add_media_to_library(email, &media),
            None => false,
        }
    }

    pub fn remove_media_from_library(&mut self, email: &str, title: &str) -> bool {
        self.ctx
            .users
            .find_mut(email)
            .is_some_and(|user| user.remove_from_library(title))
    }

    /// Change the rating on a user's owned copy.
    ///
    /// `None` leaves the rating untouched and reports success. A rating outside
    /// 0..=10 is refused with `false`; the catalog entry is never affected.
    pub fn edit_library_media_rating(
        &mut self,
        email: &str,
        title: &str,
        rating: Option<f64>,
    ) -> bool {
        let Some(media) = self
            .ctx
            .users
            .find_mut(email)
            .and_then(|user| user.library_entry_mut(title))
        else {
            return false;
        };
        match rating {
            Some(value) => match validate::rating(value) {
                Ok(value) => {
                    media.info_mut().rating = value;
                    true
                }
                Err(_) => false,
            },
            None => true,
        }
    }

    pub fn find_library_media(&self, email: &str, title: &str) -> Option<&Media> {
        self.ctx
            .users
            .find(email)
            .and_then(|user| user.library_entry(title))
    }

    /// The user's library, or an empty list for an unknown user.
    pub fn list_library(&self, email: &str) -> Vec<Media> {
        self.ctx
            .users
            .find(email)
            .map(|user| user.library.clone())
            .unwrap_or_default()
    }
}
