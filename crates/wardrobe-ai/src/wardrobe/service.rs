use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{ItemCategory, ItemId, NewWardrobeItem, WardrobeItem};
use super::repository::{CatalogError, CatalogStore};
use crate::identity::Session;
use crate::storage::{DataUrl, ImageStore, SignedUrl, StorageError};

/// Catalog operations for the authenticated account, including image hosting.
pub struct WardrobeService<C, S> {
    catalog: Arc<C>,
    images: Arc<S>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemValidationError {
    #[error("Please provide item name and image")]
    MissingNameOrImage,
}

/// Error raised by the wardrobe service.
#[derive(Debug, thiserror::Error)]
pub enum WardrobeServiceError {
    #[error(transparent)]
    Validation(#[from] ItemValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Item or image not found")]
    NotFound,
}

fn validate(submission: &NewWardrobeItem) -> Result<(), ItemValidationError> {
    if submission.name.trim().is_empty() || submission.image.trim().is_empty() {
        return Err(ItemValidationError::MissingNameOrImage);
    }
    Ok(())
}

impl<C, S> WardrobeService<C, S>
where
    C: CatalogStore + 'static,
    S: ImageStore + 'static,
{
    pub fn new(catalog: Arc<C>, images: Arc<S>) -> Self {
        Self { catalog, images }
    }

    /// All items for the session, optionally narrowed to one category.
    pub fn list(
        &self,
        session: &Session,
        category: Option<ItemCategory>,
    ) -> Result<Vec<WardrobeItem>, WardrobeServiceError> {
        let mut items = self.catalog.list(session.user_id())?;
        if let Some(category) = category {
            items.retain(|item| item.category == category);
        }
        Ok(items)
    }

    pub fn add(
        &self,
        session: &Session,
        submission: NewWardrobeItem,
    ) -> Result<WardrobeItem, WardrobeServiceError> {
        validate(&submission)?;

        let id = ItemId(Uuid::new_v4().to_string());
        let mut item = submission.into_item(id);

        if DataUrl::is_data_url(&item.image) {
            self.host_image(session, &mut item);
        }

        let hosted = item.image_file_name.clone();
        let stored = match self.catalog.insert(session.user_id(), item) {
            Ok(stored) => stored,
            Err(err) => {
                if let Some(file_name) = hosted {
                    if let Err(remove_err) = self.images.remove(session.user_id(), &file_name) {
                        warn!(file_name = %file_name, error = %remove_err, "failed to remove orphaned image");
                    }
                }
                return Err(err.into());
            }
        };
        info!(user_id = %session.user_id(), item_id = %stored.id, category = %stored.category, "wardrobe item added");
        Ok(stored)
    }

    /// Adds every submission in order. Either all of them are stored or none are.
    pub fn import(
        &self,
        session: &Session,
        submissions: Vec<NewWardrobeItem>,
    ) -> Result<Vec<WardrobeItem>, WardrobeServiceError> {
        submissions.iter().try_for_each(validate)?;

        let mut stored = Vec::with_capacity(submissions.len());
        for submission in submissions {
            match self.add(session, submission) {
                Ok(item) => stored.push(item),
                Err(err) => {
                    self.roll_back(session, &stored);
                    return Err(err);
                }
            }
        }
        info!(user_id = %session.user_id(), count = stored.len(), "wardrobe import completed");
        Ok(stored)
    }

    fn roll_back(&self, session: &Session, stored: &[WardrobeItem]) {
        for item in stored {
            if let Err(err) = self.delete(session, &item.id) {
                warn!(item_id = %item.id, error = %err, "failed to roll back imported item");
            }
        }
    }

    // A failed upload keeps the inline image rather than rejecting the item.
    fn host_image(&self, session: &Session, item: &mut WardrobeItem) {
        let uploaded = DataUrl::parse(&item.image)
            .and_then(|image| self.images.upload(session.user_id(), &item.id.0, image));
        match uploaded {
            Ok(stored) => {
                item.image = stored.signed_url.url;
                item.image_file_name = Some(stored.file_name);
            }
            Err(err) => {
                warn!(item_id = %item.id, error = %err, "image upload failed; keeping inline image");
            }
        }
    }

    /// Returns `false` when the id is unknown for this account.
    pub fn delete(&self, session: &Session, id: &ItemId) -> Result<bool, WardrobeServiceError> {
        let owner = session.user_id();
        let Some(item) = self.catalog.fetch(owner, id)? else {
            return Ok(false);
        };

        let removed = self.catalog.remove(owner, id)?;
        if !removed {
            return Ok(false);
        }
        info!(user_id = %owner, item_id = %id, "wardrobe item deleted");

        if let Some(file_name) = &item.image_file_name {
            if let Err(err) = self.images.remove(owner, file_name) {
                warn!(item_id = %id, file_name = %file_name, error = %err, "failed to remove hosted image");
            }
        }
        Ok(true)
    }

    /// Re-signs a hosted image and stores the fresh link on the item.
    pub fn refresh_image(
        &self,
        session: &Session,
        id: &ItemId,
    ) -> Result<SignedUrl, WardrobeServiceError> {
        let owner = session.user_id();
        let mut item = self
            .catalog
            .fetch(owner, id)?
            .ok_or(WardrobeServiceError::NotFound)?;
        let file_name = item
            .image_file_name
            .clone()
            .ok_or(WardrobeServiceError::NotFound)?;

        let signed = match self.images.sign(owner, &file_name) {
            Ok(signed) => signed,
            Err(StorageError::NotFound) => return Err(WardrobeServiceError::NotFound),
            Err(err) => return Err(err.into()),
        };

        item.image = signed.url.clone();
        self.catalog.replace(owner, item)?;
        Ok(signed)
    }
}
