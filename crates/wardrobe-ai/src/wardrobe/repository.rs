use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ItemId, WardrobeItem};
use crate::identity::UserId;

/// Per-account catalog storage so the service can be exercised in isolation.
pub trait CatalogStore: Send + Sync {
    fn list(&self, owner: &UserId) -> Result<Vec<WardrobeItem>, CatalogError>;
    fn insert(&self, owner: &UserId, item: WardrobeItem) -> Result<WardrobeItem, CatalogError>;
    fn fetch(&self, owner: &UserId, id: &ItemId) -> Result<Option<WardrobeItem>, CatalogError>;
    fn replace(&self, owner: &UserId, item: WardrobeItem) -> Result<(), CatalogError>;
    fn remove(&self, owner: &UserId, id: &ItemId) -> Result<bool, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("item already exists")]
    Conflict,
    #[error("item not found")]
    NotFound,
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Insertion-ordered, in-process catalog partitioned by account.
#[derive(Default, Clone)]
pub struct MemoryCatalogStore {
    partitions: Arc<Mutex<HashMap<UserId, Vec<WardrobeItem>>>>,
}

impl MemoryCatalogStore {
    fn partitions(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<UserId, Vec<WardrobeItem>>>, CatalogError> {
        self.partitions
            .lock()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn list(&self, owner: &UserId) -> Result<Vec<WardrobeItem>, CatalogError> {
        Ok(self
            .partitions()?
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }

    fn insert(&self, owner: &UserId, item: WardrobeItem) -> Result<WardrobeItem, CatalogError> {
        let mut guard = self.partitions()?;
        let partition = guard.entry(owner.clone()).or_default();
        if partition.iter().any(|existing| existing.id == item.id) {
            return Err(CatalogError::Conflict);
        }
        partition.push(item.clone());
        Ok(item)
    }

    fn fetch(&self, owner: &UserId, id: &ItemId) -> Result<Option<WardrobeItem>, CatalogError> {
        Ok(self
            .partitions()?
            .get(owner)
            .and_then(|items| items.iter().find(|item| &item.id == id).cloned()))
    }

    fn replace(&self, owner: &UserId, item: WardrobeItem) -> Result<(), CatalogError> {
        let mut guard = self.partitions()?;
        let slot = guard
            .get_mut(owner)
            .and_then(|items| items.iter_mut().find(|existing| existing.id == item.id))
            .ok_or(CatalogError::NotFound)?;
        *slot = item;
        Ok(())
    }

    fn remove(&self, owner: &UserId, id: &ItemId) -> Result<bool, CatalogError> {
        let mut guard = self.partitions()?;
        let Some(items) = guard.get_mut(owner) else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|item| &item.id != id);
        Ok(items.len() != before)
    }
}
