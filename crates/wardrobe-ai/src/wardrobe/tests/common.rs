use std::sync::{Arc, Mutex};

use axum::{Extension, Router};

use crate::storage::LocalImageStore;
use crate::test_support::{identity_handle, image_store};
use crate::wardrobe::{
    wardrobe_router, CatalogError, CatalogStore, ItemId, MemoryCatalogStore, WardrobeItem,
    WardrobeService,
};
use crate::identity::UserId;

pub(super) type MemoryWardrobe = WardrobeService<MemoryCatalogStore, LocalImageStore>;

pub(super) struct Harness {
    pub(super) catalog: MemoryCatalogStore,
    pub(super) images: Arc<LocalImageStore>,
    pub(super) service: Arc<MemoryWardrobe>,
}

pub(super) fn harness() -> Harness {
    let catalog = MemoryCatalogStore::default();
    let images = image_store();
    let service = Arc::new(WardrobeService::new(
        Arc::new(catalog.clone()),
        images.clone(),
    ));
    Harness {
        catalog,
        images,
        service,
    }
}

pub(super) fn router(service: Arc<MemoryWardrobe>) -> Router {
    wardrobe_router(service).layer(Extension(identity_handle()))
}

/// Catalog whose backend is always down.
pub(super) struct UnavailableCatalog;

impl CatalogStore for UnavailableCatalog {
    fn list(&self, _owner: &UserId) -> Result<Vec<WardrobeItem>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn insert(&self, _owner: &UserId, _item: WardrobeItem) -> Result<WardrobeItem, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn fetch(&self, _owner: &UserId, _id: &ItemId) -> Result<Option<WardrobeItem>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn replace(&self, _owner: &UserId, _item: WardrobeItem) -> Result<(), CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn remove(&self, _owner: &UserId, _id: &ItemId) -> Result<bool, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

/// In-memory catalog that starts failing after a number of inserts, or on every removal.
pub(super) struct FaultyCatalog {
    pub(super) inner: MemoryCatalogStore,
    pub(super) inserts_left: Mutex<usize>,
    pub(super) fail_removals: bool,
}

impl FaultyCatalog {
    pub(super) fn new(inner: MemoryCatalogStore, inserts_left: usize, fail_removals: bool) -> Self {
        Self {
            inner,
            inserts_left: Mutex::new(inserts_left),
            fail_removals,
        }
    }
}

impl CatalogStore for FaultyCatalog {
    fn list(&self, owner: &UserId) -> Result<Vec<WardrobeItem>, CatalogError> {
        self.inner.list(owner)
    }

    fn insert(&self, owner: &UserId, item: WardrobeItem) -> Result<WardrobeItem, CatalogError> {
        let mut left = self.inserts_left.lock().unwrap();
        if *left == 0 {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }
        *left -= 1;
        self.inner.insert(owner, item)
    }

    fn fetch(&self, owner: &UserId, id: &ItemId) -> Result<Option<WardrobeItem>, CatalogError> {
        self.inner.fetch(owner, id)
    }

    fn replace(&self, owner: &UserId, item: WardrobeItem) -> Result<(), CatalogError> {
        self.inner.replace(owner, item)
    }

    fn remove(&self, owner: &UserId, id: &ItemId) -> Result<bool, CatalogError> {
        if self.fail_removals {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }
        self.inner.remove(owner, id)
    }
}
