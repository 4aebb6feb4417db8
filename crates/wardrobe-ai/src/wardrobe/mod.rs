//! The per-account garment catalog.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ItemCategory, ItemId, NewWardrobeItem, UnknownCategory, WardrobeItem};
pub use import::{CatalogImportError, CatalogImporter};
pub use repository::{CatalogError, CatalogStore, MemoryCatalogStore};
pub use router::wardrobe_router;
pub use service::{ItemValidationError, WardrobeService, WardrobeServiceError};
