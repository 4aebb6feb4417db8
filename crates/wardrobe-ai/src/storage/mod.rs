//! Image object storage with expiring signed links.

mod data_url;
mod local;
pub mod router;
mod signing;

pub use data_url::DataUrl;
pub use local::LocalImageStore;
pub use router::image_router;
pub use signing::{SignedUrl, UrlSigner};

use crate::identity::UserId;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub signed_url: SignedUrl,
}

/// Raw object served back through a signed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Object store contract. Objects live under `<owner>/` and only the owner may sign or remove them.
pub trait ImageStore: Send + Sync {
    fn upload(
        &self,
        owner: &UserId,
        object_name: &str,
        image: DataUrl,
    ) -> Result<StoredImage, StorageError>;
    fn sign(&self, owner: &UserId, file_name: &str) -> Result<SignedUrl, StorageError>;
    fn remove(&self, owner: &UserId, file_name: &str) -> Result<bool, StorageError>;
    fn open(&self, file_name: &str, expires: i64, signature: &str)
        -> Result<StoredBlob, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid image data: {0}")]
    InvalidDataUrl(String),
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("image not found")]
    NotFound,
    #[error("image belongs to another account")]
    Forbidden,
    #[error("signed link expired")]
    Expired,
    #[error("signed link signature mismatch")]
    InvalidSignature,
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}
