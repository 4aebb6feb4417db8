use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use super::signing::{SignedUrl, UrlSigner};
use super::{DataUrl, ImageStore, StorageError, StoredBlob, StoredImage};
use crate::identity::UserId;

/// Process-local object store used by the service and tests.
pub struct LocalImageStore {
    objects: Mutex<HashMap<String, StoredBlob>>,
    signer: UrlSigner,
    max_upload_bytes: usize,
}

impl LocalImageStore {
    pub fn new(signer: UrlSigner, max_upload_bytes: usize) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            signer,
            max_upload_bytes,
        }
    }

    fn objects(&self) -> Result<MutexGuard<'_, HashMap<String, StoredBlob>>, StorageError> {
        self.objects
            .lock()
            .map_err(|_| StorageError::Unavailable("object map lock poisoned".to_string()))
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.objects()
            .map(|objects| objects.contains_key(file_name))
            .unwrap_or(false)
    }

    pub fn object_count(&self) -> usize {
        self.objects().map(|objects| objects.len()).unwrap_or(0)
    }
}

fn ensure_owner(owner: &UserId, file_name: &str) -> Result<(), StorageError> {
    match file_name.split_once('/') {
        Some((prefix, _)) if prefix == owner.0 => Ok(()),
        _ => Err(StorageError::Forbidden),
    }
}

impl ImageStore for LocalImageStore {
    fn upload(
        &self,
        owner: &UserId,
        object_name: &str,
        image: DataUrl,
    ) -> Result<StoredImage, StorageError> {
        if image.bytes.len() > self.max_upload_bytes {
            return Err(StorageError::TooLarge {
                size: image.bytes.len(),
                limit: self.max_upload_bytes,
            });
        }

        let file_name = format!("{}/{}.{}", owner.0, object_name, image.extension());
        let blob = StoredBlob {
            content_type: image.content_type().to_string(),
            bytes: image.bytes,
        };
        debug!(%file_name, size = blob.bytes.len(), "storing image object");
        self.objects()?.insert(file_name.clone(), blob);

        let signed_url = self.signer.sign(&file_name, Utc::now());
        Ok(StoredImage {
            file_name,
            signed_url,
        })
    }

    fn sign(&self, owner: &UserId, file_name: &str) -> Result<SignedUrl, StorageError> {
        ensure_owner(owner, file_name)?;
        if !self.objects()?.contains_key(file_name) {
            return Err(StorageError::NotFound);
        }
        Ok(self.signer.sign(file_name, Utc::now()))
    }

    fn remove(&self, owner: &UserId, file_name: &str) -> Result<bool, StorageError> {
        ensure_owner(owner, file_name)?;
        Ok(self.objects()?.remove(file_name).is_some())
    }

    fn open(
        &self,
        file_name: &str,
        expires: i64,
        signature: &str,
    ) -> Result<StoredBlob, StorageError> {
        self.signer
            .verify(file_name, expires, signature, Utc::now())?;
        self.objects()?
            .get(file_name)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(limit: usize) -> LocalImageStore {
        LocalImageStore::new(UrlSigner::new("secret", "http://localhost:3000", 600), limit)
    }

    fn owner() -> UserId {
        UserId("user-1".to_string())
    }

    fn png() -> DataUrl {
        DataUrl::parse("data:image/png;base64,aGVsbG8=").expect("valid data url")
    }

    fn query_value<'a>(url: &'a str, key: &str) -> &'a str {
        url.split(['?', '&'])
            .find_map(|pair| pair.strip_prefix(&format!("{key}=")))
            .expect("query parameter present")
    }

    #[test]
    fn upload_places_objects_under_the_owner() {
        let store = store(1024);
        let stored = store.upload(&owner(), "item-1", png()).expect("upload works");
        assert_eq!(stored.file_name, "user-1/item-1.png");
        assert!(store.contains("user-1/item-1.png"));

        let expires: i64 = query_value(&stored.signed_url.url, "expires")
            .parse()
            .expect("numeric expiry");
        let signature = query_value(&stored.signed_url.url, "signature");
        let blob = store
            .open(&stored.file_name, expires, signature)
            .expect("signed link opens");
        assert_eq!(blob.bytes, b"hello");
        assert_eq!(blob.content_type, "image/png");
    }

    #[test]
    fn upload_enforces_size_limit() {
        let store = store(3);
        match store.upload(&owner(), "item-1", png()) {
            Err(StorageError::TooLarge { size: 5, limit: 3 }) => {}
            other => panic!("expected size error, got {other:?}"),
        }
    }

    #[test]
    fn other_accounts_cannot_sign_or_remove() {
        let store = store(1024);
        let stored = store.upload(&owner(), "item-1", png()).expect("upload works");
        let intruder = UserId("user-2".to_string());

        assert!(matches!(
            store.sign(&intruder, &stored.file_name),
            Err(StorageError::Forbidden)
        ));
        assert!(matches!(
            store.remove(&intruder, &stored.file_name),
            Err(StorageError::Forbidden)
        ));
        assert!(store.remove(&owner(), &stored.file_name).expect("owner removes"));
        assert!(!store.remove(&owner(), &stored.file_name).expect("already gone"));
        assert!(matches!(
            store.sign(&owner(), &stored.file_name),
            Err(StorageError::NotFound)
        ));
    }
}
