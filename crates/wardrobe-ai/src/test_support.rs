use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::identity::{
    IdentityError, IdentityHandle, IdentityProvider, Session, SignupRequest, UserId, UserProfile,
};
use crate::storage::{LocalImageStore, UrlSigner};
use crate::wardrobe::{ItemCategory, ItemId, NewWardrobeItem, WardrobeItem};

pub(crate) const PNG_DATA_URL: &str = "data:image/png;base64,aGVsbG8=";

pub(crate) fn session(user: &str) -> Session {
    Session {
        user: UserProfile {
            id: UserId(user.to_string()),
            email: format!("{user}@example.com"),
            name: user.to_string(),
        },
        access_token: format!("token-{user}"),
    }
}

/// Accepts `token-<user>` bearer tokens without any cryptography.
pub(crate) struct StaticIdentity;

impl IdentityProvider for StaticIdentity {
    fn signup(&self, _request: SignupRequest) -> Result<UserProfile, IdentityError> {
        Err(IdentityError::Unavailable("signup disabled".to_string()))
    }

    fn login(&self, _email: &str, _password: &str) -> Result<Session, IdentityError> {
        Err(IdentityError::InvalidCredentials)
    }

    fn verify(&self, access_token: &str) -> Result<Session, IdentityError> {
        access_token
            .strip_prefix("token-")
            .filter(|user| !user.is_empty())
            .map(session)
            .ok_or(IdentityError::InvalidToken)
    }
}

pub(crate) fn identity_handle() -> IdentityHandle {
    IdentityHandle::new(Arc::new(StaticIdentity))
}

pub(crate) fn image_store() -> Arc<LocalImageStore> {
    Arc::new(LocalImageStore::new(
        UrlSigner::new("test-storage-secret", "http://localhost:3000", 3600),
        1024,
    ))
}

pub(crate) fn new_item(category: ItemCategory, name: &str) -> NewWardrobeItem {
    NewWardrobeItem {
        category,
        name: name.to_string(),
        color: String::new(),
        style: String::new(),
        season: Default::default(),
        occasions: Default::default(),
        image: "https://cdn.example.com/placeholder.png".to_string(),
    }
}

pub(crate) fn item(id: &str, category: ItemCategory, style: &str, color: &str) -> WardrobeItem {
    let mut submission = new_item(category, id);
    submission.style = style.to_string();
    submission.color = color.to_string();
    submission.into_item(ItemId(id.to_string()))
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
