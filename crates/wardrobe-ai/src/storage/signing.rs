use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use super::StorageError;

type HmacSha256 = Hmac<Sha256>;

/// Time-limited link to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and checks HMAC-signed object links.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    base_url: String,
    ttl: Duration,
}

impl UrlSigner {
    pub fn new(secret: impl AsRef<[u8]>, base_url: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    fn mac(&self, file_name: &str, expires: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(file_name.as_bytes());
        mac.update(b":");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    pub fn signature(&self, file_name: &str, expires: i64) -> String {
        hex::encode(self.mac(file_name, expires).finalize().into_bytes())
    }

    pub fn sign(&self, file_name: &str, now: DateTime<Utc>) -> SignedUrl {
        let expires_at = now + self.ttl;
        let expires = expires_at.timestamp();
        let signature = self.signature(file_name, expires);
        SignedUrl {
            url: format!(
                "{}/api/v1/images/{}?expires={}&signature={}",
                self.base_url, file_name, expires, signature
            ),
            expires_at: Utc.timestamp_opt(expires, 0).single().unwrap_or(expires_at),
        }
    }

    pub fn verify(
        &self,
        file_name: &str,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let provided = hex::decode(signature).ok_or(StorageError::InvalidSignature)?;
        self.mac(file_name, expires)
            .verify_slice(&provided)
            .map_err(|_| StorageError::InvalidSignature)?;
        if now.timestamp() >= expires {
            return Err(StorageError::Expired);
        }
        Ok(())
    }
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn decode(raw: &str) -> Option<Vec<u8>> {
        if raw.len() % 2 != 0 {
            return None;
        }
        (0..raw.len())
            .step_by(2)
            .map(|i| raw.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> UrlSigner {
        UrlSigner::new("storage-secret", "http://localhost:3000/", 3600)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 18, 9, 0, 0).single().expect("valid time")
    }

    #[test]
    fn signed_urls_embed_expiry_and_signature() {
        let signed = signer().sign("user-1/item-1.png", now());
        let expires = now().timestamp() + 3600;
        assert!(signed.url.starts_with(
            "http://localhost:3000/api/v1/images/user-1/item-1.png?expires="
        ));
        assert!(signed.url.contains(&format!("expires={expires}")));
        assert_eq!(signed.expires_at.timestamp(), expires);

        let signature = signer().signature("user-1/item-1.png", expires);
        assert_eq!(signature.len(), 64);
        signer()
            .verify("user-1/item-1.png", expires, &signature, now())
            .expect("fresh signature verifies");
    }

    #[test]
    fn rejects_tampered_and_expired_links() {
        let expires = now().timestamp() + 60;
        let signature = signer().signature("user-1/item-1.png", expires);

        assert!(matches!(
            signer().verify("user-2/item-1.png", expires, &signature, now()),
            Err(StorageError::InvalidSignature)
        ));
        assert!(matches!(
            signer().verify("user-1/item-1.png", expires, "zz", now()),
            Err(StorageError::InvalidSignature)
        ));
        assert!(matches!(
            signer().verify(
                "user-1/item-1.png",
                expires,
                &signature,
                now() + Duration::seconds(61)
            ),
            Err(StorageError::Expired)
        ));
    }
}
