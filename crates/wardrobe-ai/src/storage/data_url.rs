use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use super::StorageError;

/// Decoded `data:<mime>;base64,<payload>` image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: mime::Mime,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn is_data_url(raw: &str) -> bool {
        raw.starts_with("data:")
    }

    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| StorageError::InvalidDataUrl("missing data: prefix".to_string()))?;
        let (media_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| StorageError::InvalidDataUrl("expected base64 payload".to_string()))?;
        if media_type.is_empty() || payload.is_empty() {
            return Err(StorageError::InvalidDataUrl(
                "media type and payload are required".to_string(),
            ));
        }

        let mime = media_type
            .parse::<mime::Mime>()
            .map_err(|err| StorageError::InvalidDataUrl(format!("bad media type: {err}")))?;
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|err| StorageError::InvalidDataUrl(format!("bad base64 payload: {err}")))?;

        Ok(Self { mime, bytes })
    }

    /// File extension derived from the MIME subtype, e.g. `png` or `svg+xml`.
    pub fn extension(&self) -> &str {
        self.mime
            .essence_str()
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or("bin")
    }

    pub fn content_type(&self) -> &str {
        self.mime.essence_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_png_payloads() {
        let image = DataUrl::parse("data:image/png;base64,aGVsbG8=").expect("valid data url");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.content_type(), "image/png");
    }

    #[test]
    fn keeps_structured_subtypes_as_extension() {
        let image = DataUrl::parse("data:image/svg+xml;base64,PHN2Zy8+").expect("valid data url");
        assert_eq!(image.extension(), "svg+xml");
    }

    #[test]
    fn rejects_plain_urls_and_bad_payloads() {
        assert!(!DataUrl::is_data_url("https://cdn.example.com/shirt.png"));
        assert!(matches!(
            DataUrl::parse("https://cdn.example.com/shirt.png"),
            Err(StorageError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png,raw-bytes"),
            Err(StorageError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png;base64,***"),
            Err(StorageError::InvalidDataUrl(_))
        ));
    }
}
