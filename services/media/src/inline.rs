//! Inline image payloads (`data:image/...;base64,...` URIs)

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{MediaError, MediaResult};

pub const DATA_IMAGE_PREFIX: &str = "data:image/";

/// A decoded inline image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type taken from the data URI, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl InlineImage {
    /// Parse a base64 `data:image/<subtype>[;param...];base64,<payload>` URI
    pub fn parse(data_uri: &str) -> MediaResult<Self> {
        let rest = data_uri
            .strip_prefix("data:")
            .ok_or_else(|| MediaError::InvalidPayload("missing data: scheme".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| MediaError::InvalidPayload("missing payload separator".to_string()))?;

        let mut params = header.split(';');
        let content_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !content_type.starts_with("image/") || content_type.len() == "image/".len() {
            return Err(MediaError::InvalidPayload(format!(
                "not an image type: {}",
                content_type
            )));
        }

        if !params.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
            return Err(MediaError::InvalidPayload(
                "only base64 payloads are supported".to_string(),
            ));
        }

        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| MediaError::InvalidPayload(e.to_string()))?;
        if bytes.is_empty() {
            return Err(MediaError::InvalidPayload("empty payload".to_string()));
        }

        Ok(Self {
            content_type,
            bytes,
        })
    }

    /// File extension for the stored object
    pub fn extension(&self) -> String {
        let subtype = self
            .content_type
            .strip_prefix("image/")
            .unwrap_or(&self.content_type);

        match subtype {
            "jpeg" | "pjpeg" => "jpg".to_string(),
            "svg+xml" => "svg".to_string(),
            other => {
                let cleaned: String = other
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect();
                if cleaned.is_empty() {
                    "bin".to_string()
                } else {
                    cleaned
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png() {
        let image = InlineImage::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_parse_tolerates_wrapped_payload_and_extra_params() {
        let image = InlineImage::parse("data:image/JPEG;name=a.jpg;base64,aGVs\nbG8=").unwrap();
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "jpg");
    }

    #[test]
    fn test_extension_for_unusual_subtypes() {
        let svg = InlineImage {
            content_type: "image/svg+xml".to_string(),
            bytes: vec![1],
        };
        assert_eq!(svg.extension(), "svg");

        let webp = InlineImage {
            content_type: "image/webp".to_string(),
            bytes: vec![1],
        };
        assert_eq!(webp.extension(), "webp");
    }

    #[test]
    fn test_rejects_non_image_and_non_base64() {
        assert!(InlineImage::parse("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(InlineImage::parse("data:image/png,raw-bytes").is_err());
        assert!(InlineImage::parse("data:image/png;base64").is_err());
        assert!(InlineImage::parse("data:image/png;base64,!!!").is_err());
        assert!(InlineImage::parse("data:image/png;base64,").is_err());
        assert!(InlineImage::parse("https://cdn.example.com/a.png").is_err());
    }
}
