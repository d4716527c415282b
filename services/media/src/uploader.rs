//! The media host contract and entry resolution
//!
//! Gallery entries arrive either as hosted URLs or as inline payloads.
//! Resolution turns each entry into a durable URL, uploading inline
//! payloads one at a time so the output keeps the input order.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::MediaResult;
use crate::inline::{DATA_IMAGE_PREFIX, InlineImage};

/// Uploads an inline image and returns its durable URL
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, image: &InlineImage) -> MediaResult<String>;
}

/// What a stored or submitted image string refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// Already hosted somewhere, passed through untouched
    Hosted(&'a str),
    /// Inline payload that has to be uploaded
    Inline(&'a str),
    Unsupported,
}

impl<'a> ImageRef<'a> {
    pub fn classify(entry: &'a str) -> Self {
        if entry.starts_with("https://") || entry.starts_with("http://") {
            ImageRef::Hosted(entry)
        } else if entry.starts_with(DATA_IMAGE_PREFIX) {
            ImageRef::Inline(entry)
        } else {
            ImageRef::Unsupported
        }
    }
}

pub fn is_inline(entry: &str) -> bool {
    matches!(ImageRef::classify(entry), ImageRef::Inline(_))
}

/// Resolve one entry to a durable URL.
///
/// Hosted URLs pass through, inline payloads are uploaded, anything else
/// is dropped. Upload failures are logged and yield `None`.
pub async fn resolve(uploader: &dyn MediaUploader, entry: &str) -> Option<String> {
    match ImageRef::classify(entry) {
        ImageRef::Hosted(url) => Some(url.to_string()),
        ImageRef::Inline(data_uri) => {
            let image = match InlineImage::parse(data_uri) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Dropping inline image: {}", e);
                    return None;
                }
            };

            match uploader.upload(&image).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Dropping image after failed upload: {}", e);
                    None
                }
            }
        }
        ImageRef::Unsupported => {
            debug!("Ignoring image entry that is neither a URL nor a data URI");
            None
        }
    }
}

/// Resolve entries strictly in order, one upload at a time, keeping at
/// most `limit` results.
///
/// Entries past the point where `limit` results are collected are never
/// uploaded. The output order matches the input order; if uploads are ever
/// made concurrent, results must be re-sorted by input index before the
/// limit is applied.
pub async fn resolve_in_order(
    uploader: &dyn MediaUploader,
    entries: &[String],
    limit: usize,
) -> Vec<String> {
    let mut resolved = Vec::with_capacity(entries.len().min(limit));
    for entry in entries {
        if resolved.len() >= limit {
            break;
        }
        if let Some(url) = resolve(uploader, entry).await {
            resolved.push(url);
        }
    }
    resolved
}
