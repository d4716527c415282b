//! Scripted uploader for tests

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{MediaError, MediaResult};
use crate::inline::InlineImage;
use crate::uploader::MediaUploader;

/// Build a PNG data URI whose decoded bytes are `payload`
pub fn inline_png(payload: &str) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(payload))
}

/// Answers the n-th upload attempt with `https://media.test/<n>.<ext>`,
/// failing any attempt whose bytes equal the configured payload.
#[derive(Debug, Default)]
pub struct FakeUploader {
    attempts: AtomicUsize,
    fail_on: Option<Vec<u8>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(payload: &[u8]) -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            fail_on: Some(payload.to_vec()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, image: &InlineImage) -> MediaResult<String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.as_deref() == Some(image.bytes.as_slice()) {
            return Err(MediaError::Upload("scripted failure".to_string()));
        }
        Ok(format!("https://media.test/{}.{}", attempt, image.extension()))
    }
}
