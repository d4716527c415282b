//! Image hosting for the vehicle catalog
//!
//! Turns gallery entries into durable URLs: hosted URLs pass through and
//! inline `data:image` payloads are uploaded to an S3-compatible bucket.

pub mod error;
pub mod inline;
pub mod s3;
pub mod uploader;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{MediaError, MediaResult};
pub use inline::InlineImage;
pub use s3::{MediaConfig, S3Uploader};
pub use uploader::{ImageRef, MediaUploader, is_inline, resolve, resolve_in_order};
