use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// The entry looked like a data URI but could not be decoded
    #[error("Invalid inline image: {0}")]
    InvalidPayload(String),

    /// The media host refused or failed the upload
    #[error("Upload failed: {0}")]
    Upload(String),
}

pub type MediaResult<T> = Result<T, MediaError>;
