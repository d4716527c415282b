use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::{Client, primitives::ByteStream};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};
use crate::inline::InlineImage;
use crate::uploader::MediaUploader;

fn default_folder() -> String {
    "catalog".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub bucket: String,
    /// Base URL objects are publicly served from, e.g. a CDN in front of the bucket
    pub public_base_url: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    /// S3-compatible endpoint (MinIO, R2). Enables path-style addressing.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            bucket: "dealer-media".to_string(),
            public_base_url: "http://localhost:9000/dealer-media".to_string(),
            folder: default_folder(),
            endpoint_url: None,
            region: None,
        }
    }
}

/// Stores inline images in an S3 bucket under `<folder>/<uuid>.<ext>`
#[derive(Clone)]
pub struct S3Uploader {
    s3_client: Client,
    config: MediaConfig,
}

impl S3Uploader {
    pub fn new(s3_client: Client, config: MediaConfig) -> Self {
        Self { s3_client, config }
    }

    /// Build a client from the ambient AWS credentials chain
    pub async fn from_config(config: MediaConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        info!(
            "Media uploads go to bucket {} (folder {})",
            config.bucket, config.folder
        );
        Self::new(Client::from_conf(builder.build()), config)
    }

    fn object_key(&self, image: &InlineImage) -> String {
        let folder = self.config.folder.trim_matches('/');
        let file = format!("{}.{}", Uuid::new_v4(), image.extension());
        if folder.is_empty() {
            file
        } else {
            format!("{}/{}", folder, file)
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl MediaUploader for S3Uploader {
    async fn upload(&self, image: &InlineImage) -> MediaResult<String> {
        let key = self.object_key(image);

        self.s3_client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(image.bytes.clone()))
            .content_type(&image.content_type)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to upload {}: {}", key, DisplayErrorContext(&e));
                MediaError::Upload(e.to_string())
            })?;

        info!("Uploaded {} ({} bytes)", key, image.bytes.len());
        Ok(self.public_url(&key))
    }
}
