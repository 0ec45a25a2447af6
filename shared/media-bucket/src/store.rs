//! Object store seam and its S3 implementation

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use tracing::{debug, error};

use crate::{BucketError, BucketResult};

/// Minimal read/write access to a single bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full body of the object stored at `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError::NotFound` when no object exists at `key`
    async fn get_object(&self, key: &str) -> BucketResult<Bytes>;

    /// Writes `body` to `key`, replacing any existing object
    ///
    /// Resolves only once the store has acknowledged persistence.
    ///
    /// # Errors
    ///
    /// Returns a `BucketError` when the upload is rejected or fails
    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> BucketResult<()>;
}

/// `ObjectStore` backed by an S3 bucket
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3ObjectStore {
    /// Creates a store bound to `bucket_name`
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket holding originals and derivatives
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Name of the bucket this store reads and writes
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        self.bucket_name.as_str()
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, key: &str) -> BucketResult<Bytes> {
        debug!("Fetching object: {}", key);

        let output = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let error = BucketError::from_get_object(key, e);
                if matches!(error, BucketError::NotFound(_)) {
                    debug!("Object does not exist: {}", key);
                } else {
                    error!("Failed to fetch object {}: {}", key, error);
                }
                error
            })?;

        let body = output.body.collect().await?.into_bytes();
        debug!("Fetched object {} ({} bytes)", key, body.len());

        Ok(body)
    }

    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> BucketResult<()> {
        let content_length = body.len();
        debug!(
            "Uploading object: {} ({} bytes, {})",
            key, content_length, content_type
        );

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to upload object {}: {}", key, e);
                BucketError::from(e)
            })?;

        debug!("Uploaded object: {}", key);
        Ok(())
    }
}
