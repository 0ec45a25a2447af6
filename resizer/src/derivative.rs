//! Resize-on-miss: generate a derivative from its original and store it

use std::sync::Arc;

use media_bucket::ObjectStore;
use tracing::{info, instrument};

use crate::{
    resize_request::ResizeRequest,
    transform::{self, TransformError},
    types::ResizeError,
};

/// Produces derivatives and stores them back into the bucket
///
/// Two concurrent misses on the same key both regenerate and both write; the
/// last upload wins and every upload is a complete image.
pub struct DerivativeGenerator {
    store: Arc<dyn ObjectStore>,
    site_base_url: String,
}

impl DerivativeGenerator {
    /// Creates a generator writing into `store`
    ///
    /// # Arguments
    ///
    /// * `store` - Bucket holding originals and derivatives
    /// * `site_base_url` - Public base URL the bucket's objects are served from
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, site_base_url: impl Into<String>) -> Self {
        Self {
            store,
            site_base_url: site_base_url.into(),
        }
    }

    /// Public URL of a stored object
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.site_base_url)
    }

    /// Reads the original, resizes it and writes the derivative
    ///
    /// Returns the public URL of the derivative once the upload is persisted.
    ///
    /// # Errors
    ///
    /// - `ResizeError::Storage` when the original cannot be read or the derivative cannot be written
    /// - `ResizeError::Transform` when the original cannot be resized
    #[instrument(skip(self), fields(original_key = %request.original_key))]
    pub async fn generate(&self, request: &ResizeRequest) -> Result<String, ResizeError> {
        let derivative_key = request.derivative_key();

        let original = self.store.get_object(&request.original_key).await?;

        let (width, height) = (request.width, request.height);
        let resized = tokio::task::spawn_blocking(move || transform::resize(&original, width, height))
            .await
            .map_err(|e| TransformError::Aborted(e.to_string()))??;

        self.store
            .put_object(&derivative_key, resized.content_type, resized.bytes)
            .await?;

        let location = self.public_url(&derivative_key);
        info!(
            derivative_key = %derivative_key,
            location = %location,
            "Stored derivative"
        );

        Ok(location)
    }
}
