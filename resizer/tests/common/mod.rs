// Not every helper is used in every test, so we allow dead code
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use media_bucket::{BucketError, BucketResult, ObjectStore};
use resizer::{derivative::DerivativeGenerator, server};
use tower::ServiceExt;

pub const SITE_BASE_URL: &str = "http://photos.s3-website.eu-central-1.amazonaws.com";

/// Storage call observed by `RecordingStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(String),
    Put { key: String, content_type: String },
}

/// In-memory bucket that records every call made against it
#[derive(Default)]
pub struct RecordingStore {
    objects: Mutex<HashMap<String, Bytes>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_uploads: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads are always rejected
    pub fn rejecting_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, body: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::from(body));
    }

    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, StoreCall::Put { .. }))
            .collect()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn get_object(&self, key: &str) -> BucketResult<Bytes> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Get(key.to_string()));

        self.object(key)
            .ok_or_else(|| BucketError::NotFound(key.to_string()))
    }

    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> BucketResult<()> {
        self.calls.lock().unwrap().push(StoreCall::Put {
            key: key.to_string(),
            content_type: content_type.to_string(),
        });

        if self.fail_uploads {
            return Err(BucketError::S3Error("Access Denied".to_string()));
        }

        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }
}

/// Router wired to `store`, the way `main` wires it to S3
pub fn test_router(store: Arc<RecordingStore>) -> Router {
    let generator = Arc::new(DerivativeGenerator::new(store, SITE_BASE_URL));
    server::router(generator)
}

/// Encodes a gradient test image of the given size
pub fn sample_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

/// Sends `GET <uri>` through the router
pub async fn send_get_request(router: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

/// Collects a response body into a string
pub async fn body_string(response: Response) -> String {
    use http_body_util::BodyExt;

    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
