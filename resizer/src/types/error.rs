//! Error handling for the resize handler

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use media_bucket::BucketError;
use thiserror::Error;

use crate::transform::TransformError;

/// Failure of a single resize-on-miss invocation
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The requested key is not `WIDTHxHEIGHT/original`
    #[error("Invalid resize options")]
    InvalidOptions,

    /// Reading the original or writing the derivative failed
    #[error(transparent)]
    Storage(#[from] BucketError),

    /// The original could not be decoded, resized or re-encoded
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl ResizeError {
    /// HTTP status the caller receives for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidOptions => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ResizeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match status.as_u16() {
            400..=499 => tracing::warn!("Client error: {message}"),
            500..=599 => tracing::error!("Server error: {message}"),
            _ => {}
        }

        (status, message).into_response()
    }
}
