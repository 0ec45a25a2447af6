use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{derivative::DerivativeGenerator, resize_request::ResizeRequest, types::ResizeError};

#[derive(Debug, Deserialize)]
pub struct ResizeQuery {
    /// Requested path relative to the bucket: `WIDTHxHEIGHT/original`
    pub key: Option<String>,
}

/// Generates a missing derivative and redirects the client to it
///
/// The bucket's website routing rules send requests for absent objects here,
/// so a successful response always points the client back at the bucket,
/// where the derivative now exists.
///
/// # Errors
///
/// - `ResizeError::InvalidOptions` (400) - missing key or no `WIDTHxHEIGHT/` segment
/// - `ResizeError::Storage` (500) - original missing or upload failed
/// - `ResizeError::Transform` (500) - original could not be resized
#[instrument(skip(generator, query))]
pub async fn handler(
    Extension(generator): Extension<Arc<DerivativeGenerator>>,
    query: Result<Query<ResizeQuery>, QueryRejection>,
) -> Result<Response, ResizeError> {
    let key = query
        .ok()
        .and_then(|Query(query)| query.key)
        .ok_or(ResizeError::InvalidOptions)?;

    tracing::info!("Resize requested for key: {}", key);

    let request = ResizeRequest::parse(&key)?;
    let location = generator.generate(&request).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location)],
        "",
    )
        .into_response())
}
