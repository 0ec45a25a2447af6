use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{post_policy::UploadGrantIssuer, types::AppError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadUrlPath {
    /// Object key the upload is stored under
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// URL the multipart form is posted to
    pub upload_url: String,
    /// Form fields to include before the `file` part
    pub fields: BTreeMap<String, String>,
}

/// Issues a presigned POST grant for uploading `key` directly to the bucket
///
/// The grant expires after one hour, stores the object `public-read` and
/// caps its size at 10 MiB. Nothing is written to the bucket here.
///
/// # Errors
///
/// - `GrantError::Credentials` - no signing credentials could be resolved
/// - `GrantError::Signing` - the policy could not be encoded or signed
#[instrument(skip(issuer))]
pub async fn handler(
    Extension(issuer): Extension<Arc<UploadGrantIssuer>>,
    Path(UploadUrlPath { key }): Path<UploadUrlPath>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let grant = issuer.issue(&key).await?;

    tracing::info!("Issued upload grant for key: {}", key);

    Ok(Json(UploadUrlResponse {
        upload_url: grant.upload_url,
        fields: grant.fields,
    }))
}
