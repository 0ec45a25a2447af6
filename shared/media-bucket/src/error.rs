//! Error types for bucket operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{get_object::GetObjectError, put_object::PutObjectError},
    primitives::ByteStreamError,
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// The requested object does not exist
    #[error("The specified key does not exist: {0}")]
    NotFound(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error (dispatch, timeout, credentials)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    /// The object body could not be read to the end
    #[error("Failed to read object body: {0}")]
    BodyError(String),
}

impl BucketError {
    /// Classifies a failed `GetObject` on `key`
    ///
    /// A `NoSuchKey` response becomes `NotFound`; everything else follows the
    /// generic SDK error mapping.
    #[must_use]
    pub fn from_get_object(key: &str, error: SdkError<GetObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) if matches!(err.err(), GetObjectError::NoSuchKey(_)) => {
                Self::NotFound(key.to_string())
            }
            other => Self::from(other),
        }
    }
}

impl From<SdkError<GetObjectError>> for BucketError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) if err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(format!("{:?}", err.err()))
            }
            SdkError::ServiceError(err) => Self::S3Error(err.err().to_string()),
            _ => Self::AwsError(error.to_string()),
        }
    }
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) if err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(format!("{:?}", err.err()))
            }
            SdkError::ServiceError(err) => Self::S3Error(err.err().to_string()),
            _ => Self::AwsError(error.to_string()),
        }
    }
}

impl From<ByteStreamError> for BucketError {
    fn from(error: ByteStreamError) -> Self {
        Self::BodyError(error.to_string())
    }
}
