//! Presigned upload grant issuer
//!
//! Hands browsers a signed S3 POST form so originals are uploaded straight
//! to the bucket without this service ever holding the bytes.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Presigned POST policies and their signing
pub mod post_policy;

/// HTTP routes
#[allow(missing_docs)]
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Configuration and error types
pub mod types;
