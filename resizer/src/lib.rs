//! Resize-on-miss handler
//!
//! The bucket is served as a static website whose routing rules redirect
//! requests for missing objects to this handler. It resizes the original,
//! stores the result under the requested `WIDTHxHEIGHT/` key and redirects
//! back, so every later request is served by the bucket directly.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Derivative generation against the bucket
pub mod derivative;

/// Parsing of size-prefixed keys
pub mod resize_request;

/// HTTP routes
#[allow(missing_docs)]
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Image resizing
pub mod transform;

/// Configuration and error types
pub mod types;
