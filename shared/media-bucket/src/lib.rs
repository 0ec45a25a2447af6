//! Object-store access shared by the resizer and the upload issuer
//!
//! The bucket is both the origin for uploaded originals and the cache for
//! resized derivatives, so both services talk to it through the same seam.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod store;
mod website;

pub use error::{BucketError, BucketResult};
pub use store::{ObjectStore, S3ObjectStore};
pub use website::{site_base_url, website_endpoint};
