//! Parsing of size-prefixed derivative keys

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ResizeError;

/// `WIDTHxHEIGHT/original`, matched anywhere in the requested key
static RESIZE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)x(\d+)/(.*)").expect("Invalid regex"));

/// A derivative requested through the website redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Key of the original object the derivative is generated from
    pub original_key: String,
}

impl ResizeRequest {
    /// Parses the `key` query parameter of a redirected request
    ///
    /// # Errors
    ///
    /// Returns `ResizeError::InvalidOptions` when the key carries no
    /// `WIDTHxHEIGHT/` segment or a dimension does not fit in a `u32`
    pub fn parse(key: &str) -> Result<Self, ResizeError> {
        let captures = RESIZE_KEY_REGEX
            .captures(key)
            .ok_or(ResizeError::InvalidOptions)?;

        let width = captures[1]
            .parse::<u32>()
            .map_err(|_| ResizeError::InvalidOptions)?;
        let height = captures[2]
            .parse::<u32>()
            .map_err(|_| ResizeError::InvalidOptions)?;

        Ok(Self {
            width,
            height,
            original_key: captures[3].to_string(),
        })
    }

    /// Key the resized image is stored under
    #[must_use]
    pub fn derivative_key(&self) -> String {
        format!("{}x{}/{}", self.width, self.height, self.original_key)
    }
}
