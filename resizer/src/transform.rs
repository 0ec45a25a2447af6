//! Image resizing for derivatives

use std::io::Cursor;

use bytes::Bytes;
use image::{
    codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView, ImageFormat,
    ImageReader, Limits,
};
use thiserror::Error;

/// Largest source or output image accepted, in pixels (16383 x 16383)
pub const MAX_PIXELS: u64 = 268_402_689;

/// JPEG quality used when re-encoding JPEG originals
const JPEG_QUALITY: u8 = 80;

/// Lossy WebP quality used when re-encoding WebP originals
const WEBP_QUALITY: f32 = 80.0;

/// Largest width or height the WebP bitstream can represent
const WEBP_MAX_DIMENSION: u32 = 16383;

/// Errors raised while producing a derivative
#[derive(Error, Debug)]
pub enum TransformError {
    /// The original's format could not be recognised
    #[error("Input buffer contains unsupported image format")]
    UnsupportedFormat,

    /// Width or height is zero
    #[error("Expected positive integer dimensions but received {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Source or target exceeds `MAX_PIXELS`
    #[error("Image resolution {width}x{height} exceeds pixel limit")]
    ResolutionTooLarge {
        /// Offending width
        width: u32,
        /// Offending height
        height: u32,
    },

    /// Decoding the original failed
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Encoding the derivative failed
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// The blocking resize task panicked or was cancelled
    #[error("Resize task aborted: {0}")]
    Aborted(String),
}

/// A resized image ready to be stored
#[derive(Debug, Clone)]
pub struct ResizedImage {
    /// Encoded image bytes
    pub bytes: Bytes,
    /// MIME type matching `bytes`
    pub content_type: &'static str,
}

/// Resizes `input` to exactly `width` x `height`
///
/// The image is scaled preserving its aspect ratio until it covers the target
/// box, then centre-cropped to it. The output keeps the source's format.
///
/// # Errors
///
/// Returns a `TransformError` when a dimension is zero, the input is not a
/// supported image, or it cannot be decoded or re-encoded.
pub fn resize(input: &[u8], width: u32, height: u32) -> Result<ResizedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }

    let (img, format) = decode(input)?;
    let resized = cover(&img, width, height)?;
    let bytes = encode(&resized, format)?;

    Ok(ResizedImage {
        bytes: Bytes::from(bytes),
        content_type: format.to_mime_type(),
    })
}

/// Centre-crops `img` to the target aspect ratio, then scales it to exactly
/// `width` x `height`
///
/// Cropping first keeps every buffer bounded by the source and the target.
/// Resampling runs vertically first, so its working buffer is
/// `crop width x height`.
fn cover(img: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, TransformError> {
    let (crop_width, crop_height) = crop_to_aspect(img.dimensions(), (width, height));

    if u64::from(crop_width) * u64::from(height) > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: crop_width,
            height,
        });
    }

    let x = (img.width() - crop_width) / 2;
    let y = (img.height() - crop_height) / 2;

    Ok(img
        .crop_imm(x, y, crop_width, crop_height)
        .resize_exact(width, height, FilterType::Lanczos3))
}

/// Largest centred region of a `source` image with the aspect ratio of
/// `target`, never smaller than one pixel
fn crop_to_aspect(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (source_width, source_height) = (u64::from(source.0), u64::from(source.1));
    let (target_width, target_height) = (u64::from(target.0), u64::from(target.1));

    if source_width * target_height > source_height * target_width {
        // Wider than the target: keep the full height
        let crop = (source_height * target_width + target_height / 2) / target_height;
        (clamp_to(crop, source.0), source.1)
    } else {
        let crop = (source_width * target_height + target_width / 2) / target_width;
        (source.0, clamp_to(crop, source.1))
    }
}

fn clamp_to(value: u64, max: u32) -> u32 {
    u32::try_from(value).map_or(max, |v| v.clamp(1, max))
}

fn decode(input: &[u8]) -> Result<(DynamicImage, ImageFormat), TransformError> {
    let mut reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    let format = reader.format().ok_or(TransformError::UnsupportedFormat)?;

    let mut limits = Limits::default();
    limits.max_alloc = Some(MAX_PIXELS * 4);
    reader.limits(limits);

    let img = reader
        .decode()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    Ok((img, format))
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, TransformError> {
    let mut buf = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| TransformError::Encode(e.to_string()))?;
        }
        // image only ships a lossless WebP encoder
        ImageFormat::WebP => buf = encode_webp(img)?,
        _ => img
            .write_to(&mut Cursor::new(&mut buf), format)
            .map_err(|e| TransformError::Encode(e.to_string()))?,
    }

    Ok(buf)
}

fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    let (width, height) = img.dimensions();
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(TransformError::Encode(format!(
            "WebP cannot encode {width}x{height}, limit is {WEBP_MAX_DIMENSION} per side"
        )));
    }

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let encoder = webp::Encoder::from_rgba(&rgba, width, height);
        encoder.encode_simple(false, WEBP_QUALITY).map(|data| data.to_vec())
    } else {
        let rgb = img.to_rgb8();
        let encoder = webp::Encoder::from_rgb(&rgb, width, height);
        encoder.encode_simple(false, WEBP_QUALITY).map(|data| data.to_vec())
    };

    encoded.map_err(|e| TransformError::Encode(format!("WebP encode failed: {e:?}")))
}
