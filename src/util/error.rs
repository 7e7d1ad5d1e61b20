//! Error types for symmatch.

use thiserror::Error;

/// Result alias for symmatch operations.
pub type SymMatchResult<T> = std::result::Result<T, SymMatchError>;

/// Errors that can occur when running the detection pipeline.
///
/// Only input validation fails a call; numerically degenerate regions inside
/// the correlation surface are absorbed as `-1.0` scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymMatchError {
    /// An image or template has a zero dimension.
    #[error("empty image: {width}x{height}")]
    EmptyImage { width: usize, height: usize },
    /// The template does not fit inside the source image.
    #[error(
        "template {template_width}x{template_height} exceeds image {image_width}x{image_height}"
    )]
    InvalidTemplateSize {
        template_width: usize,
        template_height: usize,
        image_width: usize,
        image_height: usize,
    },
    /// Dimensions overflow or disagree with the buffer length.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest falls outside the image.
    #[error("roi {x},{y} {width}x{height} out of bounds for {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
