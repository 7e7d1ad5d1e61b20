//! Owned contiguous image buffers.

use crate::image::ImageView;
use crate::util::{SymMatchError, SymMatchResult};

/// Owned contiguous single-channel image (`stride == width`).
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> OwnedImage<T> {
    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> SymMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SymMatchError::EmptyImage { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(SymMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(SymMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SymMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub(crate) fn from_parts(data: Vec<T>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView::from_parts(&self.data, self.width, self.height, self.width)
    }
}
