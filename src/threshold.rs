//! Binarization stages.
//!
//! Both stages write 255 for foreground and 0 for background.

use crate::image::{ImageView, OwnedImage};
use crate::trace::{trace_event, trace_span};

/// Foreground value in binary images and detection masks.
pub const FOREGROUND: u8 = 255;
/// Background value in binary images and detection masks.
pub const BACKGROUND: u8 = 0;

/// Inverse-thresholds a grayscale image: pixels darker than `level` become
/// foreground.
///
/// `level = 0` produces an all-background image.
pub fn threshold_inverse(image: ImageView<'_, u8>, level: u8) -> OwnedImage<u8> {
    let _span = trace_span!("threshold", level = level).entered();
    let mut data = Vec::with_capacity(image.width() * image.height());
    for row in image.rows() {
        data.extend(row.iter().map(|&v| {
            if v < level {
                FOREGROUND
            } else {
                BACKGROUND
            }
        }));
    }
    OwnedImage::from_parts(data, image.width(), image.height())
}

/// Marks surface cells whose score reaches `min_coefficient`.
pub fn threshold_surface(surface: ImageView<'_, f32>, min_coefficient: f32) -> OwnedImage<u8> {
    let _span = trace_span!("threshold_surface", min_coefficient = min_coefficient).entered();
    let mut data = Vec::with_capacity(surface.width() * surface.height());
    let mut count = 0usize;
    for row in surface.rows() {
        for &score in row {
            if score >= min_coefficient {
                data.push(FOREGROUND);
                count += 1;
            } else {
                data.push(BACKGROUND);
            }
        }
    }
    trace_event!("mask_foreground", count = count);
    OwnedImage::from_parts(data, surface.width(), surface.height())
}

/// Counts foreground cells in a binary image.
pub fn count_foreground(mask: ImageView<'_, u8>) -> usize {
    mask.rows()
        .map(|row| row.iter().filter(|&&v| v == FOREGROUND).count())
        .sum()
}
