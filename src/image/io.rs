//! Convenience helpers for moving images through the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{SymMatchError, SymMatchResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &::image::GrayImage) -> SymMatchResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &::image::GrayImage) -> SymMatchResult<OwnedImage<u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.as_raw().clone(), width, height)
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &::image::DynamicImage) -> SymMatchResult<OwnedImage<u8>> {
    let gray = img.to_luma8();
    owned_from_gray_image(&gray)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SymMatchResult<OwnedImage<u8>> {
    let img = ::image::open(path).map_err(|err| SymMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Maps a correlation surface from `[-1, 1]` onto `[0, 255]` for inspection.
pub fn surface_to_gray(surface: ImageView<'_, f32>) -> OwnedImage<u8> {
    let mut data = Vec::with_capacity(surface.width() * surface.height());
    for row in surface.rows() {
        data.extend(
            row.iter()
                .map(|&v| ((v.clamp(-1.0, 1.0) + 1.0) * 127.5).round() as u8),
        );
    }
    OwnedImage::from_parts(data, surface.width(), surface.height())
}

/// Writes a grayscale image to disk; the format follows the file extension.
pub fn save_gray_image<P: AsRef<Path>>(img: &OwnedImage<u8>, path: P) -> SymMatchResult<()> {
    let buffer =
        ::image::GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
            .ok_or(SymMatchError::InvalidDimensions {
                width: img.width(),
                height: img.height(),
            })?;
    buffer.save(path).map_err(|err| SymMatchError::ImageIo {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{owned_from_gray_image, surface_to_gray, view_from_gray_image};
    use crate::image::ImageView;

    #[test]
    fn surface_maps_unit_range_to_gray() {
        let surface = [-1.0f32, 0.0, 1.0, 2.0];
        let view = ImageView::from_slice(&surface, 4, 1).unwrap();
        let gray = surface_to_gray(view);
        assert_eq!(gray.data(), &[0u8, 128, 255, 255]);
    }

    #[test]
    fn gray_image_round_trips_through_views() {
        let buffer = ::image::GrayImage::from_raw(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let view = view_from_gray_image(&buffer).unwrap();
        assert_eq!((view.width(), view.height()), (3, 2));
        assert_eq!(view.row(1).unwrap(), &[4u8, 5, 6]);

        let owned = owned_from_gray_image(&buffer).unwrap();
        assert_eq!(owned.into_vec(), vec![1u8, 2, 3, 4, 5, 6]);
    }
}
