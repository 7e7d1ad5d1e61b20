//! Rayon-parallel scan driver (feature-gated).
//!
//! Output rows are distributed across the pool; each task owns exactly one
//! row of the surface and reads the image, integral tables and plan shared.

use crate::image::integral::IntegralImage;
use crate::image::OwnedImage;
use crate::kernel::{scan_row, Kernel};
use crate::template::TemplatePlan;
use crate::util::math::DEGENERATE_SCORE;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan.
pub(crate) fn scan_full_par<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
) -> OwnedImage<f32> {
    let out_width = image.width() - plan.width() + 1;
    let out_height = image.height() - plan.height() + 1;
    let mut surface = vec![DEGENERATE_SCORE; out_width * out_height];
    surface
        .par_chunks_mut(out_width)
        .enumerate()
        .for_each(|(y, row)| scan_row::<K>(image, integral, plan, y, row));
    OwnedImage::from_parts(surface, out_width, out_height)
}
