//! Correlation kernel implementations.
//!
//! A kernel scores one template placement. The scan drivers in [`scalar`]
//! and (with the `rayon` feature) [`rayon`] fill a whole correlation surface
//! row by row, so both produce bit-identical output.

use crate::image::integral::IntegralImage;
use crate::template::TemplatePlan;
use crate::ImageView;

/// Kernel trait for scoring a single placement.
pub(crate) trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// The caller guarantees the template fits at `(x, y)`.
    fn score_at(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> f32;
}

/// Fills one output row of the correlation surface.
pub(crate) fn scan_row<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    y: usize,
    out: &mut [f32],
) {
    for (x, cell) in out.iter_mut().enumerate() {
        *cell = K::score_at(image, integral, plan, x, y);
    }
}

/// Sums `template * window` over the placement at `(x, y)`.
#[inline]
pub(crate) fn window_dot(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> u64 {
    let data = image.as_slice();
    let stride = image.stride();
    let tpl_width = plan.width();
    let mut dot = 0u64;
    for (ty, tpl_row) in plan.data().chunks_exact(tpl_width).enumerate() {
        let start = (y + ty) * stride + x;
        let img_row = &data[start..start + tpl_width];
        dot += tpl_row
            .iter()
            .zip(img_row)
            .map(|(&t, &i)| u64::from(t) * u64::from(i))
            .sum::<u64>();
    }
    dot
}

pub(crate) mod scalar;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;
