//! Scalar reference kernels for score evaluation.

use crate::image::integral::IntegralImage;
use crate::image::OwnedImage;
use crate::kernel::{scan_row, window_dot, Kernel};
use crate::template::TemplatePlan;
use crate::util::math::{normalized_ratio, scaled_covariance, scaled_variance, DEGENERATE_SCORE};
use crate::ImageView;

/// Zero-mean normalized cross-correlation.
pub(crate) struct ZnccScalar;

/// Uncentered normalized cross-correlation (cosine similarity).
pub(crate) struct NccScalar;

impl Kernel for ZnccScalar {
    fn score_at(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> f32 {
        let var_t = plan.var_n();
        if var_t == 0 {
            return DEGENERATE_SCORE;
        }
        let n = plan.count();
        let (sum_i, sum_i2) = integral.window(x, y, plan.width(), plan.height());
        let var_i = scaled_variance(n, sum_i, sum_i2);
        if var_i == 0 {
            return DEGENERATE_SCORE;
        }

        let dot = window_dot(image, plan, x, y);
        let cov = scaled_covariance(n, dot, plan.sum(), sum_i);
        normalized_ratio(cov as f64, var_t, var_i)
    }
}

impl Kernel for NccScalar {
    fn score_at(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> f32 {
        let energy_t = u128::from(plan.sum_sq());
        let (_, sum_i2) = integral.window(x, y, plan.width(), plan.height());
        let energy_i = u128::from(sum_i2);
        if energy_t == 0 || energy_i == 0 {
            return DEGENERATE_SCORE;
        }

        let dot = window_dot(image, plan, x, y);
        normalized_ratio(dot as f64, energy_t, energy_i)
    }
}

/// Scans every valid placement sequentially.
///
/// The caller has validated that the template fits inside the image.
pub(crate) fn scan_full<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
) -> OwnedImage<f32> {
    let out_width = image.width() - plan.width() + 1;
    let out_height = image.height() - plan.height() + 1;
    let mut surface = vec![DEGENERATE_SCORE; out_width * out_height];
    for (y, row) in surface.chunks_exact_mut(out_width).enumerate() {
        scan_row::<K>(image, integral, plan, y, row);
    }
    OwnedImage::from_parts(surface, out_width, out_height)
}
