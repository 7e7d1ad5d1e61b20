//! Template plan precomputation for normalized correlation.

use crate::image::ImageView;
use crate::util::math::scaled_variance;

/// Template samples with precomputed integer statistics.
///
/// `var_n` is the variance scaled by `n^2`; it is exactly zero for a flat
/// template, which makes the degenerate case testable without epsilons.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    data: Vec<u8>,
    sum: u64,
    sum_sq: u64,
    var_n: u128,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Self {
        let width = tpl.width();
        let height = tpl.height();
        let mut data = Vec::with_capacity(width * height);
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for row in tpl.rows() {
            for &value in row {
                let v = u64::from(value);
                sum += v;
                sum_sq += v * v;
            }
            data.extend_from_slice(row);
        }
        let var_n = scaled_variance(data.len() as u64, sum, sum_sq);

        Self {
            width,
            height,
            data,
            sum,
            sum_sq,
            var_n,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template pixels.
    pub fn count(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns the row-major template samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the sum of template samples.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Returns the sum of squared template samples.
    pub fn sum_sq(&self) -> u64 {
        self.sum_sq
    }

    /// Returns the template variance scaled by the squared pixel count.
    pub fn var_n(&self) -> u128 {
        self.var_n
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f32 {
        (self.sum as f64 / self.data.len() as f64) as f32
    }

    /// Returns true when every template sample has the same value.
    pub fn is_flat(&self) -> bool {
        self.var_n == 0
    }
}

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::image::ImageView;

    #[test]
    fn plan_matches_known_stats() {
        let data = [0u8, 1, 2, 3];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&data, 2, 2).unwrap());
        assert_eq!(plan.count(), 4);
        assert_eq!(plan.sum(), 6);
        assert_eq!(plan.sum_sq(), 14);
        assert_eq!(plan.var_n(), 20);
        assert!((plan.mean() - 1.5).abs() < 1e-6);
        assert!(!plan.is_flat());
    }

    #[test]
    fn flat_template_is_detected() {
        let data = [255u8; 9];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&data, 3, 3).unwrap());
        assert!(plan.is_flat());
    }
}
