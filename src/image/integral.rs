//! Summed-area tables for constant-time window statistics.

use crate::image::ImageView;

/// Integral images of intensities and squared intensities.
///
/// Tables are `(width + 1) x (height + 1)` with a zero first row and column,
/// so the sum over `[x, x + w) x [y, y + h)` needs four lookups.
pub(crate) struct IntegralImage {
    width: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    pub(crate) fn from_view(image: ImageView<'_, u8>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let len = stride * (height + 1);
        let mut sum = vec![0u64; len];
        let mut sum_sq = vec![0u64; len];

        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            let above = y * stride;
            let here = (y + 1) * stride;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sum_sq += v * v;
                sum[here + x + 1] = sum[above + x + 1] + row_sum;
                sum_sq[here + x + 1] = sum_sq[above + x + 1] + row_sum_sq;
            }
        }

        Self { width, sum, sum_sq }
    }

    /// Returns `(sum, sum_sq)` over the window with top-left `(x, y)`.
    #[inline]
    pub(crate) fn window(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        let stride = self.width + 1;
        let a = y * stride + x;
        let b = a + w;
        let c = (y + h) * stride + x;
        let d = c + w;
        let sum = self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c];
        let sum_sq = self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c];
        (sum, sum_sq)
    }
}
