//! Connected-component extraction over a detection mask.

use std::cmp::Ordering;

use crate::threshold::FOREGROUND;
use crate::trace::{trace_event, trace_span};
use crate::util::{SymMatchError, SymMatchResult};
use crate::ImageView;

/// Axis-aligned bounds of a blob in surface coordinates (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobBounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BlobBounds {
    /// Width of the bounds in cells.
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Height of the bounds in cells.
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// A maximal 8-connected set of foreground mask cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Centroid column (mean of member x coordinates).
    pub x: f32,
    /// Centroid row (mean of member y coordinates).
    pub y: f32,
    /// Highest correlation score among member cells.
    pub strength: f32,
    /// Number of member cells.
    pub area: usize,
    /// Bounding box of the member cells.
    pub bounds: BlobBounds,
}

impl Blob {
    /// Squared Euclidean distance between two centroids.
    pub fn distance_sq(&self, other: &Blob) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx * dx + dy * dy
    }
}

/// Orders blobs strongest first; equal strength falls back to centroid row,
/// then column, then larger area.
pub(crate) fn blob_cmp_desc(a: &Blob, b: &Blob) -> Ordering {
    b.strength
        .total_cmp(&a.strength)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| b.area.cmp(&a.area))
}

/// Sorts blobs by descending strength with deterministic tie-breaking.
pub(crate) fn sort_blobs_desc(blobs: &mut [Blob]) {
    blobs.sort_by(blob_cmp_desc);
}

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Extracts 8-connected blobs from `mask`, scoring them against `surface`.
///
/// Blobs are returned in raster order of their first (top-most, then
/// left-most) cell. An empty mask yields an empty vector.
pub fn extract_blobs(
    mask: ImageView<'_, u8>,
    surface: ImageView<'_, f32>,
) -> SymMatchResult<Vec<Blob>> {
    if mask.width() != surface.width() || mask.height() != surface.height() {
        return Err(SymMatchError::InvalidInput(
            "mask and correlation surface dimensions differ",
        ));
    }
    let _span = trace_span!("extract_blobs").entered();

    let width = mask.width();
    let height = mask.height();
    let is_foreground = |x: usize, y: usize| mask.get(x, y).is_some_and(|&v| v == FOREGROUND);
    let mut visited = vec![false; width * height];
    let mut stack = Vec::new();
    let mut blobs = Vec::new();

    for y0 in 0..height {
        for x0 in 0..width {
            if visited[y0 * width + x0] || !is_foreground(x0, y0) {
                continue;
            }

            visited[y0 * width + x0] = true;
            stack.push((x0, y0));
            let mut sum_x = 0u64;
            let mut sum_y = 0u64;
            let mut area = 0usize;
            let mut strength = f32::NEG_INFINITY;
            let mut bounds = BlobBounds {
                min_x: x0,
                min_y: y0,
                max_x: x0,
                max_y: y0,
            };

            while let Some((x, y)) = stack.pop() {
                sum_x += x as u64;
                sum_y += y as u64;
                area += 1;
                if let Some(&score) = surface.get(x, y) {
                    strength = strength.max(score);
                }
                bounds.min_x = bounds.min_x.min(x);
                bounds.min_y = bounds.min_y.min(y);
                bounds.max_x = bounds.max_x.max(x);
                bounds.max_y = bounds.max_y.max(y);

                for (dx, dy) in NEIGHBORS_8 {
                    let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let idx = ny * width + nx;
                    if visited[idx] || !is_foreground(nx, ny) {
                        continue;
                    }
                    visited[idx] = true;
                    stack.push((nx, ny));
                }
            }

            blobs.push(Blob {
                x: (sum_x as f64 / area as f64) as f32,
                y: (sum_y as f64 / area as f64) as f32,
                strength,
                area,
                bounds,
            });
        }
    }

    trace_event!("blobs_extracted", count = blobs.len());
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> (Vec<u8>, usize, usize) {
        let height = rows.len();
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| if b == b'#' { 255 } else { 0 }))
            .collect();
        (data, width, height)
    }

    fn extract(rows: &[&str]) -> Vec<Blob> {
        let (mask, width, height) = mask_from_rows(rows);
        let surface = vec![0.5f32; width * height];
        extract_blobs(
            ImageView::from_slice(&mask, width, height).unwrap(),
            ImageView::from_slice(&surface, width, height).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn empty_mask_has_no_blobs() {
        assert!(extract(&["....", "....", "...."]).is_empty());
    }

    #[test]
    fn single_cell_is_one_blob() {
        let blobs = extract(&["....", "..#.", "...."]);
        assert_eq!(blobs.len(), 1);
        assert_eq!((blobs[0].x, blobs[0].y, blobs[0].area), (2.0, 1.0, 1));
        assert!((blobs[0].strength - 0.5).abs() < 1e-6);
    }

    #[test]
    fn diagonal_cells_are_connected() {
        let blobs = extract(&["#...", ".#..", "..#."]);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 3);
        assert_eq!((blobs[0].x, blobs[0].y), (1.0, 1.0));
        assert_eq!(blobs[0].bounds.width(), 3);
        assert_eq!(blobs[0].bounds.height(), 3);
    }

    #[test]
    fn separated_regions_are_distinct_blobs() {
        let blobs = extract(&["##..#", "##...", ".....", "...##"]);
        assert_eq!(blobs.len(), 3);
        assert_eq!((blobs[0].x, blobs[0].y), (0.5, 0.5));
        assert_eq!((blobs[1].x, blobs[1].y), (4.0, 0.0));
        assert_eq!((blobs[2].x, blobs[2].y), (3.5, 3.0));
    }

    #[test]
    fn u_shape_is_one_blob() {
        let blobs = extract(&["#.#", "#.#", "###"]);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 7);
    }

    #[test]
    fn strength_is_member_maximum() {
        let mask = [255u8, 255, 0, 0];
        let surface = [0.81f32, 0.97, 0.99, -1.0];
        let blobs = extract_blobs(
            ImageView::from_slice(&mask, 2, 2).unwrap(),
            ImageView::from_slice(&surface, 2, 2).unwrap(),
        )
        .unwrap();
        assert_eq!(blobs.len(), 1);
        assert!((blobs[0].strength - 0.97).abs() < 1e-6);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let mask = [0u8; 4];
        let surface = [0.0f32; 6];
        let err = extract_blobs(
            ImageView::from_slice(&mask, 2, 2).unwrap(),
            ImageView::from_slice(&surface, 3, 2).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, SymMatchError::InvalidInput(_)));
    }

    #[test]
    fn ordering_prefers_strength_then_position() {
        let bounds = BlobBounds {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
        };
        let weak = Blob {
            x: 0.0,
            y: 0.0,
            strength: 0.8,
            area: 1,
            bounds,
        };
        let strong_low = Blob {
            x: 5.0,
            y: 9.0,
            strength: 0.9,
            area: 1,
            bounds,
        };
        let strong_high = Blob {
            y: 2.0,
            ..strong_low
        };
        let mut blobs = vec![weak, strong_low, strong_high];
        sort_blobs_desc(&mut blobs);
        assert_eq!(blobs, vec![strong_high, strong_low, weak]);
    }
}
