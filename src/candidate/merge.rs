//! Strength-greedy minimum-distance merging of blobs.

use crate::candidate::blob::{sort_blobs_desc, Blob};
use crate::trace::{trace_debug, trace_event, trace_span};

/// Merges blobs whose centroids lie closer than `min_distance`.
///
/// Blobs are visited strongest first. Each unsuppressed blob is accepted and
/// suppresses every remaining blob strictly closer than `min_distance`
/// (Euclidean). Accepted blobs are returned in acceptance order, so no two of
/// them are closer than `min_distance` and re-merging the result is a no-op.
pub fn merge_blobs(mut blobs: Vec<Blob>, min_distance: f32) -> Vec<Blob> {
    let _span = trace_span!("merge_blobs", candidates = blobs.len()).entered();
    sort_blobs_desc(&mut blobs);

    let min_dist_sq = f64::from(min_distance) * f64::from(min_distance);
    let mut suppressed = vec![false; blobs.len()];
    let mut kept = Vec::new();

    for i in 0..blobs.len() {
        if suppressed[i] {
            continue;
        }
        let accepted = blobs[i];
        for j in (i + 1)..blobs.len() {
            if !suppressed[j] && accepted.distance_sq(&blobs[j]) < min_dist_sq {
                suppressed[j] = true;
                trace_debug!(
                    "blob_suppressed",
                    x = blobs[j].x,
                    y = blobs[j].y,
                    by_x = accepted.x,
                    by_y = accepted.y,
                );
            }
        }
        kept.push(accepted);
    }

    trace_event!("blobs_merged", kept = kept.len());
    kept
}
