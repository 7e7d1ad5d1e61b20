//! Individual pipeline stages for custom detection flows.
//!
//! [`Detector`](crate::Detector) chains these in a fixed order; they are
//! exposed for callers that want to inspect or replace a single stage.

pub use crate::candidate::blob::{extract_blobs, Blob, BlobBounds};
pub use crate::candidate::merge::merge_blobs;
pub use crate::search::center::to_symbol_center;
pub use crate::search::correlate::{check_template_fits, correlate, correlate_template};
pub use crate::template::TemplatePlan;
pub use crate::threshold::{count_foreground, threshold_inverse, threshold_surface};
