//! SymMatch locates every occurrence of a small symbol template inside a
//! grayscale image.
//!
//! The pipeline binarizes image and template with an inverse threshold,
//! computes a normalized cross-correlation surface, thresholds it, extracts
//! 8-connected blobs and merges them with a strength-greedy minimum-distance
//! pass. Correlation can run row-parallel via the `rayon` feature; stage
//! spans are emitted with the `tracing` feature.
//!
//! ```
//! use symmatch::{DetectConfig, Detector, ImageView, Template};
//!
//! let mut image = vec![255u8; 64 * 64];
//! for y in 10..16 {
//!     for x in 30..36 {
//!         image[y * 64 + x] = 0;
//!     }
//! }
//! let template = Template::new(vec![0u8; 36], 6, 6).unwrap();
//! let detector = Detector::new(template).with_config(DetectConfig {
//!     min_distance: 10.0,
//!     ..DetectConfig::default()
//! });
//! let found = detector
//!     .detect(ImageView::from_slice(&image, 64, 64).unwrap())
//!     .unwrap();
//! assert_eq!(found.len(), 1);
//! assert!((found[0].x - 33.0).abs() <= 1.0 && (found[0].y - 13.0).abs() <= 1.0);
//! ```

mod candidate;
pub mod image;
mod kernel;
pub mod lowlevel;
pub mod search;
pub mod template;
pub mod threshold;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage};
pub use crate::search::{detect_symbols, DetectConfig, Detection, DetectionReport, Detector, Metric};
pub use crate::template::Template;
pub use crate::util::math::DEGENERATE_SCORE;
pub use crate::util::{SymMatchError, SymMatchResult};
