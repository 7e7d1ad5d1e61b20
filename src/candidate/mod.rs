//! Candidate extraction and pruning.
//!
//! Connected components of the detection mask become blobs, which are then
//! merged by a strength-greedy minimum-distance pass.

pub mod blob;
pub mod merge;
