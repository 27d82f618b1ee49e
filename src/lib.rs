//! Overlap-hit analysis for silicon-strip trackers.
//!
//! Tracks crossing the overlapping edges of two adjacent modules of the same layer leave two
//! hits there. Comparing the residuals of both hits against the track prediction measures the
//! relative alignment of the two modules independently of a common track bias. This crate
//! finds such pairs in reconstructed trajectories, matches each hit to its strip cluster and
//! emits one flat record per pair.
//!
//! Entry point: [`OverlapAnalyzer`].

pub mod clusters;
pub mod constants;
pub mod detector;
pub mod io;
pub mod measurements;
pub mod overlap;
pub mod overlap_errors;

pub use overlap::analyzer::{OverlapAnalyzer, RunSummary, TrackOrigin};
pub use overlap::OverlapParams;
pub use overlap_errors::OverlapError;
