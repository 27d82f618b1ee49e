//! # Overlap analysis: parameters, pair entity, records and driver
//!
//! This module defines the [`OverlapParams`] struct and its builder, which control how the
//! overlap search screens measurements and how the analyzer handles incomplete inputs.
//!
//! Sub-modules
//! -----------------
//! * [`overlap_hit`](crate::overlap::overlap_hit) – [`OverlapHit`](crate::overlap::overlap_hit::OverlapHit),
//!   the canonical near/far pair and its derived geometry.
//! * [`record`](crate::overlap::record) – flattened output record, one per accepted pair.
//! * [`analyzer`](crate::overlap::analyzer) – per-event driver and run summary.
//!
//! ## Parameters
//! -----------------
//! | Field                   | Default | Meaning                                                       |
//! |-------------------------|---------|---------------------------------------------------------------|
//! | `outer_region_boundary` | `2`     | Subdetector codes `≤` this value are excluded (pixels).        |
//! | `check_layer_order`     | `true`  | Reject trajectories whose layer numbers decrease.              |
//! | `min_tracks`            | `0`     | Skip events with fewer track associations.                     |
//! | `require_clusters`      | `true`  | Skip pairs with a sensor without clusters (else emit zeros).   |
//!
//! ```rust
//! use stripoverlap::overlap::OverlapParams;
//!
//! let params = OverlapParams::builder()
//!     .min_tracks(2)
//!     .require_clusters(false)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.outer_region_boundary, 2);
//! ```

pub mod analyzer;
pub mod overlap_hit;
#[cfg(feature = "progress")]
pub(crate) mod progress_bar;
pub mod record;

use crate::constants::DEFAULT_OUTER_REGION_BOUNDARY;
use crate::detector::SubDetector;
use crate::overlap_errors::OverlapError;

/// Selection and robustness parameters of the overlap analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapParams {
    /// Highest subdetector code excluded from the overlap search.
    pub outer_region_boundary: u8,
    /// Fail fast on trajectories whose layer sequence numbers decrease.
    pub check_layer_order: bool,
    /// Minimum number of (trajectory, track) associations for an event to be analyzed.
    pub min_tracks: usize,
    /// Skip pairs for which a sensor has no cluster; when `false`, such pairs are emitted with
    /// an empty amplitude window.
    pub require_clusters: bool,
}

impl OverlapParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`OverlapParamsBuilder`] initialized with the default values.
    pub fn builder() -> OverlapParamsBuilder {
        OverlapParamsBuilder::new()
    }
}

impl Default for OverlapParams {
    fn default() -> Self {
        OverlapParams {
            outer_region_boundary: DEFAULT_OUTER_REGION_BOUNDARY,
            check_layer_order: true,
            min_tracks: 0,
            require_clusters: true,
        }
    }
}

/// Builder for [`OverlapParams`], with validation.
#[derive(Debug, Clone)]
pub struct OverlapParamsBuilder {
    params: OverlapParams,
}

impl Default for OverlapParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlapParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: OverlapParams::default(),
        }
    }

    pub fn outer_region_boundary(mut self, v: u8) -> Self {
        self.params.outer_region_boundary = v;
        self
    }
    pub fn check_layer_order(mut self, v: bool) -> Self {
        self.params.check_layer_order = v;
        self
    }
    pub fn min_tracks(mut self, v: usize) -> Self {
        self.params.min_tracks = v;
        self
    }
    pub fn require_clusters(mut self, v: bool) -> Self {
        self.params.require_clusters = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `outer_region_boundary < 6` – at least one strip subdetector (TEC, code 6) must stay
    ///   above the boundary, otherwise no measurement could ever be eligible.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(OverlapParams)` if the configuration is usable, `Err(OverlapError::InvalidParameter)`
    ///   otherwise.
    pub fn build(self) -> Result<OverlapParams, OverlapError> {
        let p = self.params;

        if p.outer_region_boundary >= SubDetector::TEC.code() {
            return Err(OverlapError::InvalidParameter(format!(
                "outer_region_boundary must be < {}, got {}",
                SubDetector::TEC.code(),
                p.outer_region_boundary
            )));
        }

        Ok(p)
    }
}
