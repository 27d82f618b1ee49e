//! # Layer-scoped overlap pair finder (lazy)
//!
//! Streams index pairs `(first, partner)` of measurements hitting **overlapping modules of the
//! same layer**, in a single deterministic pass over a trajectory.
//!
//! ## Search rule
//! For every eligible measurement `first` (see [`is_eligible`]):
//! 1. Determine the contiguous run `[first + 1, end)` of measurements sharing its layer
//!    sequence number. The scan stops at the first differing layer number.
//! 2. Within that run, pick the **first** measurement that is eligible and whose side tag is
//!    an overlap partner of `first`'s
//!    ([`SensorSide::is_overlap_partner`](crate::detector::SensorSide::is_overlap_partner)).
//! 3. Yield `(first, partner)` if any, then move on to `first + 1`.
//!
//! A measurement can appear as the partner of one pair and as the anchor of a later pair.
//!
//! ## Preconditions
//! Measurements must be sorted by layer sequence number so that each layer forms a
//! contiguous run. The iterator itself does not check this; [`find_overlap_pairs`] does when
//! `check_layer_order` is enabled in [`OverlapParams`].
//!
//! ## Complexity
//! - Time: `O(n·w)`, `w` being the typical number of measurements per layer (small, bounded
//!   by the detector layout).
//! - Space: `O(1)`; the iterator only borrows the measurements.

use crate::measurements::filter::is_eligible;
use crate::measurements::{check_layer_order, Measurement};
use crate::overlap::overlap_hit::OverlapHit;
use crate::overlap::OverlapParams;
use crate::overlap_errors::OverlapError;

/// Lazy generator of overlap index pairs `(first, partner)` over a sorted slice of
/// measurements.
///
/// Return
/// ----------
/// * Implements `Iterator<Item = (usize, usize)>`; `first < partner` and both share the same
///   layer sequence number.
pub struct OverlapPairIndices<'a> {
    /// Measurements of one trajectory, sorted by layer.
    measurements: &'a [Measurement],
    /// Highest subdetector code excluded from the search.
    outer_region_boundary: u8,
    /// Next anchor position to examine.
    anchor: usize,
}

impl<'a> OverlapPairIndices<'a> {
    pub fn new(measurements: &'a [Measurement], outer_region_boundary: u8) -> Self {
        OverlapPairIndices {
            measurements,
            outer_region_boundary,
            anchor: 0,
        }
    }

    /// End (exclusive) of the run of measurements sharing the layer of `first`.
    fn layer_run_end(&self, first: usize) -> usize {
        let layer = self.measurements[first].layer_seq;
        self.measurements[first + 1..]
            .iter()
            .position(|m| m.layer_seq != layer)
            .map_or(self.measurements.len(), |offset| first + 1 + offset)
    }

    /// First overlap partner of `first` within its layer run, if any.
    fn partner_of(&self, first: usize) -> Option<usize> {
        let side = self.measurements[first].det_id.sensor_side();
        let end = self.layer_run_end(first);
        (first + 1..end).find(|&k| {
            let candidate = &self.measurements[k];
            is_eligible(candidate, self.outer_region_boundary)
                && side.is_overlap_partner(candidate.det_id.sensor_side())
        })
    }
}

impl Iterator for OverlapPairIndices<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.anchor < self.measurements.len() {
            let first = self.anchor;
            self.anchor += 1;

            if !is_eligible(&self.measurements[first], self.outer_region_boundary) {
                continue;
            }
            if let Some(partner) = self.partner_of(first) {
                return Some((first, partner));
            }
        }
        None
    }
}

/// Build all overlap pairs of a trajectory.
///
/// Arguments
/// -----------------
/// * `measurements`: Measurements of one trajectory, sorted by layer sequence number.
/// * `params`: Selection parameters (region boundary, layer-order check).
///
/// Return
/// ----------
/// * The overlap pairs in scan order, each canonicalized into near/far members.
///
/// Errors
/// ----------
/// * [`OverlapError::UnsortedMeasurements`] if `params.check_layer_order` is set and the
///   layer sequence numbers decrease somewhere. No pair is produced in that case.
pub fn find_overlap_pairs<'a>(
    measurements: &'a [Measurement],
    params: &OverlapParams,
) -> Result<Vec<OverlapHit<'a>>, OverlapError> {
    if params.check_layer_order {
        check_layer_order(measurements)?;
    }

    Ok(
        OverlapPairIndices::new(measurements, params.outer_region_boundary)
            .map(|(first, partner)| OverlapHit::new(&measurements[first], &measurements[partner]))
            .collect(),
    )
}
