//! # Measurements, trajectories and events
//!
//! Data model consumed by the overlap engine. Everything here is produced upstream (track
//! reconstruction, clustering) and treated as **immutable** by this crate.
//!
//! ## Overview
//! -----------------
//! * [`Measurement`] – one estimated hit of a track on a sensor: hit validity, sensor id,
//!   layer sequence number, raw hit position (local and global), and the predicted/updated
//!   [`TrajectoryState`] of the track on that sensor.
//! * [`Trajectory`] – the ordered measurements of one reconstructed track, **sorted by layer
//!   sequence number**. The sort order is an input invariant this crate relies on; it can be
//!   checked with [`Trajectory::check_layer_order`].
//! * [`Track`] – track momentum and charge, with derived `pt`, `eta`, `phi`.
//! * [`Event`] – ordered (trajectory, track) associations and the event's clusters.
//!
//! Sub-modules
//! -----------------
//! * [`filter`](crate::measurements::filter) – eligibility predicate for overlap search.
//! * [`pair_finder`](crate::measurements::pair_finder) – layer-scoped search of overlap partners.
//!
//! ## Frames & units
//! -----------------
//! * Global positions: centimeters, detector frame (z along the beam axis).
//! * Local positions: centimeters, sensor frame; `x` is the precise (strip) coordinate.
//! * Local directions: unit vectors in the sensor frame.

pub mod filter;
pub mod pair_finder;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::clusters::ClusterCollection;
use crate::constants::{Centimeter, Measurements, Radian};
use crate::detector::DetId;
use crate::overlap_errors::OverlapError;

/// Position in a sensor's local frame.
pub type LocalPoint = Vector2<f64>;
/// Direction in a sensor's local frame.
pub type LocalVector = Vector3<f64>;
/// Position in the global detector frame.
pub type GlobalPoint = Vector3<f64>;

/// Quality of a measurement's hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    Valid,
    Missing,
    Inactive,
    Bad,
}

impl HitType {
    pub fn is_valid(self) -> bool {
        self == HitType::Valid
    }
}

/// Track state on a sensor surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryState {
    pub local_position: LocalPoint,
    pub local_direction: LocalVector,
    pub global_position: GlobalPoint,
}

impl TrajectoryState {
    pub fn new(
        local_position: LocalPoint,
        local_direction: LocalVector,
        global_position: GlobalPoint,
    ) -> Self {
        TrajectoryState {
            local_position,
            local_direction,
            global_position,
        }
    }

    /// Azimuth of the local direction in the sensor plane, `atan2(dy, dx)`.
    pub fn local_phi(&self) -> Radian {
        self.local_direction.y.atan2(self.local_direction.x)
    }
}

/// Which trajectory state to read on a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    /// State propagated from the previous measurements, before this hit is used.
    Predicted,
    /// State after the Kalman update with this hit.
    Updated,
}

/// One estimated hit of a track on a detector layer.
///
/// # Fields
///
/// * `hit_type` - Validity of the hit
/// * `det_id` - Sensor the hit belongs to
/// * `layer_seq` - Sequence number of the detector layer
/// * `hit_local` - Reconstructed hit position in the sensor frame
/// * `hit_global` - Reconstructed hit position in the global frame
/// * `predicted` - Predicted trajectory state on the sensor
/// * `updated` - Updated trajectory state on the sensor
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub hit_type: HitType,
    pub det_id: DetId,
    pub layer_seq: u32,
    pub hit_local: LocalPoint,
    pub hit_global: GlobalPoint,
    pub predicted: TrajectoryState,
    pub updated: TrajectoryState,
}

impl Measurement {
    pub fn new(
        hit_type: HitType,
        det_id: DetId,
        layer_seq: u32,
        hit_local: LocalPoint,
        hit_global: GlobalPoint,
        predicted: TrajectoryState,
        updated: TrajectoryState,
    ) -> Self {
        Measurement {
            hit_type,
            det_id,
            layer_seq,
            hit_local,
            hit_global,
            predicted,
            updated,
        }
    }

    /// Transverse distance of the hit from the beam axis.
    pub fn radius(&self) -> Centimeter {
        self.hit_global.xy().norm()
    }

    pub fn state(&self, kind: StateKind) -> &TrajectoryState {
        match kind {
            StateKind::Predicted => &self.predicted,
            StateKind::Updated => &self.updated,
        }
    }
}

/// Momentum and charge of a reconstructed track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub charge: i8,
}

impl Track {
    pub fn new(px: f64, py: f64, pz: f64, charge: i8) -> Self {
        Track { px, py, pz, charge }
    }

    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity, `asinh(pz / pt)`.
    pub fn eta(&self) -> f64 {
        (self.pz / self.pt()).asinh()
    }

    pub fn phi(&self) -> Radian {
        self.py.atan2(self.px)
    }
}

/// Ordered measurements of one reconstructed track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub measurements: Measurements,
}

impl Trajectory {
    pub fn new(measurements: Measurements) -> Self {
        Trajectory { measurements }
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Check that layer sequence numbers never decrease along the trajectory.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` if the measurements are sorted, or
    ///   [`OverlapError::UnsortedMeasurements`] pointing at the first offending position.
    pub fn check_layer_order(&self) -> Result<(), OverlapError> {
        check_layer_order(&self.measurements)
    }
}

impl FromIterator<Measurement> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Trajectory {
            measurements: iter.into_iter().collect(),
        }
    }
}

/// Check that layer sequence numbers never decrease over a slice of measurements.
pub fn check_layer_order(measurements: &[Measurement]) -> Result<(), OverlapError> {
    use itertools::Itertools;

    match measurements
        .iter()
        .enumerate()
        .tuple_windows::<(_, _)>()
        .find(|((_, a), (_, b))| b.layer_seq < a.layer_seq)
    {
        Some(((_, previous), (position, found))) => Err(OverlapError::UnsortedMeasurements {
            position,
            previous: previous.layer_seq,
            found: found.layer_seq,
        }),
        None => Ok(()),
    }
}

/// One event: (trajectory, track) associations and the clusters recorded in the event.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: u64,
    pub tracks: Vec<(Trajectory, Track)>,
    pub clusters: ClusterCollection,
}

impl Event {
    pub fn new(id: u64, tracks: Vec<(Trajectory, Track)>, clusters: ClusterCollection) -> Self {
        Event {
            id,
            tracks,
            clusters,
        }
    }

    pub fn total_measurements(&self) -> usize {
        self.tracks.iter().map(|(traj, _)| traj.len()).sum()
    }
}
