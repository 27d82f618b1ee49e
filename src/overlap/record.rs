//! # Output records
//!
//! One [`OverlapRecord`] is produced per accepted [`OverlapHit`]. It is a plain, owned value:
//! every field is copied out of the event so the record can outlive the inputs it was built
//! from and be moved into a [`RecordSink`](crate::io::record_sink::RecordSink).
//!
//! ## Layout
//! -----------------
//! ```text
//! OverlapRecord
//! ├── event, track            origin of the pair
//! ├── track: TrackRecord      px, py, pz, pt, eta, phi, charge
//! ├── pair:  PairRecord       x, y, z, distance, shift, offset_near, offset_far, angle
//! ├── near:  HitRecord        local coordinates, amplitude window, cluster, geometry
//! └── far:   HitRecord        same shape as `near`
//! ```
//!
//! [`OverlapRecord::csv_header`] and [`OverlapRecord::csv_row`] flatten this tree into one row
//! with stable column names (`near_window_0` … `near_window_10`, `far_pitch`, …).

use serde::Serialize;

use crate::clusters::window::extract_window;
use crate::clusters::Cluster;
use crate::constants::{Centimeter, ClusterWindow, Radian, StripCoordinate, WINDOW_SIZE};
use crate::detector::descriptor::GeometryDescriptor;
use crate::measurements::{Measurement, Track};
use crate::overlap::overlap_hit::{HitSide, OverlapHit};

/// Kinematics of the track that produced the pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackRecord {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub pt: f64,
    pub eta: f64,
    pub phi: Radian,
    pub charge: i8,
}

impl From<&Track> for TrackRecord {
    fn from(track: &Track) -> Self {
        TrackRecord {
            px: track.px,
            py: track.py,
            pz: track.pz,
            pt: track.pt(),
            eta: track.eta(),
            phi: track.phi(),
            charge: track.charge,
        }
    }
}

/// Pair-level quantities, see [`OverlapHit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairRecord {
    pub x: Centimeter,
    pub y: Centimeter,
    pub z: Centimeter,
    pub distance: Centimeter,
    pub shift: Centimeter,
    pub offset_near: Centimeter,
    pub offset_far: Centimeter,
    /// Mean predicted local angle over both members.
    pub angle: Radian,
}

impl From<&OverlapHit<'_>> for PairRecord {
    fn from(pair: &OverlapHit<'_>) -> Self {
        let position = pair.position();
        PairRecord {
            x: position.x,
            y: position.y,
            z: position.z,
            distance: pair.distance(),
            shift: pair.shift(),
            offset_near: pair.offset(HitSide::Near),
            offset_far: pair.offset(HitSide::Far),
            angle: pair.local_angle(None),
        }
    }
}

/// Per-member data: hit and predicted positions, matched cluster and sensor geometry.
///
/// When no cluster was matched the window is all zeros, `cluster_size` and `first_strip` are
/// `0` and `barycenter` is `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitRecord {
    pub raw_local_x: Centimeter,
    pub predicted_local_x: Centimeter,
    pub predicted_local_y: Centimeter,
    pub cluster_window: ClusterWindow,
    pub cluster_size: usize,
    pub first_strip: u16,
    pub barycenter: StripCoordinate,
    pub geometry: GeometryDescriptor,
}

impl HitRecord {
    pub fn new(
        measurement: &Measurement,
        cluster: Option<&Cluster>,
        geometry: GeometryDescriptor,
    ) -> Self {
        let predicted = &measurement.predicted.local_position;
        let (cluster_window, cluster_size, first_strip, barycenter) = match cluster {
            Some(c) => (
                extract_window(&c.amplitudes),
                c.size(),
                c.first_strip,
                c.barycenter(),
            ),
            None => ([0; WINDOW_SIZE], 0, 0, f64::NAN),
        };

        HitRecord {
            raw_local_x: measurement.hit_local.x,
            predicted_local_x: predicted.x,
            predicted_local_y: predicted.y,
            cluster_window,
            cluster_size,
            first_strip,
            barycenter,
            geometry,
        }
    }

    /// Whether a cluster was matched on this sensor.
    pub fn has_cluster(&self) -> bool {
        self.cluster_size > 0
    }

    fn csv_columns(prefix: &str) -> impl Iterator<Item = String> + '_ {
        const SCALARS: [&str; 3] = ["raw_local_x", "predicted_local_x", "predicted_local_y"];
        const TAIL: [&str; 11] = [
            "cluster_size",
            "first_strip",
            "barycenter",
            "subdet",
            "module_geometry",
            "stereo",
            "layer",
            "side",
            "ring",
            "pitch",
            "detid",
        ];
        SCALARS
            .into_iter()
            .map(String::from)
            .chain((0..WINDOW_SIZE).map(|i| format!("window_{i}")))
            .chain(TAIL.into_iter().map(String::from))
            .map(move |name| format!("{prefix}_{name}"))
    }

    fn csv_values(&self) -> impl Iterator<Item = String> + '_ {
        let g = &self.geometry;
        [
            self.raw_local_x.to_string(),
            self.predicted_local_x.to_string(),
            self.predicted_local_y.to_string(),
        ]
        .into_iter()
        .chain(self.cluster_window.iter().map(|a| a.to_string()))
        .chain([
            self.cluster_size.to_string(),
            self.first_strip.to_string(),
            self.barycenter.to_string(),
            g.subdet.code().to_string(),
            g.module_geometry.code().to_string(),
            u8::from(g.stereo).to_string(),
            g.layer.to_string(),
            g.side.to_string(),
            g.ring.to_string(),
            g.pitch.to_string(),
            g.raw_id.raw().to_string(),
        ])
    }
}

/// One output row: a single overlap pair and its context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapRecord {
    pub event: u64,
    /// Index of the (trajectory, track) association within the event.
    pub track_index: usize,
    pub track: TrackRecord,
    pub pair: PairRecord,
    pub near: HitRecord,
    pub far: HitRecord,
}

impl OverlapRecord {
    /// Column names of the flattened row, in [`csv_row`](OverlapRecord::csv_row) order.
    pub fn csv_header() -> Vec<String> {
        const HEAD: [&str; 2] = ["event", "track"];
        const TRACK: [&str; 7] = ["px", "py", "pz", "pt", "eta", "phi", "charge"];
        const PAIR: [&str; 8] = [
            "x",
            "y",
            "z",
            "distance",
            "shift",
            "offset_near",
            "offset_far",
            "angle",
        ];

        HEAD.into_iter()
            .map(String::from)
            .chain(TRACK.into_iter().map(|c| format!("track_{c}")))
            .chain(PAIR.into_iter().map(|c| format!("pair_{c}")))
            .chain(HitRecord::csv_columns("near"))
            .chain(HitRecord::csv_columns("far"))
            .collect()
    }

    /// Flattened values of the record, aligned with [`csv_header`](OverlapRecord::csv_header).
    pub fn csv_row(&self) -> Vec<String> {
        let t = &self.track;
        let p = &self.pair;
        [self.event.to_string(), self.track_index.to_string()]
            .into_iter()
            .chain([
                t.px.to_string(),
                t.py.to_string(),
                t.pz.to_string(),
                t.pt.to_string(),
                t.eta.to_string(),
                t.phi.to_string(),
                t.charge.to_string(),
            ])
            .chain([
                p.x.to_string(),
                p.y.to_string(),
                p.z.to_string(),
                p.distance.to_string(),
                p.shift.to_string(),
                p.offset_near.to_string(),
                p.offset_far.to_string(),
                p.angle.to_string(),
            ])
            .chain(self.near.csv_values())
            .chain(self.far.csv_values())
            .collect()
    }
}
