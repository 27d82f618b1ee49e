#![allow(dead_code)]

use approx::assert_relative_eq;
use stripoverlap::clusters::{Cluster, ClusterCollection};
use stripoverlap::detector::strip_topology::StripGeometry;
use stripoverlap::detector::topology::DetIdTopology;
use stripoverlap::detector::{DetId, SensorSide, SubDetector};
use stripoverlap::measurements::{
    GlobalPoint, HitType, LocalPoint, LocalVector, Measurement, Track, Trajectory,
    TrajectoryState,
};
use stripoverlap::overlap::record::OverlapRecord;

pub const TOB_PITCH: f64 = 0.0183;
pub const TOB_STRIPS: u16 = 512;
pub const TEC_PITCH: f64 = 0.0128;
pub const TEC_STRIPS: u16 = 768;
pub const TEC_RADIUS: f64 = 40.0;

pub fn tob(layer: u32, module: u32, side: SensorSide) -> DetId {
    DetId::barrel(SubDetector::TOB, layer, module, side)
}

pub fn tec(wheel: u32, ring: u32, module: u32, side: SensorSide) -> DetId {
    DetId::disk(SubDetector::TEC, 2, wheel, ring, module, side)
}

/// Topology with a rectangular layout for TOB ids and a trapezoidal one for TEC ids.
pub fn topology(ids: &[DetId]) -> DetIdTopology {
    ids.iter()
        .map(|&id| {
            let geometry = match id.subdetector().unwrap() {
                SubDetector::TEC => StripGeometry::Trapezoidal {
                    pitch: TEC_PITCH,
                    n_strips: TEC_STRIPS,
                    radius: TEC_RADIUS,
                },
                _ => StripGeometry::Rectangular {
                    pitch: TOB_PITCH,
                    n_strips: TOB_STRIPS,
                },
            };
            (id, geometry)
        })
        .collect()
}

/// Valid measurement at global `(r·cos φ, r·sin φ, z)`, with the track predicted at
/// `predicted_x` and the hit reconstructed at `hit_x` in local coordinates.
pub fn hit(
    det_id: DetId,
    layer_seq: u32,
    r: f64,
    phi: f64,
    hit_x: f64,
    predicted_x: f64,
) -> Measurement {
    let global = GlobalPoint::new(r * phi.cos(), r * phi.sin(), 12.0);
    let predicted = TrajectoryState::new(
        LocalPoint::new(predicted_x, 1.5),
        LocalVector::new(0.1, 0.99, 0.1).normalize(),
        global,
    );
    let updated = TrajectoryState::new(
        LocalPoint::new(0.5 * (hit_x + predicted_x), 1.5),
        predicted.local_direction,
        global,
    );
    Measurement::new(
        HitType::Valid,
        det_id,
        layer_seq,
        LocalPoint::new(hit_x, 1.5),
        global,
        predicted,
        updated,
    )
}

/// Cluster whose barycenter sits on local x `x` of a rectangular TOB sensor.
pub fn tob_cluster_at(x: f64, amplitudes: Vec<u8>) -> Cluster {
    let strip = x / TOB_PITCH + TOB_STRIPS as f64 / 2.0;
    let size = amplitudes.len() as f64;
    let first = (strip - size / 2.0).round().max(0.0) as u16;
    Cluster::new(first, amplitudes)
}

pub fn track() -> Track {
    Track::new(2.0, 1.5, 0.8, -1)
}

pub fn trajectory(measurements: Vec<Measurement>) -> Trajectory {
    measurements.into_iter().collect()
}

pub fn clusters(entries: Vec<(DetId, Cluster)>) -> ClusterCollection {
    entries.into_iter().collect()
}

pub fn assert_shift_consistent(record: &OverlapRecord) {
    assert_relative_eq!(
        record.pair.shift,
        record.pair.offset_near - record.pair.offset_far,
        epsilon = 1e-15
    );
    assert_relative_eq!(
        record.pair.offset_near,
        record.near.raw_local_x - record.near.predicted_local_x,
        epsilon = 1e-15
    );
    assert_relative_eq!(
        record.pair.offset_far,
        record.far.raw_local_x - record.far.predicted_local_x,
        epsilon = 1e-15
    );
}
