//! # Event reader
//!
//! Builds [`Event`]s from two CSV tables sharing an `event` column.
//!
//! ## Measurement table
//! -----------------
//! One row per measurement. Rows are grouped by `(event, track)`; events and tracks keep the
//! order of their first appearance, measurements keep file order within their track. The
//! track kinematics (`px`, `py`, `pz`, `charge`) are read from the first row of each track.
//!
//! ```text
//! event,track,px,py,pz,charge,hit_type,det_id,layer_seq,
//! hit_local_x,hit_local_y,hit_x,hit_y,hit_z,
//! pred_local_x,pred_local_y,pred_dir_x,pred_dir_y,pred_dir_z,pred_x,pred_y,pred_z,
//! upd_local_x,upd_local_y,upd_dir_x,upd_dir_y,upd_dir_z,upd_x,upd_y,upd_z
//! ```
//!
//! `hit_type` is one of `Valid`, `Missing`, `Inactive`, `Bad`.
//!
//! ## Cluster table
//! -----------------
//! One row per cluster, amplitudes separated by `;`:
//!
//! ```text
//! event,det_id,first_strip,amplitudes
//! 1,436228134,255,1;2;9;3;0
//! ```
//!
//! Clusters of events absent from the measurement table are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use ahash::RandomState;
use camino::Utf8Path;
use log::{debug, info};
use serde::Deserialize;

use crate::clusters::Cluster;
use crate::constants::Adc;
use crate::detector::DetId;
use crate::measurements::{
    Event, GlobalPoint, HitType, LocalPoint, LocalVector, Measurement, Track, Trajectory,
    TrajectoryState,
};
use crate::overlap_errors::OverlapError;

#[derive(Debug, Deserialize)]
struct MeasurementRow {
    event: u64,
    track: u32,
    px: f64,
    py: f64,
    pz: f64,
    charge: i8,
    hit_type: HitType,
    det_id: u32,
    layer_seq: u32,
    hit_local_x: f64,
    hit_local_y: f64,
    hit_x: f64,
    hit_y: f64,
    hit_z: f64,
    pred_local_x: f64,
    pred_local_y: f64,
    pred_dir_x: f64,
    pred_dir_y: f64,
    pred_dir_z: f64,
    pred_x: f64,
    pred_y: f64,
    pred_z: f64,
    upd_local_x: f64,
    upd_local_y: f64,
    upd_dir_x: f64,
    upd_dir_y: f64,
    upd_dir_z: f64,
    upd_x: f64,
    upd_y: f64,
    upd_z: f64,
}

impl MeasurementRow {
    fn track(&self) -> Track {
        Track::new(self.px, self.py, self.pz, self.charge)
    }

    fn measurement(&self) -> Measurement {
        let predicted = TrajectoryState::new(
            LocalPoint::new(self.pred_local_x, self.pred_local_y),
            LocalVector::new(self.pred_dir_x, self.pred_dir_y, self.pred_dir_z),
            GlobalPoint::new(self.pred_x, self.pred_y, self.pred_z),
        );
        let updated = TrajectoryState::new(
            LocalPoint::new(self.upd_local_x, self.upd_local_y),
            LocalVector::new(self.upd_dir_x, self.upd_dir_y, self.upd_dir_z),
            GlobalPoint::new(self.upd_x, self.upd_y, self.upd_z),
        );
        Measurement::new(
            self.hit_type,
            DetId(self.det_id),
            self.layer_seq,
            LocalPoint::new(self.hit_local_x, self.hit_local_y),
            GlobalPoint::new(self.hit_x, self.hit_y, self.hit_z),
            predicted,
            updated,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ClusterRow {
    event: u64,
    det_id: u32,
    first_strip: u16,
    amplitudes: String,
}

/// Parse a `;`-separated amplitude list.
fn parse_amplitudes(field: &str) -> Result<Vec<Adc>, OverlapError> {
    let amplitudes = field
        .split(';')
        .map(|a| {
            a.trim().parse::<Adc>().map_err(|e| {
                OverlapError::ParsingError(format!("invalid amplitude {a:?} in {field:?}: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(amplitudes)
}

/// Read events from a measurement table and a cluster table.
///
/// Arguments
/// -----------------
/// * `measurements`: Reader over the measurement table.
/// * `clusters`: Reader over the cluster table.
///
/// Return
/// ----------
/// * The events in order of first appearance in the measurement table.
pub fn read_events_from_readers<M: Read, C: Read>(
    measurements: M,
    clusters: C,
) -> Result<Vec<Event>, OverlapError> {
    let mut events: Vec<Event> = Vec::new();
    let mut event_index: HashMap<u64, usize, RandomState> = HashMap::default();
    let mut track_index: HashMap<(u64, u32), usize, RandomState> = HashMap::default();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(measurements);
    for row in reader.deserialize::<MeasurementRow>() {
        let row = row?;

        let e = *event_index.entry(row.event).or_insert_with(|| {
            events.push(Event::new(row.event, Vec::new(), Default::default()));
            events.len() - 1
        });
        let event = &mut events[e];

        let t = *track_index.entry((row.event, row.track)).or_insert_with(|| {
            event.tracks.push((Trajectory::default(), row.track()));
            event.tracks.len() - 1
        });
        event.tracks[t].0.measurements.push(row.measurement());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(clusters);
    let mut orphans = 0usize;
    for row in reader.deserialize::<ClusterRow>() {
        let row = row?;
        let Some(&e) = event_index.get(&row.event) else {
            orphans += 1;
            continue;
        };
        let cluster = Cluster::new(row.first_strip, parse_amplitudes(&row.amplitudes)?);
        events[e].clusters.insert(DetId(row.det_id), cluster);
    }
    if orphans > 0 {
        debug!("{orphans} clusters ignored: event not in the measurement table");
    }

    Ok(events)
}

/// Read events from a measurement CSV file and a cluster CSV file.
///
/// See the [module documentation](self) for the expected columns.
pub fn read_events(
    measurements: &Utf8Path,
    clusters: &Utf8Path,
) -> Result<Vec<Event>, OverlapError> {
    let events = read_events_from_readers(File::open(measurements)?, File::open(clusters)?)?;
    info!(
        "loaded {} events ({} measurements) from {measurements}",
        events.len(),
        events.iter().map(Event::total_measurements).sum::<usize>()
    );
    Ok(events)
}
