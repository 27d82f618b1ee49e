//! # Overlap analyzer
//!
//! [`OverlapAnalyzer`] drives the whole overlap chain for one event at a time:
//!
//! 1. Skip the event if it holds fewer than `min_tracks` (trajectory, track) associations.
//! 2. For each association, find the overlap pairs of the trajectory
//!    ([`find_overlap_pairs`]).
//! 3. For each member of a pair, match the closest cluster on its sensor ([`best_match`]),
//!    extract the amplitude window and resolve the sensor's [`GeometryDescriptor`].
//! 4. Build a fresh [`OverlapRecord`] and move it into the [`RecordSink`].
//!
//! ## Failure model
//! -----------------
//! * A pair whose sensor has no cluster is skipped (or emitted with an empty window when
//!   `require_clusters` is `false`). This is not an error.
//! * Unsorted measurements, an unknown sensor or a sink failure abort the **event**. Records
//!   are buffered per event and handed to the sink as a single
//!   [`write_batch`](RecordSink::write_batch), which is all-or-nothing, so a failed event
//!   contributes nothing.
//! * [`OverlapAnalyzer::analyze_events`] isolates failures per event: the error is logged and
//!   counted in the [`RunSummary`], and the run goes on.
//!
//! ## Progress UI (feature: `progress`)
//! -----------------
//! With the `progress` feature, `analyze_events` renders an `indicatif` progress bar with the
//! last and average event processing times.
//!
//! ## Example
//! -----------------
//! ```rust
//! use stripoverlap::clusters::cpe::BarycenterEstimator;
//! use stripoverlap::detector::topology::DetIdTopology;
//! use stripoverlap::io::record_sink::VecSink;
//! use stripoverlap::measurements::Event;
//! use stripoverlap::overlap::analyzer::OverlapAnalyzer;
//! use stripoverlap::overlap::OverlapParams;
//!
//! let topology = DetIdTopology::new();
//! let estimator = BarycenterEstimator::new(&topology);
//! let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topology, &estimator);
//!
//! let mut sink = VecSink::new();
//! let summary = analyzer.analyze_events(&[Event::default()], &mut sink);
//! assert_eq!(summary.events, 1);
//! assert!(sink.records.is_empty());
//! ```

use std::fmt;

use log::{debug, info, warn};

use crate::clusters::cpe::ClusterPositionEstimator;
use crate::clusters::matcher::best_match;
use crate::clusters::ClusterCollection;
use crate::detector::descriptor::{describe, GeometryDescriptor};
use crate::detector::topology::SensorTopology;
use crate::io::record_sink::{RecordSink, VecSink};
use crate::measurements::pair_finder::find_overlap_pairs;
use crate::measurements::{Event, Measurement, Track, Trajectory};
use crate::overlap::overlap_hit::OverlapHit;
use crate::overlap::record::{HitRecord, OverlapRecord, PairRecord, TrackRecord};
use crate::overlap::OverlapParams;
use crate::overlap_errors::OverlapError;

#[cfg(feature = "progress")]
use super::progress_bar::{event_progress_bar, EventTimer};

/// Hand every buffered record to `sink` in a single batch.
fn flush_buffer<S: RecordSink + ?Sized>(buffer: VecSink, sink: &mut S) -> Result<(), OverlapError> {
    if buffer.is_empty() {
        return Ok(());
    }
    sink.write_batch(buffer.records)
}

/// Where a trajectory comes from: event id and association index within the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackOrigin {
    pub event: u64,
    pub track_index: usize,
}

/// Pair counters of one trajectory or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PairCounts {
    found: usize,
    written: usize,
}

impl std::ops::AddAssign for PairCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.found += rhs.found;
        self.written += rhs.written;
    }
}

/// Aggregate statistics of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Events seen.
    pub events: usize,
    /// Events skipped by the `min_tracks` selection.
    pub skipped_events: usize,
    /// Events aborted by an error.
    pub failed_events: usize,
    /// Trajectories analyzed in successful events.
    pub trajectories: usize,
    /// Overlap pairs found in successful events.
    pub pairs: usize,
    /// Records handed to the sink.
    pub records: usize,
}

impl fmt::Display for RunSummary {
    /// Compact by default; multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Overlap analysis summary")?;
            writeln!(f, "------------------------")?;
            writeln!(f, "events         : {}", self.events)?;
            writeln!(f, "skipped events : {}", self.skipped_events)?;
            writeln!(f, "failed events  : {}", self.failed_events)?;
            writeln!(f, "trajectories   : {}", self.trajectories)?;
            writeln!(f, "overlap pairs  : {}", self.pairs)?;
            write!(f, "records        : {}", self.records)
        } else {
            write!(
                f,
                "events={}, skipped={}, failed={}, trajectories={}, pairs={}, records={}",
                self.events,
                self.skipped_events,
                self.failed_events,
                self.trajectories,
                self.pairs,
                self.records
            )
        }
    }
}

/// Per-event driver of the overlap analysis.
///
/// The analyzer only borrows its services; `topology` and `estimator` are read-only and can be
/// shared by several analyzers.
pub struct OverlapAnalyzer<'s, T, E>
where
    T: SensorTopology + ?Sized,
    E: ClusterPositionEstimator + ?Sized,
{
    params: OverlapParams,
    topology: &'s T,
    estimator: &'s E,
}

impl<'s, T, E> OverlapAnalyzer<'s, T, E>
where
    T: SensorTopology + ?Sized,
    E: ClusterPositionEstimator + ?Sized,
{
    pub fn new(params: OverlapParams, topology: &'s T, estimator: &'s E) -> Self {
        OverlapAnalyzer {
            params,
            topology,
            estimator,
        }
    }

    pub fn params(&self) -> &OverlapParams {
        &self.params
    }

    /// Build the per-member record, or `None` when the sensor has no cluster and clusters are
    /// required.
    fn hit_record(
        &self,
        measurement: &Measurement,
        clusters: &ClusterCollection,
    ) -> Result<Option<HitRecord>, OverlapError> {
        let candidates = clusters.on_sensor(measurement.det_id);
        let cluster = if candidates.is_empty() {
            if self.params.require_clusters {
                debug!("no cluster on sensor {}, pair skipped", measurement.det_id);
                return Ok(None);
            }
            None
        } else {
            Some(best_match(
                measurement.predicted.local_position.x,
                candidates,
                measurement.det_id,
                self.estimator,
            )?)
        };

        let geometry: GeometryDescriptor = describe(
            measurement.det_id,
            &measurement.predicted.local_position,
            self.topology,
        )?;
        Ok(Some(HitRecord::new(measurement, cluster, geometry)))
    }

    fn pair_record(
        &self,
        origin: TrackOrigin,
        track: &Track,
        pair: &OverlapHit<'_>,
        clusters: &ClusterCollection,
    ) -> Result<Option<OverlapRecord>, OverlapError> {
        let Some(near) = self.hit_record(pair.near(), clusters)? else {
            return Ok(None);
        };
        let Some(far) = self.hit_record(pair.far(), clusters)? else {
            return Ok(None);
        };

        Ok(Some(OverlapRecord {
            event: origin.event,
            track_index: origin.track_index,
            track: TrackRecord::from(track),
            pair: PairRecord::from(pair),
            near,
            far,
        }))
    }

    fn process_trajectory<S: RecordSink + ?Sized>(
        &self,
        origin: TrackOrigin,
        track: &Track,
        trajectory: &Trajectory,
        clusters: &ClusterCollection,
        sink: &mut S,
    ) -> Result<PairCounts, OverlapError> {
        let pairs = find_overlap_pairs(&trajectory.measurements, &self.params)?;
        let mut counts = PairCounts {
            found: pairs.len(),
            written: 0,
        };

        for pair in &pairs {
            if let Some(record) = self.pair_record(origin, track, pair, clusters)? {
                sink.write(record)?;
                counts.written += 1;
            }
        }
        Ok(counts)
    }

    /// Analyze one trajectory and write one record per accepted overlap pair.
    ///
    /// Arguments
    /// -----------------
    /// * `origin`: Event id and association index stamped on the records.
    /// * `track`: The track associated with `trajectory`.
    /// * `trajectory`: Measurements sorted by layer sequence number.
    /// * `clusters`: Clusters of the event, keyed by sensor.
    /// * `sink`: Destination of the records.
    ///
    /// Return
    /// ----------
    /// * The number of records written.
    ///
    /// Errors
    /// ----------
    /// * [`OverlapError::UnsortedMeasurements`] when the layer-order check is enabled and fails.
    /// * [`OverlapError::UnknownSensor`] when a paired sensor is missing from the topology.
    /// * Any sink error.
    ///
    /// The records of the trajectory reach `sink` as one batch, so a failing trajectory
    /// writes nothing.
    pub fn analyze_trajectory<S: RecordSink + ?Sized>(
        &self,
        origin: TrackOrigin,
        track: &Track,
        trajectory: &Trajectory,
        clusters: &ClusterCollection,
        sink: &mut S,
    ) -> Result<usize, OverlapError> {
        let mut buffer = VecSink::new();
        let counts = self.process_trajectory(origin, track, trajectory, clusters, &mut buffer)?;
        flush_buffer(buffer, sink)?;
        Ok(counts.written)
    }

    fn is_selected(&self, event: &Event) -> bool {
        event.tracks.len() >= self.params.min_tracks
    }

    fn process_event<S: RecordSink + ?Sized>(
        &self,
        event: &Event,
        sink: &mut S,
    ) -> Result<PairCounts, OverlapError> {
        let mut buffer = VecSink::new();
        let mut counts = PairCounts::default();

        for (track_index, (trajectory, track)) in event.tracks.iter().enumerate() {
            let origin = TrackOrigin {
                event: event.id,
                track_index,
            };
            counts += self.process_trajectory(
                origin,
                track,
                trajectory,
                &event.clusters,
                &mut buffer,
            )?;
        }

        flush_buffer(buffer, sink)?;
        Ok(counts)
    }

    /// Analyze every association of an event.
    ///
    /// Events with fewer than `min_tracks` associations produce no record. Records are
    /// forwarded to `sink` only if the whole event succeeds.
    ///
    /// Return
    /// ----------
    /// * The number of records written for this event.
    pub fn analyze_event<S: RecordSink + ?Sized>(
        &self,
        event: &Event,
        sink: &mut S,
    ) -> Result<usize, OverlapError> {
        if !self.is_selected(event) {
            debug!(
                "event {} skipped: {} tracks < min_tracks {}",
                event.id,
                event.tracks.len(),
                self.params.min_tracks
            );
            return Ok(0);
        }
        self.process_event(event, sink).map(|c| c.written)
    }

    /// Account for one event in `summary`, isolating its failure.
    fn run_one<S: RecordSink + ?Sized>(
        &self,
        event: &Event,
        sink: &mut S,
        summary: &mut RunSummary,
    ) {
        summary.events += 1;
        if !self.is_selected(event) {
            debug!("event {} skipped by min_tracks", event.id);
            summary.skipped_events += 1;
            return;
        }

        match self.process_event(event, sink) {
            Ok(counts) => {
                summary.trajectories += event.tracks.len();
                summary.pairs += counts.found;
                summary.records += counts.written;
            }
            Err(err) => {
                warn!("event {} failed: {err}", event.id);
                summary.failed_events += 1;
            }
        }
    }

    /// Analyze a batch of events, isolating failures per event.
    ///
    /// Arguments
    /// -----------------
    /// * `events`: The events to analyze, in order.
    /// * `sink`: Destination of the records of all successful events.
    ///
    /// Return
    /// ----------
    /// * A [`RunSummary`] with event, trajectory, pair and record counts.
    ///
    /// See also
    /// ------------
    /// * [`analyze_event`](OverlapAnalyzer::analyze_event) – Single-event variant returning
    ///   the error.
    #[cfg(not(feature = "progress"))]
    pub fn analyze_events<'e, I, S>(&self, events: I, sink: &mut S) -> RunSummary
    where
        I: IntoIterator<Item = &'e Event>,
        S: RecordSink + ?Sized,
    {
        let mut summary = RunSummary::default();
        for event in events {
            self.run_one(event, sink, &mut summary);
        }
        info!("overlap analysis done: {summary}");
        summary
    }

    #[cfg(feature = "progress")]
    pub fn analyze_events<'e, I, S>(&self, events: I, sink: &mut S) -> RunSummary
    where
        I: IntoIterator<Item = &'e Event>,
        S: RecordSink + ?Sized,
    {
        let events = events.into_iter();
        let pb = event_progress_bar(events.size_hint().1.unwrap_or(0) as u64);
        let mut timer = EventTimer::default();

        let mut summary = RunSummary::default();
        for event in events {
            timer.time(|| self.run_one(event, sink, &mut summary));
            pb.set_message(timer.message());
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!("overlap analysis done: {summary}");
        summary
    }
}

#[cfg(test)]
mod test_analyzer {
    use super::*;
    use crate::clusters::cpe::BarycenterEstimator;
    use crate::clusters::Cluster;
    use crate::detector::strip_topology::StripGeometry;
    use crate::detector::topology::DetIdTopology;
    use crate::detector::{DetId, SensorSide, SubDetector};
    use crate::measurements::test_fixtures::measurement;
    use crate::measurements::HitType;
    use approx::assert_relative_eq;

    const PITCH: f64 = 0.01;
    const N_STRIPS: u16 = 512;

    fn topology_for(ids: &[DetId]) -> DetIdTopology {
        ids.iter()
            .map(|&id| {
                (
                    id,
                    StripGeometry::Rectangular {
                        pitch: PITCH,
                        n_strips: N_STRIPS,
                    },
                )
            })
            .collect()
    }

    /// Trajectory with one mono overlap pair on layer 5 (two distinct modules).
    fn overlap_trajectory() -> (Trajectory, DetId, DetId) {
        let mut a = measurement(5, SensorSide::Mono, 60.0, 0.004, 0.0);
        let mut b = measurement(5, SensorSide::Mono, 60.8, -0.012, -0.01);
        a.det_id = DetId::barrel(SubDetector::TOB, 5, 10, SensorSide::Mono);
        b.det_id = DetId::barrel(SubDetector::TOB, 5, 11, SensorSide::Mono);
        let (ida, idb) = (a.det_id, b.det_id);
        let other = measurement(6, SensorSide::Stereo, 70.0, 0.0, 0.0);
        ([a, b, other].into_iter().collect(), ida, idb)
    }

    fn clusters_for(ida: DetId, idb: DetId) -> ClusterCollection {
        // strip 256 is the sensor center: local x = (strip - 256) * PITCH
        [
            (ida, Cluster::new(255, vec![1, 2, 9, 3, 0])),
            (ida, Cluster::new(300, vec![0, 1, 1])),
            (idb, Cluster::new(254, vec![20, 40, 20])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_end_to_end_single_pair() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);

        let event = Event::new(
            7,
            vec![(trajectory, Track::new(1.0, 0.5, 2.0, 1))],
            clusters_for(ida, idb),
        );
        let mut sink = VecSink::new();
        assert_eq!(analyzer.analyze_event(&event, &mut sink).unwrap(), 1);

        let rec = &sink.records[0];
        assert_eq!(rec.event, 7);
        assert_eq!(rec.track_index, 0);
        assert_eq!(rec.near.geometry.raw_id, ida);
        assert_eq!(rec.far.geometry.raw_id, idb);
        assert_eq!(rec.near.cluster_window[3..8], [1, 2, 9, 3, 0]);
        assert_eq!(rec.near.first_strip, 255);
        assert_eq!(rec.far.cluster_window[4..7], [20, 40, 20]);
        assert_relative_eq!(rec.pair.offset_near, 0.004);
        assert_relative_eq!(rec.pair.offset_far, -0.002, epsilon = 1e-12);
        assert_relative_eq!(rec.pair.shift, 0.006, epsilon = 1e-12);
        assert_relative_eq!(rec.near.geometry.pitch, PITCH);
        assert_eq!(rec.near.geometry.ring, 0);
        assert_relative_eq!(rec.track.pt, 1.25_f64.sqrt());
    }

    #[test]
    fn test_missing_clusters_skip_or_zero_fill() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let clusters: ClusterCollection = [(ida, Cluster::new(255, vec![5]))]
            .into_iter()
            .collect();
        let event = Event::new(1, vec![(trajectory, Track::new(1.0, 0.0, 0.0, -1))], clusters);

        let strict = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);
        let mut sink = VecSink::new();
        assert_eq!(strict.analyze_event(&event, &mut sink).unwrap(), 0);

        let lenient_params = OverlapParams::builder()
            .require_clusters(false)
            .build()
            .unwrap();
        let lenient = OverlapAnalyzer::new(lenient_params, &topo, &cpe);
        assert_eq!(lenient.analyze_event(&event, &mut sink).unwrap(), 1);
        assert!(sink.records[0].near.has_cluster());
        assert!(!sink.records[0].far.has_cluster());
        assert!(sink.records[0].far.barycenter.is_nan());
    }

    #[test]
    fn test_unknown_sensor_fails_the_event() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);
        let event = Event::new(
            3,
            vec![(trajectory, Track::new(1.0, 0.0, 0.0, 1))],
            clusters_for(ida, idb),
        );

        let mut sink = VecSink::new();
        assert_eq!(
            analyzer.analyze_event(&event, &mut sink).unwrap_err(),
            OverlapError::UnknownSensor(idb)
        );
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_batch_isolates_failures_and_counts() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let params = OverlapParams::builder().min_tracks(1).build().unwrap();
        let analyzer = OverlapAnalyzer::new(params, &topo, &cpe);

        let track = Track::new(1.0, 0.0, 0.0, 1);
        let good = Event::new(1, vec![(trajectory.clone(), track)], clusters_for(ida, idb));
        let empty = Event::new(2, vec![], ClusterCollection::new());
        let unsorted: Trajectory = [
            measurement(6, SensorSide::Mono, 70.0, 0.0, 0.0),
            measurement(5, SensorSide::Mono, 60.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect();
        let bad = Event::new(
            3,
            vec![(trajectory.clone(), track), (unsorted, track)],
            clusters_for(ida, idb),
        );
        let again = Event::new(4, vec![(trajectory, track)], clusters_for(ida, idb));

        let mut sink = VecSink::new();
        let summary = analyzer.analyze_events([&good, &empty, &bad, &again], &mut sink);

        assert_eq!(
            summary,
            RunSummary {
                events: 4,
                skipped_events: 1,
                failed_events: 1,
                trajectories: 2,
                pairs: 2,
                records: 2,
            }
        );
        // the failed event left nothing behind
        let events: Vec<u64> = sink.records.iter().map(|r| r.event).collect();
        assert_eq!(events, vec![1, 4]);
    }

    /// Sink holding at most `capacity` records, rejecting any batch that would overflow.
    struct CappedSink {
        capacity: usize,
        batches: usize,
        records: Vec<OverlapRecord>,
    }

    impl CappedSink {
        fn new(capacity: usize) -> Self {
            CappedSink {
                capacity,
                batches: 0,
                records: Vec::new(),
            }
        }
    }

    impl RecordSink for CappedSink {
        fn write_batch(&mut self, mut records: Vec<OverlapRecord>) -> Result<(), OverlapError> {
            if self.records.len() + records.len() > self.capacity {
                return Err(OverlapError::IoError(std::io::Error::other("sink full")));
            }
            self.batches += 1;
            self.records.append(&mut records);
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_drops_the_whole_event() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);

        let track = Track::new(1.0, 0.0, 0.0, 1);
        let two_pairs = Event::new(
            1,
            vec![(trajectory.clone(), track), (trajectory.clone(), track)],
            clusters_for(ida, idb),
        );
        let one_pair = Event::new(2, vec![(trajectory, track)], clusters_for(ida, idb));

        let mut sink = CappedSink::new(1);
        let summary = analyzer.analyze_events([&two_pairs, &one_pair], &mut sink);

        assert_eq!(summary.failed_events, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.records, sink.records.len());
        assert_eq!(sink.records[0].event, 2);
        assert_eq!(sink.batches, 1);

        let mut sink = CappedSink::new(1);
        assert!(analyzer.analyze_event(&two_pairs, &mut sink).is_err());
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_sink_failure_after_a_good_event() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);

        let track = Track::new(1.0, 0.0, 0.0, 1);
        let first = Event::new(
            1,
            vec![(trajectory.clone(), track), (trajectory.clone(), track)],
            clusters_for(ida, idb),
        );
        let second = Event::new(2, vec![(trajectory, track)], clusters_for(ida, idb));

        // the second batch overflows
        let mut sink = CappedSink::new(2);
        let summary = analyzer.analyze_events([&first, &second], &mut sink);

        assert_eq!(summary.failed_events, 1);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.records, sink.records.len());
        assert!(sink.records.iter().all(|r| r.event == 1));
    }

    #[test]
    fn test_trajectory_records_are_one_batch() {
        let (trajectory, ida, idb) = overlap_trajectory();
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);

        let mut sink = CappedSink::new(0);
        let result = analyzer.analyze_trajectory(
            TrackOrigin::default(),
            &Track::new(1.0, 0.0, 0.0, 1),
            &trajectory,
            &clusters_for(ida, idb),
            &mut sink,
        );
        assert!(matches!(result, Err(OverlapError::IoError(_))));
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_invalid_hits_never_pair() {
        let (mut trajectory, ida, idb) = overlap_trajectory();
        trajectory.measurements[1].hit_type = HitType::Inactive;
        let topo = topology_for(&[ida, idb]);
        let cpe = BarycenterEstimator::new(&topo);
        let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);

        let mut sink = VecSink::new();
        let written = analyzer
            .analyze_trajectory(
                TrackOrigin::default(),
                &Track::new(1.0, 0.0, 0.0, 1),
                &trajectory,
                &clusters_for(ida, idb),
                &mut sink,
            )
            .unwrap();
        assert_eq!(written, 0);
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            events: 10,
            skipped_events: 1,
            failed_events: 2,
            trajectories: 30,
            pairs: 12,
            records: 11,
        };
        assert_eq!(
            summary.to_string(),
            "events=10, skipped=1, failed=2, trajectories=30, pairs=12, records=11"
        );
        let pretty = format!("{summary:#}");
        assert!(pretty.starts_with("Overlap analysis summary"));
        assert!(pretty.ends_with("records        : 11"));
    }
}
