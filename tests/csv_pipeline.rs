mod common;

use std::fmt::Write as _;
use std::fs;

use camino::Utf8PathBuf;
use common::*;

use stripoverlap::clusters::cpe::BarycenterEstimator;
use stripoverlap::detector::{DetId, SensorSide};
use stripoverlap::io::event_reader::read_events;
use stripoverlap::io::geometry_reader::read_geometry;
use stripoverlap::io::record_sink::CsvRecordSink;
use stripoverlap::{OverlapAnalyzer, OverlapParams, RunSummary};

const MEASUREMENT_HEADER: &str = "event,track,px,py,pz,charge,hit_type,det_id,layer_seq,\
hit_local_x,hit_local_y,hit_x,hit_y,hit_z,\
pred_local_x,pred_local_y,pred_dir_x,pred_dir_y,pred_dir_z,pred_x,pred_y,pred_z,\
upd_local_x,upd_local_y,upd_dir_x,upd_dir_y,upd_dir_z,upd_x,upd_y,upd_z";

fn measurement_row(
    event: u64,
    id: DetId,
    layer_seq: u32,
    r: f64,
    hit_x: f64,
    pred_x: f64,
) -> String {
    format!(
        "{event},0,2.0,1.5,0.8,1,Valid,{raw},{layer_seq},\
{hit_x},1.5,{r},0,12,\
{pred_x},1.5,0.1,0.99,0.1,{r},0,12,\
{pred_x},1.5,0.1,0.99,0.1,{r},0,12",
        raw = id.raw()
    )
}

struct Files {
    _dir: tempfile::TempDir,
    geometry: Utf8PathBuf,
    measurements: Utf8PathBuf,
    clusters: Utf8PathBuf,
    output: Utf8PathBuf,
}

fn write_inputs() -> Files {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

    let a = tob(2, 1, SensorSide::Mono);
    let b = tob(2, 2, SensorSide::Mono);
    let c = tob(4, 1, SensorSide::Stereo);
    let d = tob(4, 2, SensorSide::Stereo);

    let mut geometry = String::from("raw_id,kind,pitch,n_strips,radius\n");
    for id in [a, b, c, d] {
        writeln!(geometry, "{},rectangular,{TOB_PITCH},{TOB_STRIPS},", id.raw()).unwrap();
    }

    let mut measurements = String::from(MEASUREMENT_HEADER);
    for row in [
        measurement_row(1, a, 2, 60.0, 0.31, 0.30),
        measurement_row(1, b, 2, 60.4, -0.52, -0.50),
        measurement_row(2, c, 4, 80.0, 0.05, 0.05),
        measurement_row(2, d, 4, 80.2, 0.07, 0.06),
    ] {
        measurements.push('\n');
        measurements.push_str(&row);
    }
    measurements.push('\n');

    // event 2 has no cluster on `d`
    let clusters = format!(
        "event,det_id,first_strip,amplitudes\n\
1,{a},272,10;55;20\n\
1,{b},227,8;31;48;12\n\
2,{c},258,40\n",
        a = a.raw(),
        b = b.raw(),
        c = c.raw()
    );

    let files = Files {
        geometry: root.join("geometry.csv"),
        measurements: root.join("measurements.csv"),
        clusters: root.join("clusters.csv"),
        output: root.join("overlaps.csv"),
        _dir: dir,
    };
    fs::write(&files.geometry, geometry).unwrap();
    fs::write(&files.measurements, measurements).unwrap();
    fs::write(&files.clusters, clusters).unwrap();
    files
}

#[test]
fn test_csv_round_trip() {
    let files = write_inputs();

    let topo = read_geometry(&files.geometry).unwrap();
    assert_eq!(topo.len(), 4);
    let events = read_events(&files.measurements, &files.clusters).unwrap();
    assert_eq!(events.len(), 2);

    let cpe = BarycenterEstimator::new(&topo);
    let analyzer = OverlapAnalyzer::new(OverlapParams::default(), &topo, &cpe);
    let mut sink = CsvRecordSink::create(&files.output).unwrap();
    let summary = analyzer.analyze_events(&events, &mut sink);
    sink.flush().unwrap();

    assert_eq!(
        summary,
        RunSummary {
            events: 2,
            skipped_events: 0,
            failed_events: 0,
            trajectories: 2,
            pairs: 2,
            records: 1,
        }
    );

    let mut reader = csv::Reader::from_path(&files.output).unwrap();
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);

    let get = |name: &str| -> f64 {
        let i = headers.iter().position(|h| h == name).unwrap();
        rows[0][i].parse().unwrap()
    };
    assert_eq!(get("event"), 1.0);
    assert_eq!(get("near_first_strip"), 272.0);
    assert_eq!(get("near_window_5"), 55.0);
    assert_eq!(get("far_window_5"), 48.0);
    assert_eq!(get("far_cluster_size"), 4.0);
    approx::assert_relative_eq!(get("pair_offset_near"), 0.01, epsilon = 1e-12);
    approx::assert_relative_eq!(get("pair_offset_far"), -0.02, epsilon = 1e-12);
    approx::assert_relative_eq!(get("pair_shift"), 0.03, epsilon = 1e-12);
}

#[test]
fn test_lenient_run_keeps_clusterless_pairs() {
    let files = write_inputs();
    let topo = read_geometry(&files.geometry).unwrap();
    let events = read_events(&files.measurements, &files.clusters).unwrap();

    let cpe = BarycenterEstimator::new(&topo);
    let params = OverlapParams::builder()
        .require_clusters(false)
        .build()
        .unwrap();
    let analyzer = OverlapAnalyzer::new(params, &topo, &cpe);
    let mut sink = CsvRecordSink::new(Vec::new());
    let summary = analyzer.analyze_events(&events, &mut sink);
    assert_eq!(summary.records, 2);

    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let size = headers.iter().position(|h| h == "far_cluster_size").unwrap();
    let bary = headers.iter().position(|h| h == "far_barycenter").unwrap();
    let last = reader.records().last().unwrap().unwrap();
    assert_eq!(&last[size], "0");
    assert_eq!(&last[bary], "NaN");
}
