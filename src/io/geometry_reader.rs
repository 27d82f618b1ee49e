//! Sensor geometry table reader.
//!
//! Expected columns (header required):
//!
//! ```text
//! raw_id,kind,pitch,n_strips,radius
//! 436228134,rectangular,0.0183,512,
//! 470045733,trapezoidal,0.0128,768,32.1
//! ```
//!
//! `radius` is only read for trapezoidal sensors. A raw id listed twice keeps its last row.

use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use log::info;
use serde::Deserialize;

use crate::detector::strip_topology::StripGeometry;
use crate::detector::topology::DetIdTopology;
use crate::detector::{DetId, SubDetector};
use crate::overlap_errors::OverlapError;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StripKind {
    Rectangular,
    Trapezoidal,
}

#[derive(Debug, Deserialize)]
struct GeometryRow {
    raw_id: u32,
    kind: StripKind,
    pitch: f64,
    n_strips: u16,
    radius: Option<f64>,
}

impl GeometryRow {
    fn into_entry(self) -> Result<(DetId, StripGeometry), OverlapError> {
        let id = DetId(self.raw_id);
        if id.subdetector()? <= SubDetector::PixelEndcap {
            return Err(OverlapError::InvalidSubdetector(self.raw_id));
        }

        if self.pitch.is_nan() || self.pitch <= 0.0 || self.n_strips == 0 {
            return Err(OverlapError::ParsingError(format!(
                "sensor {id}: pitch and strip count must be positive"
            )));
        }

        let geometry = match (self.kind, self.radius) {
            (StripKind::Rectangular, _) => StripGeometry::Rectangular {
                pitch: self.pitch,
                n_strips: self.n_strips,
            },
            (StripKind::Trapezoidal, Some(radius)) if radius > 0.0 => StripGeometry::Trapezoidal {
                pitch: self.pitch,
                n_strips: self.n_strips,
                radius,
            },
            (StripKind::Trapezoidal, _) => {
                return Err(OverlapError::ParsingError(format!(
                    "sensor {id}: trapezoidal layout needs a positive radius"
                )))
            }
        };
        Ok((id, geometry))
    }
}

/// Read a sensor geometry table from any reader.
pub fn read_geometry_from_reader<R: Read>(reader: R) -> Result<DetIdTopology, OverlapError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut topology = DetIdTopology::new();
    for row in csv_reader.deserialize::<GeometryRow>() {
        let (id, geometry) = row?.into_entry()?;
        topology.insert(id, geometry);
    }
    Ok(topology)
}

/// Read a sensor geometry table from a CSV file.
///
/// Arguments
/// -----------------
/// * `path`: Path to the geometry table.
///
/// Return
/// ----------
/// * A [`DetIdTopology`] holding every listed sensor.
///
/// Errors
/// ----------
/// * [`OverlapError::IoError`] / [`OverlapError::CsvError`] on unreadable or malformed files.
/// * [`OverlapError::InvalidSubdetector`] for raw ids outside the strip tracker.
/// * [`OverlapError::ParsingError`] for inconsistent layouts.
pub fn read_geometry(path: &Utf8Path) -> Result<DetIdTopology, OverlapError> {
    let topology = read_geometry_from_reader(File::open(path)?)?;
    info!("loaded {} sensor layouts from {path}", topology.len());
    Ok(topology)
}
