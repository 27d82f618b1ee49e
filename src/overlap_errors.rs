use thiserror::Error;

use crate::detector::DetId;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Invalid analysis parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Measurements are not sorted by layer: position {position} has layer {found} after layer {previous}"
    )]
    UnsortedMeasurements {
        position: usize,
        previous: u32,
        found: u32,
    },

    #[error("Empty cluster set on sensor {0}")]
    EmptyClusterSet(DetId),

    #[error("Sensor {0} is unknown to the topology service")]
    UnknownSensor(DetId),

    #[error("Raw id {0:#010x} does not belong to a strip subdetector")]
    InvalidSubdetector(u32),

    #[error("Error while parsing input: {0}")]
    ParsingError(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for OverlapError {
    fn eq(&self, other: &Self) -> bool {
        use OverlapError::*;
        match (self, other) {
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (
                UnsortedMeasurements {
                    position: p1,
                    previous: a1,
                    found: b1,
                },
                UnsortedMeasurements {
                    position: p2,
                    previous: a2,
                    found: b2,
                },
            ) => p1 == p2 && a1 == a2 && b1 == b2,
            (EmptyClusterSet(a), EmptyClusterSet(b)) => a == b,
            (UnknownSensor(a), UnknownSensor(b)) => a == b,
            (InvalidSubdetector(a), InvalidSubdetector(b)) => a == b,
            (ParsingError(a), ParsingError(b)) => a == b,

            // Wrapped errors are not comparable: same variant means equal
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
