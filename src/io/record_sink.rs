//! Destinations for output records.
//!
//! A [`RecordSink`] receives records by value, exactly once, in batches. A batch is
//! all-or-nothing: when [`RecordSink::write_batch`] fails, none of its records reached the
//! sink. Two sinks are provided:
//!
//! * [`VecSink`] – keeps records in memory.
//! * [`CsvRecordSink`] – writes one flat CSV row per record, with the columns of
//!   [`OverlapRecord::csv_header`]. The header is written before the first row.

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;

use crate::overlap::record::OverlapRecord;
use crate::overlap_errors::OverlapError;

pub trait RecordSink {
    /// Write every record of `records`, or none of them.
    fn write_batch(&mut self, records: Vec<OverlapRecord>) -> Result<(), OverlapError>;

    fn write(&mut self, record: OverlapRecord) -> Result<(), OverlapError> {
        self.write_batch(vec![record])
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    pub records: Vec<OverlapRecord>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for VecSink {
    fn write_batch(&mut self, mut records: Vec<OverlapRecord>) -> Result<(), OverlapError> {
        self.records.append(&mut records);
        Ok(())
    }
}

/// CSV sink over any writer.
///
/// Each batch is serialized in memory first and handed to the writer with a single
/// `write_all`, so a record that fails to serialize leaves the output untouched.
pub struct CsvRecordSink<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvRecordSink<W> {
    pub fn new(writer: W) -> Self {
        CsvRecordSink {
            writer,
            header_written: false,
        }
    }

    /// Flush buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<(), OverlapError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W, OverlapError> {
        self.flush()?;
        Ok(self.writer)
    }

    fn encode(&self, records: &[OverlapRecord]) -> Result<Vec<u8>, OverlapError> {
        let mut csv_writer = csv::Writer::from_writer(Vec::new());
        if !self.header_written {
            csv_writer.write_record(OverlapRecord::csv_header())?;
        }
        for record in records {
            csv_writer.write_record(record.csv_row())?;
        }
        csv_writer
            .into_inner()
            .map_err(|e| OverlapError::IoError(e.into_error()))
    }
}

impl CsvRecordSink<BufWriter<File>> {
    /// Create (or truncate) a CSV file.
    pub fn create(path: &Utf8Path) -> Result<Self, OverlapError> {
        Ok(CsvRecordSink::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RecordSink for CsvRecordSink<W> {
    fn write_batch(&mut self, records: Vec<OverlapRecord>) -> Result<(), OverlapError> {
        if records.is_empty() {
            return Ok(());
        }
        let bytes = self.encode(&records)?;
        self.writer.write_all(&bytes)?;
        self.header_written = true;
        Ok(())
    }
}
