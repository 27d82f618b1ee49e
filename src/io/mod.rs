//! # Input and output
//!
//! CSV ingestion of events and sensor geometry, and record sinks.
//!
//! Sub-modules
//! -----------------
//! * [`event_reader`](crate::io::event_reader) – events from a measurement table and a cluster
//!   table.
//! * [`geometry_reader`](crate::io::geometry_reader) – strip layouts into a
//!   [`DetIdTopology`](crate::detector::topology::DetIdTopology).
//! * [`record_sink`](crate::io::record_sink) – destinations for
//!   [`OverlapRecord`](crate::overlap::record::OverlapRecord)s.
//!
//! All readers come in two flavours: a path-based entry point taking a [`camino::Utf8Path`],
//! and a `*_from_reader` variant working on any [`std::io::Read`].

pub mod event_reader;
pub mod geometry_reader;
pub mod record_sink;
