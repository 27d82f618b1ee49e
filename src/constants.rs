//! # Constants and type definitions for stripoverlap
//!
//! This module centralizes the **detector constants**, **raw-id bit layout**, and **common type
//! definitions** used throughout the `stripoverlap` library.
//!
//! ## Overview
//!
//! - Units used by the tracker geometry (centimeters, radians, ADC counts)
//! - Default selection values (outer-region boundary, amplitude window width)
//! - Raw detector id field positions for the silicon-strip subdetectors
//! - Container types for measurements and clusters
//!
//! The raw-id layout follows the strip tracker numbering scheme: the detector kind lives in
//! bits 28–31, the subdetector code in bits 25–27, and each subdetector packs its own
//! layer/wheel/ring/module fields below that. The two lowest bits always carry the
//! glued/stereo/mono tag.

use crate::clusters::Cluster;
use crate::measurements::Measurement;
use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Units
// -------------------------------------------------------------------------------------------------

/// Length in centimeters (tracker geometry unit)
pub type Centimeter = f64;
/// Angle in radians
pub type Radian = f64;
/// Raw strip amplitude, in ADC counts
pub type Adc = u8;
/// Strip coordinate, in strip-pitch units (may be fractional)
pub type StripCoordinate = f64;

// -------------------------------------------------------------------------------------------------
// Selection defaults
// -------------------------------------------------------------------------------------------------

/// Subdetector codes up to and including this value belong to the pixel (inner) tracker.
pub const DEFAULT_OUTER_REGION_BOUNDARY: u8 = 2;

/// Half width of the amplitude window stored in output records.
pub const WINDOW_HALF_WIDTH: usize = 5;

/// Number of slots of the amplitude window stored in output records.
pub const WINDOW_SIZE: usize = 2 * WINDOW_HALF_WIDTH + 1;

/// Amplitude window stored per sensor in an output record.
pub type ClusterWindow = [Adc; WINDOW_SIZE];

// -------------------------------------------------------------------------------------------------
// Raw detector id layout
// -------------------------------------------------------------------------------------------------

/// Detector kind (bits 28–31); the tracker is kind 1.
pub const DET_START_BIT: u32 = 28;
pub const DET_MASK: u32 = 0xF;
pub const TRACKER_DET: u32 = 1;

/// Subdetector code (bits 25–27).
pub const SUBDET_START_BIT: u32 = 25;
pub const SUBDET_MASK: u32 = 0x7;

/// Glued / stereo / mono tag (bits 0–1), shared by every strip subdetector.
pub const STEREO_START_BIT: u32 = 0;
pub const STEREO_MASK: u32 = 0x3;

pub const TIB_LAYER_START_BIT: u32 = 14;
pub const TIB_LAYER_MASK: u32 = 0x7;

pub const TID_SIDE_START_BIT: u32 = 13;
pub const TID_SIDE_MASK: u32 = 0x3;
pub const TID_WHEEL_START_BIT: u32 = 11;
pub const TID_WHEEL_MASK: u32 = 0x3;
pub const TID_RING_START_BIT: u32 = 9;
pub const TID_RING_MASK: u32 = 0x3;

pub const TOB_LAYER_START_BIT: u32 = 14;
pub const TOB_LAYER_MASK: u32 = 0x7;

pub const TEC_SIDE_START_BIT: u32 = 18;
pub const TEC_SIDE_MASK: u32 = 0x3;
pub const TEC_WHEEL_START_BIT: u32 = 14;
pub const TEC_WHEEL_MASK: u32 = 0xF;
pub const TEC_RING_START_BIT: u32 = 5;
pub const TEC_RING_MASK: u32 = 0x7;

// -------------------------------------------------------------------------------------------------
// Containers
// -------------------------------------------------------------------------------------------------

/// A small, inline-optimized container for the measurements of one trajectory.
pub type Measurements = SmallVec<[Measurement; 16]>;

/// Clusters recorded on a single sensor.
pub type Clusters = SmallVec<[Cluster; 4]>;
