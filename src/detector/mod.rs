//! # Sensor identifiers & static detector geometry (top-level module)
//!
//! This module gathers everything that describes a **sensor** independently of any event:
//!
//! - [`DetId`](crate::detector::DetId) – the 32-bit raw detector id, with typed accessors for the
//!   subdetector, layer (or wheel), side, ring and glued/stereo/mono tag.
//! - [`SubDetector`](crate::detector::SubDetector) – the six tracker subdetectors; only the strip
//!   subdetectors (codes 3–6) are eligible for overlap search by default.
//! - [`SensorSide`](crate::detector::SensorSide) – the glued/stereo/mono tag of a sensor and the
//!   [`is_overlap_partner`](crate::detector::SensorSide::is_overlap_partner) predicate used by the pair finder.
//! - [`ModuleGeometry`](crate::detector::ModuleGeometry) – the sensor shape class (IB1, OB2, W3B, …).
//! - [`topology`](crate::detector::topology) – read-only query interfaces over the detector
//!   (`SensorTopology`, `StripTopology`) and a registry-backed implementation.
//! - [`strip_topology`](crate::detector::strip_topology) – rectangular and trapezoidal strip layouts.
//! - [`descriptor`](crate::detector::descriptor) – the per-sensor geometry descriptor written to
//!   output records.
//!
//! ## Raw id layout
//!
//! ```text
//!  31    28 27  25 24                                  2 1  0
//! +--------+------+-------------------------------------+----+
//! |  det   |subdet|   subdetector-specific fields       |tag |
//! +--------+------+-------------------------------------+----+
//! ```
//!
//! The `tag` field is `0` for a glued (composite) module, `1` for the stereo sensor and `2`
//! for the mono (r-φ) sensor of a module.
//!
//! ## Side tags and overlaps
//!
//! Two sensors on the same layer overlap geometrically when they are neighbouring modules of
//! the **same** kind: mono with mono, stereo with stereo. Glued composites never take part in
//! an overlap since they have no single side assignment.

pub mod descriptor;
pub mod strip_topology;
pub mod topology;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DET_MASK, DET_START_BIT, STEREO_MASK, STEREO_START_BIT, SUBDET_MASK, SUBDET_START_BIT,
    TEC_RING_MASK, TEC_RING_START_BIT, TEC_SIDE_MASK, TEC_SIDE_START_BIT, TEC_WHEEL_MASK,
    TEC_WHEEL_START_BIT, TIB_LAYER_MASK, TIB_LAYER_START_BIT, TID_RING_MASK, TID_RING_START_BIT,
    TID_SIDE_MASK, TID_SIDE_START_BIT, TID_WHEEL_MASK, TID_WHEEL_START_BIT, TOB_LAYER_MASK,
    TOB_LAYER_START_BIT, TRACKER_DET,
};
use crate::overlap_errors::OverlapError;

const PXB_LAYER_START_BIT: u32 = 16;
const PXB_LAYER_MASK: u32 = 0xF;
const PXF_SIDE_START_BIT: u32 = 23;
const PXF_SIDE_MASK: u32 = 0x3;
const PXF_DISK_START_BIT: u32 = 16;
const PXF_DISK_MASK: u32 = 0xF;

/// Tracker subdetectors, numbered as in the raw id `subdet` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubDetector {
    PixelBarrel = 1,
    PixelEndcap = 2,
    /// Tracker inner barrel
    TIB = 3,
    /// Tracker inner disks
    TID = 4,
    /// Tracker outer barrel
    TOB = 5,
    /// Tracker endcaps
    TEC = 6,
}

impl SubDetector {
    /// Region code of the subdetector, compared against the outer-region boundary.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only the disk-like strip subdetectors are segmented in rings.
    pub fn has_rings(self) -> bool {
        matches!(self, SubDetector::TID | SubDetector::TEC)
    }

    pub fn is_barrel(self) -> bool {
        matches!(
            self,
            SubDetector::PixelBarrel | SubDetector::TIB | SubDetector::TOB
        )
    }
}

impl TryFrom<u8> for SubDetector {
    type Error = OverlapError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SubDetector::PixelBarrel),
            2 => Ok(SubDetector::PixelEndcap),
            3 => Ok(SubDetector::TIB),
            4 => Ok(SubDetector::TID),
            5 => Ok(SubDetector::TOB),
            6 => Ok(SubDetector::TEC),
            other => Err(OverlapError::InvalidSubdetector(other as u32)),
        }
    }
}

impl fmt::Display for SubDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubDetector::PixelBarrel => "PXB",
            SubDetector::PixelEndcap => "PXF",
            SubDetector::TIB => "TIB",
            SubDetector::TID => "TID",
            SubDetector::TOB => "TOB",
            SubDetector::TEC => "TEC",
        };
        f.write_str(name)
    }
}

/// Glued / stereo / mono tag carried by the two lowest bits of a raw id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorSide {
    /// Composite module made of a stereo and a mono sensor.
    Glued,
    Stereo,
    /// r-φ sensor.
    Mono,
    /// Tag value 3, not used by the strip numbering scheme.
    Unpaired,
}

impl SensorSide {
    pub fn from_tag(tag: u8) -> Self {
        match tag & 0x3 {
            0 => SensorSide::Glued,
            1 => SensorSide::Stereo,
            2 => SensorSide::Mono,
            _ => SensorSide::Unpaired,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            SensorSide::Glued => 0,
            SensorSide::Stereo => 1,
            SensorSide::Mono => 2,
            SensorSide::Unpaired => 3,
        }
    }

    /// Whether the sensor has a single side assignment.
    pub fn is_single_sided(self) -> bool {
        self != SensorSide::Glued
    }

    /// Whether two sensors of the same layer can overlap.
    ///
    /// Overlapping neighbours are modules of the same side class: a mono sensor overlaps
    /// with the adjacent mono sensor, a stereo sensor with the adjacent stereo sensor.
    /// Glued composites never overlap with anything.
    ///
    /// Arguments
    /// -----------------
    /// * `other`: The side tag of the candidate partner.
    ///
    /// Return
    /// ----------
    /// * `true` if both sensors are single-sided and share the same side class.
    pub fn is_overlap_partner(self, other: SensorSide) -> bool {
        self.is_single_sided() && self == other
    }
}

/// Sensor shape class, numbered as in the strip calibration conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleGeometry {
    Unknown = 0,
    IB1 = 1,
    IB2 = 2,
    OB1 = 3,
    OB2 = 4,
    W1A = 5,
    W2A = 6,
    W3A = 7,
    W1B = 8,
    W2B = 9,
    W3B = 10,
    W4 = 11,
    W5 = 12,
    W6 = 13,
    W7 = 14,
}

impl ModuleGeometry {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Classify a sensor from its subdetector and layer/ring fields.
    ///
    /// Barrel sensors are classified by layer (thin inner-layer sensors vs. thick outer
    /// ones), disk sensors by ring. Pixel sensors, and fields out of range, map to
    /// [`ModuleGeometry::Unknown`].
    pub fn from_det_id(id: DetId) -> Self {
        let Ok(subdet) = id.subdetector() else {
            return ModuleGeometry::Unknown;
        };
        match subdet {
            SubDetector::TIB => match id.layer() {
                1 | 2 => ModuleGeometry::IB1,
                3 | 4 => ModuleGeometry::IB2,
                _ => ModuleGeometry::Unknown,
            },
            SubDetector::TOB => match id.layer() {
                1..=4 => ModuleGeometry::OB2,
                5 | 6 => ModuleGeometry::OB1,
                _ => ModuleGeometry::Unknown,
            },
            SubDetector::TID => match id.ring() {
                1 => ModuleGeometry::W1A,
                2 => ModuleGeometry::W2A,
                3 => ModuleGeometry::W3A,
                _ => ModuleGeometry::Unknown,
            },
            SubDetector::TEC => match id.ring() {
                1 => ModuleGeometry::W1B,
                2 => ModuleGeometry::W2B,
                3 => ModuleGeometry::W3B,
                4 => ModuleGeometry::W4,
                5 => ModuleGeometry::W5,
                6 => ModuleGeometry::W6,
                7 => ModuleGeometry::W7,
                _ => ModuleGeometry::Unknown,
            },
            SubDetector::PixelBarrel | SubDetector::PixelEndcap => ModuleGeometry::Unknown,
        }
    }
}

/// Raw 32-bit detector id of a sensor.
///
/// The id is a plain bit field; every accessor decodes it on the fly. Accessors that do not
/// apply to the decoded subdetector (e.g. `ring` on a barrel sensor) return `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetId(pub u32);

impl DetId {
    pub fn new(raw: u32) -> Self {
        DetId(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn field(self, start_bit: u32, mask: u32) -> u32 {
        (self.0 >> start_bit) & mask
    }

    /// Detector kind; the tracker is `1`.
    pub fn det(self) -> u32 {
        self.field(DET_START_BIT, DET_MASK)
    }

    /// Raw subdetector code (`1..=6` for tracker sensors).
    pub fn subdet_code(self) -> u8 {
        self.field(SUBDET_START_BIT, SUBDET_MASK) as u8
    }

    /// Decoded subdetector.
    ///
    /// Return
    /// ----------
    /// * The [`SubDetector`], or [`OverlapError::InvalidSubdetector`] if the id does not
    ///   belong to the tracker or carries an unknown subdetector code.
    pub fn subdetector(self) -> Result<SubDetector, OverlapError> {
        if self.det() != TRACKER_DET {
            return Err(OverlapError::InvalidSubdetector(self.0));
        }
        SubDetector::try_from(self.subdet_code())
            .map_err(|_| OverlapError::InvalidSubdetector(self.0))
    }

    /// Glued / stereo / mono tag.
    pub fn sensor_side(self) -> SensorSide {
        SensorSide::from_tag(self.field(STEREO_START_BIT, STEREO_MASK) as u8)
    }

    pub fn is_stereo(self) -> bool {
        self.sensor_side() == SensorSide::Stereo
    }

    /// Layer number for barrel subdetectors, wheel/disk number for endcaps.
    pub fn layer(self) -> u32 {
        match self.subdetector() {
            Ok(SubDetector::PixelBarrel) => self.field(PXB_LAYER_START_BIT, PXB_LAYER_MASK),
            Ok(SubDetector::PixelEndcap) => self.field(PXF_DISK_START_BIT, PXF_DISK_MASK),
            Ok(SubDetector::TIB) => self.field(TIB_LAYER_START_BIT, TIB_LAYER_MASK),
            Ok(SubDetector::TID) => self.field(TID_WHEEL_START_BIT, TID_WHEEL_MASK),
            Ok(SubDetector::TOB) => self.field(TOB_LAYER_START_BIT, TOB_LAYER_MASK),
            Ok(SubDetector::TEC) => self.field(TEC_WHEEL_START_BIT, TEC_WHEEL_MASK),
            Err(_) => 0,
        }
    }

    /// Endcap side (`1` = minus, `2` = plus); `0` for barrel sensors.
    pub fn side(self) -> u32 {
        match self.subdetector() {
            Ok(SubDetector::PixelEndcap) => self.field(PXF_SIDE_START_BIT, PXF_SIDE_MASK),
            Ok(SubDetector::TID) => self.field(TID_SIDE_START_BIT, TID_SIDE_MASK),
            Ok(SubDetector::TEC) => self.field(TEC_SIDE_START_BIT, TEC_SIDE_MASK),
            _ => 0,
        }
    }

    /// Ring number for TID and TEC sensors; `0` everywhere else.
    pub fn ring(self) -> u32 {
        match self.subdetector() {
            Ok(SubDetector::TID) => self.field(TID_RING_START_BIT, TID_RING_MASK),
            Ok(SubDetector::TEC) => self.field(TEC_RING_START_BIT, TEC_RING_MASK),
            _ => 0,
        }
    }

    /// Build the raw id of a barrel strip sensor (TIB or TOB).
    ///
    /// Only the fields used by this crate are set; rod/string/module numbers go to
    /// `module`, packed right above the side tag.
    pub fn barrel(subdet: SubDetector, layer: u32, module: u32, side: SensorSide) -> Self {
        let (layer_start, layer_mask) = match subdet {
            SubDetector::TIB => (TIB_LAYER_START_BIT, TIB_LAYER_MASK),
            _ => (TOB_LAYER_START_BIT, TOB_LAYER_MASK),
        };
        DetId(
            (TRACKER_DET << DET_START_BIT)
                | ((subdet.code() as u32) << SUBDET_START_BIT)
                | ((layer & layer_mask) << layer_start)
                | ((module & 0x3FF) << 2)
                | side.tag() as u32,
        )
    }

    /// Build the raw id of a disk strip sensor (TID or TEC).
    pub fn disk(
        subdet: SubDetector,
        side: u32,
        wheel: u32,
        ring: u32,
        module: u32,
        tag: SensorSide,
    ) -> Self {
        let raw = match subdet {
            SubDetector::TID => {
                ((side & TID_SIDE_MASK) << TID_SIDE_START_BIT)
                    | ((wheel & TID_WHEEL_MASK) << TID_WHEEL_START_BIT)
                    | ((ring & TID_RING_MASK) << TID_RING_START_BIT)
                    | ((module & 0x1F) << 2)
            }
            _ => {
                ((side & TEC_SIDE_MASK) << TEC_SIDE_START_BIT)
                    | ((wheel & TEC_WHEEL_MASK) << TEC_WHEEL_START_BIT)
                    | ((ring & TEC_RING_MASK) << TEC_RING_START_BIT)
                    | ((module & 0x7) << 2)
            }
        };
        DetId(
            (TRACKER_DET << DET_START_BIT)
                | ((subdet.code() as u32) << SUBDET_START_BIT)
                | raw
                | tag.tag() as u32,
        )
    }
}

impl From<u32> for DetId {
    fn from(raw: u32) -> Self {
        DetId(raw)
    }
}

impl fmt::Display for DetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
