//! Strip layouts of silicon sensors.
//!
//! Two layouts cover the strip tracker:
//!
//! * **Rectangular** (barrel sensors) – parallel strips with a constant pitch.
//! * **Trapezoidal** (disk sensors) – strips fanning out from a focal point located at
//!   `radius` below the sensor center along local `y`. The pitch grows linearly with `y`:
//!
//! ```text
//! pitch(y) = pitch_center · (radius + y) / radius
//! ```
//!
//! Local coordinates are centered on the sensor: strip `n_strips / 2` sits at `x = 0`.
//! Strip coordinates are expressed in pitch units, the center of strip `i` being `i + 0.5`.

use serde::{Deserialize, Serialize};

use crate::constants::{Centimeter, StripCoordinate};
use crate::detector::topology::StripTopology;
use crate::measurements::LocalPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StripGeometry {
    Rectangular {
        pitch: Centimeter,
        n_strips: u16,
    },
    Trapezoidal {
        /// Pitch at the sensor center (`y = 0`).
        pitch: Centimeter,
        n_strips: u16,
        /// Distance between the strip focal point and the sensor center.
        radius: Centimeter,
    },
}

impl StripGeometry {
    /// Pitch at the sensor center.
    pub fn center_pitch(&self) -> Centimeter {
        match *self {
            StripGeometry::Rectangular { pitch, .. }
            | StripGeometry::Trapezoidal { pitch, .. } => pitch,
        }
    }

    fn pitch_at(&self, local_y: Centimeter) -> Centimeter {
        match *self {
            StripGeometry::Rectangular { pitch, .. } => pitch,
            StripGeometry::Trapezoidal { pitch, radius, .. } => pitch * (radius + local_y) / radius,
        }
    }
}

impl StripTopology for StripGeometry {
    fn n_strips(&self) -> u16 {
        match *self {
            StripGeometry::Rectangular { n_strips, .. }
            | StripGeometry::Trapezoidal { n_strips, .. } => n_strips,
        }
    }

    fn local_pitch(&self, local: &LocalPoint) -> Centimeter {
        self.pitch_at(local.y)
    }

    fn local_x(&self, strip: StripCoordinate, local_y: Centimeter) -> Centimeter {
        (strip - 0.5 * self.n_strips() as f64) * self.pitch_at(local_y)
    }
}
