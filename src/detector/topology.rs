//! # Topology query interfaces
//!
//! Narrow, read-only capabilities the overlap engine depends on:
//!
//! * [`SensorTopology`] – sensor id → subdetector, module geometry, stereo flag, layer, side,
//!   ring, and the sensor's own [`StripTopology`].
//! * [`StripTopology`] – per-sensor strip layout: local pitch at a position and strip → local x.
//!
//! [`DetIdTopology`] implements [`SensorTopology`] by decoding raw ids and holding a registry of
//! strip layouts. A sensor missing from the registry is reported as
//! [`OverlapError::UnknownSensor`], which is fatal for the event being processed.
//!
//! Implementations hold no interior mutability, so one instance can be shared read-only by
//! several event loops.

use std::collections::HashMap;

use ahash::RandomState;

use crate::constants::{Centimeter, StripCoordinate};
use crate::detector::strip_topology::StripGeometry;
use crate::detector::{DetId, ModuleGeometry, SubDetector};
use crate::measurements::LocalPoint;
use crate::overlap_errors::OverlapError;

/// Strip layout of a single sensor.
pub trait StripTopology {
    fn n_strips(&self) -> u16;

    /// Strip pitch at a local position.
    fn local_pitch(&self, local: &LocalPoint) -> Centimeter;

    /// Local x of a (fractional) strip coordinate at a given local y.
    fn local_x(&self, strip: StripCoordinate, local_y: Centimeter) -> Centimeter;
}

/// Static sensor attributes, keyed by sensor id.
pub trait SensorTopology {
    fn subdetector(&self, id: DetId) -> Result<SubDetector, OverlapError>;

    fn module_geometry(&self, id: DetId) -> Result<ModuleGeometry, OverlapError>;

    fn is_stereo(&self, id: DetId) -> Result<bool, OverlapError>;

    /// Layer (barrel) or wheel (endcap) number.
    fn layer(&self, id: DetId) -> Result<u32, OverlapError>;

    fn side(&self, id: DetId) -> Result<u32, OverlapError>;

    /// Ring number as reported for ring-segmented subdetectors.
    fn ring(&self, id: DetId) -> Result<u32, OverlapError>;

    /// The sensor's own strip layout.
    fn strip_topology(&self, id: DetId) -> Result<&dyn StripTopology, OverlapError>;
}

/// Registry-backed [`SensorTopology`]: attributes are decoded from the raw id, strip layouts
/// are looked up in a map filled at construction.
#[derive(Debug, Clone, Default)]
pub struct DetIdTopology {
    sensors: HashMap<DetId, StripGeometry, RandomState>,
}

impl DetIdTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the strip layout of a sensor.
    pub fn insert(&mut self, id: DetId, geometry: StripGeometry) -> Option<StripGeometry> {
        self.sensors.insert(id, geometry)
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn contains(&self, id: DetId) -> bool {
        self.sensors.contains_key(&id)
    }

    pub fn geometry(&self, id: DetId) -> Result<&StripGeometry, OverlapError> {
        self.sensors
            .get(&id)
            .ok_or(OverlapError::UnknownSensor(id))
    }

    fn known(&self, id: DetId) -> Result<DetId, OverlapError> {
        if self.sensors.contains_key(&id) {
            Ok(id)
        } else {
            Err(OverlapError::UnknownSensor(id))
        }
    }
}

impl FromIterator<(DetId, StripGeometry)> for DetIdTopology {
    fn from_iter<I: IntoIterator<Item = (DetId, StripGeometry)>>(iter: I) -> Self {
        DetIdTopology {
            sensors: iter.into_iter().collect(),
        }
    }
}

impl SensorTopology for DetIdTopology {
    fn subdetector(&self, id: DetId) -> Result<SubDetector, OverlapError> {
        self.known(id)?.subdetector()
    }

    fn module_geometry(&self, id: DetId) -> Result<ModuleGeometry, OverlapError> {
        Ok(ModuleGeometry::from_det_id(self.known(id)?))
    }

    fn is_stereo(&self, id: DetId) -> Result<bool, OverlapError> {
        Ok(self.known(id)?.is_stereo())
    }

    fn layer(&self, id: DetId) -> Result<u32, OverlapError> {
        Ok(self.known(id)?.layer())
    }

    fn side(&self, id: DetId) -> Result<u32, OverlapError> {
        Ok(self.known(id)?.side())
    }

    fn ring(&self, id: DetId) -> Result<u32, OverlapError> {
        Ok(self.known(id)?.ring())
    }

    fn strip_topology(&self, id: DetId) -> Result<&dyn StripTopology, OverlapError> {
        Ok(self.geometry(id)? as &dyn StripTopology)
    }
}
