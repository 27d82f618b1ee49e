use serde::Serialize;

use crate::constants::Centimeter;
use crate::detector::topology::SensorTopology;
use crate::detector::{DetId, ModuleGeometry, SubDetector};
use crate::measurements::LocalPoint;
use crate::overlap_errors::OverlapError;

/// Static attributes of one sensor of an overlap pair, as written to output records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryDescriptor {
    pub subdet: SubDetector,
    pub module_geometry: ModuleGeometry,
    pub stereo: bool,
    pub layer: u32,
    pub side: u32,
    /// Ring number for TID/TEC sensors, `0` otherwise.
    pub ring: u32,
    /// Strip pitch at the predicted hit position.
    pub pitch: Centimeter,
    pub raw_id: DetId,
}

/// Resolve the geometry descriptor of a sensor.
///
/// All fields but `ring` and `pitch` are direct lookups on the topology service. The ring is
/// only meaningful for the ring-segmented subdetectors (TID, TEC) and is forced to `0` for the
/// others. The pitch is read from the sensor's own strip topology at `predicted_local`, since
/// it varies across trapezoidal sensors.
///
/// Arguments
/// -----------------
/// * `id`: The sensor to describe.
/// * `predicted_local`: Predicted local hit position on that sensor.
/// * `topology`: The topology service.
///
/// Return
/// ----------
/// * The [`GeometryDescriptor`], or the topology error (e.g. [`OverlapError::UnknownSensor`]).
pub fn describe<T: SensorTopology + ?Sized>(
    id: DetId,
    predicted_local: &LocalPoint,
    topology: &T,
) -> Result<GeometryDescriptor, OverlapError> {
    let subdet = topology.subdetector(id)?;
    let ring = if subdet.has_rings() {
        topology.ring(id)?
    } else {
        0
    };
    let pitch = topology.strip_topology(id)?.local_pitch(predicted_local);

    Ok(GeometryDescriptor {
        subdet,
        module_geometry: topology.module_geometry(id)?,
        stereo: topology.is_stereo(id)?,
        layer: topology.layer(id)?,
        side: topology.side(id)?,
        ring,
        pitch,
        raw_id: id,
    })
}

#[cfg(test)]
mod test_descriptor {
    use super::*;
    use crate::detector::strip_topology::StripGeometry;
    use crate::detector::topology::{DetIdTopology, StripTopology};
    use crate::detector::SensorSide;

    /// Topology reporting a ring for every sensor, to check the subdetector rule.
    struct RingEverywhere(DetIdTopology);

    impl SensorTopology for RingEverywhere {
        fn subdetector(&self, id: DetId) -> Result<SubDetector, OverlapError> {
            self.0.subdetector(id)
        }
        fn module_geometry(&self, id: DetId) -> Result<ModuleGeometry, OverlapError> {
            self.0.module_geometry(id)
        }
        fn is_stereo(&self, id: DetId) -> Result<bool, OverlapError> {
            self.0.is_stereo(id)
        }
        fn layer(&self, id: DetId) -> Result<u32, OverlapError> {
            self.0.layer(id)
        }
        fn side(&self, id: DetId) -> Result<u32, OverlapError> {
            self.0.side(id)
        }
        fn ring(&self, _id: DetId) -> Result<u32, OverlapError> {
            Ok(9)
        }
        fn strip_topology(&self, id: DetId) -> Result<&dyn StripTopology, OverlapError> {
            self.0.strip_topology(id)
        }
    }

    #[test]
    fn test_describe_barrel_sensor() {
        let id = DetId::barrel(SubDetector::TOB, 2, 11, SensorSide::Mono);
        let topo: DetIdTopology = [(
            id,
            StripGeometry::Rectangular {
                pitch: 0.0183,
                n_strips: 512,
            },
        )]
        .into_iter()
        .collect();

        let desc = describe(id, &LocalPoint::new(0.3, 2.0), &topo).unwrap();
        assert_eq!(
            desc,
            GeometryDescriptor {
                subdet: SubDetector::TOB,
                module_geometry: ModuleGeometry::OB2,
                stereo: false,
                layer: 2,
                side: 0,
                ring: 0,
                pitch: 0.0183,
                raw_id: id,
            }
        );
    }

    #[test]
    fn test_ring_only_for_disks() {
        let tob = DetId::barrel(SubDetector::TOB, 4, 2, SensorSide::Stereo);
        let tid = DetId::disk(SubDetector::TID, 1, 2, 3, 4, SensorSide::Mono);
        let rect = StripGeometry::Rectangular {
            pitch: 0.012,
            n_strips: 768,
        };
        let topo = RingEverywhere([(tob, rect), (tid, rect)].into_iter().collect());

        let local = LocalPoint::new(0.0, 0.0);
        assert_eq!(describe(tob, &local, &topo).unwrap().ring, 0);
        assert_eq!(describe(tid, &local, &topo).unwrap().ring, 9);
    }

    #[test]
    fn test_pitch_at_predicted_position() {
        let id = DetId::disk(SubDetector::TEC, 1, 2, 6, 1, SensorSide::Mono);
        let topo: DetIdTopology = [(
            id,
            StripGeometry::Trapezoidal {
                pitch: 0.02,
                n_strips: 512,
                radius: 100.0,
            },
        )]
        .into_iter()
        .collect();

        let desc = describe(id, &LocalPoint::new(0.0, 10.0), &topo).unwrap();
        approx::assert_relative_eq!(desc.pitch, 0.022, epsilon = 1e-12);
        assert_eq!(desc.ring, 6);
        assert_eq!(desc.module_geometry, ModuleGeometry::W6);
    }

    #[test]
    fn test_unknown_sensor_propagates() {
        let topo = DetIdTopology::new();
        let id = DetId::barrel(SubDetector::TIB, 1, 1, SensorSide::Mono);
        assert_eq!(
            describe(id, &LocalPoint::new(0.0, 0.0), &topo).unwrap_err(),
            OverlapError::UnknownSensor(id)
        );
    }
}
