//! Cluster position estimation.
//!
//! [`ClusterPositionEstimator`] turns a cluster into a local x position on its sensor. The
//! provided [`BarycenterEstimator`] uses the cluster barycenter and the sensor's strip
//! topology, evaluated at the sensor center (`y = 0`) since a cluster alone carries no
//! information on the position along the strips.

use crate::clusters::Cluster;
use crate::constants::Centimeter;
use crate::detector::topology::SensorTopology;
use crate::detector::DetId;
use crate::overlap_errors::OverlapError;

/// Estimated local x position of a cluster.
pub trait ClusterPositionEstimator {
    fn local_x(&self, cluster: &Cluster, sensor: DetId) -> Result<Centimeter, OverlapError>;
}

/// Barycenter-based estimator backed by a [`SensorTopology`].
#[derive(Debug, Clone, Copy)]
pub struct BarycenterEstimator<'a, T: SensorTopology + ?Sized> {
    topology: &'a T,
}

impl<'a, T: SensorTopology + ?Sized> BarycenterEstimator<'a, T> {
    pub fn new(topology: &'a T) -> Self {
        BarycenterEstimator { topology }
    }
}

impl<T: SensorTopology + ?Sized> ClusterPositionEstimator for BarycenterEstimator<'_, T> {
    fn local_x(&self, cluster: &Cluster, sensor: DetId) -> Result<Centimeter, OverlapError> {
        let strips = self.topology.strip_topology(sensor)?;
        Ok(strips.local_x(cluster.barycenter(), 0.0))
    }
}
