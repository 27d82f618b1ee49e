use crate::clusters::cpe::ClusterPositionEstimator;
use crate::clusters::Cluster;
use crate::constants::Centimeter;
use crate::detector::DetId;
use crate::overlap_errors::OverlapError;

/// Select the cluster whose estimated local x is closest to a predicted local x.
///
/// Each candidate is passed through `estimator`, and the absolute distance
/// `|estimate - predicted_local_x|` is minimized. On equal distances the earliest cluster in
/// `clusters` wins.
///
/// Arguments
/// -----------------
/// * `predicted_local_x`: Predicted local x of the track on `sensor`.
/// * `clusters`: Candidate clusters recorded on `sensor`.
/// * `sensor`: The sensor the clusters belong to.
/// * `estimator`: Cluster position estimator.
///
/// Return
/// ----------
/// * A reference to the best cluster.
///
/// Errors
/// ----------
/// * [`OverlapError::EmptyClusterSet`] when `clusters` is empty.
/// * Any error raised by `estimator`.
pub fn best_match<'c, E: ClusterPositionEstimator + ?Sized>(
    predicted_local_x: Centimeter,
    clusters: &'c [Cluster],
    sensor: DetId,
    estimator: &E,
) -> Result<&'c Cluster, OverlapError> {
    let mut best: Option<(&'c Cluster, Centimeter)> = None;
    for cluster in clusters {
        let distance = (estimator.local_x(cluster, sensor)? - predicted_local_x).abs();
        match best {
            Some((_, d)) if distance.total_cmp(&d).is_ge() => {}
            _ => best = Some((cluster, distance)),
        }
    }
    best.map(|(cluster, _)| cluster)
        .ok_or(OverlapError::EmptyClusterSet(sensor))
}
