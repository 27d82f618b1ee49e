//! # Strip clusters
//!
//! A [`Cluster`] is a contiguous run of strip amplitudes (ADC counts) recorded on one sensor,
//! starting at `first_strip`. Clusters are produced upstream and only read here.
//!
//! Sub-modules
//! -----------------
//! * [`cpe`](crate::clusters::cpe) – cluster position estimation (strip barycenter → local x).
//! * [`matcher`](crate::clusters::matcher) – nearest cluster to a predicted hit position.
//! * [`window`](crate::clusters::window) – fixed-width, peak-centered amplitude window.
//!
//! ## Barycenter
//! -----------------
//! The barycenter is the amplitude-weighted mean strip coordinate, with strip `i` centered at
//! `i + 0.5`:
//!
//! ```text
//! barycenter = first_strip + Σ(i·aᵢ) / Σaᵢ + 0.5
//! ```
//!
//! A cluster whose amplitudes are all zero falls back to its geometric center.

pub mod cpe;
pub mod matcher;
pub mod window;

use std::collections::HashMap;

use ahash::RandomState;

use crate::constants::{Adc, Clusters, StripCoordinate};
use crate::detector::DetId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cluster {
    pub first_strip: u16,
    pub amplitudes: Vec<Adc>,
}

impl Cluster {
    pub fn new(first_strip: u16, amplitudes: Vec<Adc>) -> Self {
        Cluster {
            first_strip,
            amplitudes,
        }
    }

    /// Number of strips in the cluster.
    pub fn size(&self) -> usize {
        self.amplitudes.len()
    }

    /// Total charge, in ADC counts.
    pub fn charge(&self) -> u32 {
        self.amplitudes.iter().map(|&a| a as u32).sum()
    }

    /// Amplitude-weighted strip coordinate of the cluster.
    pub fn barycenter(&self) -> StripCoordinate {
        let charge = self.charge();
        let center = if charge == 0 {
            self.size() as f64 / 2.0 - 0.5
        } else {
            let moment: u64 = self
                .amplitudes
                .iter()
                .enumerate()
                .map(|(i, &a)| i as u64 * a as u64)
                .sum();
            moment as f64 / charge as f64
        };
        self.first_strip as f64 + center + 0.5
    }
}

/// Clusters of one event, keyed by sensor.
#[derive(Debug, Clone, Default)]
pub struct ClusterCollection {
    by_sensor: HashMap<DetId, Clusters, RandomState>,
}

impl ClusterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DetId, cluster: Cluster) {
        self.by_sensor.entry(id).or_default().push(cluster);
    }

    /// Clusters recorded on a sensor; empty if the sensor has none.
    pub fn on_sensor(&self, id: DetId) -> &[Cluster] {
        self.by_sensor
            .get(&id)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Number of sensors with at least one cluster.
    pub fn sensors(&self) -> usize {
        self.by_sensor.len()
    }

    pub fn len(&self) -> usize {
        self.by_sensor.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sensor.values().all(|c| c.is_empty())
    }
}

impl FromIterator<(DetId, Cluster)> for ClusterCollection {
    fn from_iter<I: IntoIterator<Item = (DetId, Cluster)>>(iter: I) -> Self {
        let mut collection = ClusterCollection::new();
        for (id, cluster) in iter {
            collection.insert(id, cluster);
        }
        collection
    }
}
