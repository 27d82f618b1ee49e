//! # Overlap hit pair
//!
//! [`OverlapHit`] is the canonical form of two measurements left by one track on overlapping
//! modules of the same layer. At construction the member closer to the beam axis becomes the
//! **near** hit, the other one the **far** hit; this ordering never changes afterwards.
//!
//! ## Derived quantities
//! -----------------
//! All quantities are recomputed from the two borrowed measurements on every call:
//!
//! * [`position`](OverlapHit::position) – midpoint of the two hit global positions,
//! * [`distance`](OverlapHit::distance) – distance between the two hits,
//! * [`offset`](OverlapHit::offset) – hit local x minus predicted local x, per side,
//! * [`shift`](OverlapHit::shift) – `offset(Near) - offset(Far)`; a bias common to both
//!   predictions cancels out,
//! * [`local_angle`](OverlapHit::local_angle) – azimuth of the predicted local direction, per
//!   side or averaged over both.
//!
//! ## Ties
//! -----------------
//! When both hits sit at the same radius, the first argument of [`OverlapHit::new`] (the
//! earlier measurement in the trajectory) is the near hit.

use crate::constants::{Centimeter, Radian};
use crate::measurements::{GlobalPoint, Measurement, StateKind, TrajectoryState};

/// Member of an overlap pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitSide {
    /// Member closer to the beam axis.
    Near,
    Far,
}

/// Two measurements on overlapping modules of the same layer, ordered by radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapHit<'a> {
    near: &'a Measurement,
    far: &'a Measurement,
}

impl<'a> OverlapHit<'a> {
    /// Build a pair, assigning the smaller-radius measurement to the near side.
    ///
    /// Arguments
    /// -----------------
    /// * `first`: Measurement found first in the trajectory; wins radius ties.
    /// * `second`: Its overlap partner.
    pub fn new(first: &'a Measurement, second: &'a Measurement) -> Self {
        if second.radius() < first.radius() {
            OverlapHit {
                near: second,
                far: first,
            }
        } else {
            OverlapHit {
                near: first,
                far: second,
            }
        }
    }

    pub fn near(&self) -> &'a Measurement {
        self.near
    }

    pub fn far(&self) -> &'a Measurement {
        self.far
    }

    pub fn hit(&self, side: HitSide) -> &'a Measurement {
        match side {
            HitSide::Near => self.near,
            HitSide::Far => self.far,
        }
    }

    /// Predicted or updated trajectory state on one member.
    pub fn state(&self, side: HitSide, kind: StateKind) -> &'a TrajectoryState {
        self.hit(side).state(kind)
    }

    /// Midpoint of the two hit global positions.
    pub fn position(&self) -> GlobalPoint {
        (self.near.hit_global + self.far.hit_global) / 2.0
    }

    /// Distance between the two hit global positions.
    pub fn distance(&self) -> Centimeter {
        (self.near.hit_global - self.far.hit_global).norm()
    }

    /// Hit residual along the precise coordinate: hit local x minus predicted local x.
    pub fn offset(&self, side: HitSide) -> Centimeter {
        let hit = self.hit(side);
        hit.hit_local.x - hit.predicted.local_position.x
    }

    /// Double-difference residual, `offset(Near) - offset(Far)`.
    pub fn shift(&self) -> Centimeter {
        self.offset(HitSide::Near) - self.offset(HitSide::Far)
    }

    /// Azimuth of the predicted local direction.
    ///
    /// Arguments
    /// -----------------
    /// * `side`: `Some(side)` for one member, `None` for the mean over both members.
    pub fn local_angle(&self, side: Option<HitSide>) -> Radian {
        match side {
            Some(side) => self.state(side, StateKind::Predicted).local_phi(),
            None => (self.near.predicted.local_phi() + self.far.predicted.local_phi()) / 2.0,
        }
    }
}
