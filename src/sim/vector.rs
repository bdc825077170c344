//! 2D vector math
//!
//! `Vector2` is `glam::DVec2`: a `Copy` value whose operators return new
//! values (`+`, `-`, `* scalar`, `dot`, `length`). This module adds the two
//! operations the simulation needs that glam leaves unchecked: division that
//! refuses a zero divisor, and a direction that cannot produce NaN.

use glam::DVec2;

use crate::error::{Error, Result};

pub type Vector2 = DVec2;

/// Direction used when two positions coincide
pub const FALLBACK_AXIS: Vector2 = DVec2::X;

/// Checked operations on `Vector2`
pub trait Vector2Ext: Sized {
    /// Divide both components by `scalar`, failing on an exact zero
    fn divide(self, scalar: f64) -> Result<Self>;

    /// Euclidean length, always >= 0
    fn magnitude(self) -> f64;

    /// Unit vector from `self` toward `target`, or `fallback` when they coincide
    fn direction_to(self, target: Self, fallback: Self) -> Self;
}

impl Vector2Ext for Vector2 {
    #[inline]
    fn divide(self, scalar: f64) -> Result<Self> {
        if scalar == 0.0 {
            return Err(Error::DivideByZero);
        }
        Ok(self / scalar)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.length()
    }

    fn direction_to(self, target: Self, fallback: Self) -> Self {
        let delta = target - self;
        match delta.divide(delta.magnitude()) {
            Ok(dir) => dir,
            Err(_) => {
                log::trace!("{} at {:?}, using {:?}", Error::DegenerateGeometry, self, fallback);
                fallback
            }
        }
    }
}
