//! Ray representation for ray casting.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line
//! used for intersection testing.

use crate::math::{Point3, Vec3};

/// Ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates (the camera position
    /// for primary rays).
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. The camera always hands out unit
    /// directions so that `t` is a world-space distance.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
