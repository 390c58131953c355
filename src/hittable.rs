//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait for geometric primitives and the
//! [`HitRecord`] they report.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::interval::Interval;
use crate::ray::Ray;

/// Ray-object intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Distance along the ray to the intersection point
    pub t: f64,
    /// Flat color of the object that was hit
    pub color: Color,
}

/// Which roots of the ray/sphere quadratic count as a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Accept the near root, falling back to the far root when the near one
    /// is out of range. A ray starting inside a sphere hits its far wall.
    #[default]
    Nearest,
    /// Only ever test the near root. A ray starting inside a sphere misses
    /// it entirely.
    NearRoot,
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) for parallel row rendering.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection strictly inside `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval, policy: HitPolicy) -> Option<HitRecord>;
}
