//! Sphere primitive for ray casting.

use crate::color::Color;
use crate::hittable::{HitPolicy, HitRecord, Hittable};
use crate::interval::Interval;
use crate::math::Point3;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Point3,

    /// Radius of the sphere. Configuration rejects non-positive values.
    pub radius: f64,

    /// Color reported for every hit on this sphere.
    pub color: Color,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval, policy: HitPolicy) -> Option<HitRecord> {
        // Vector from sphere center to ray origin
        let oc = r.origin - self.center;

        let a = r.direction.dot(r.direction);
        let b = 2.0 * oc.dot(r.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        let mut root = (-b - sqrtd) / (2.0 * a);
        if !ray_t.surrounds(root) {
            match policy {
                HitPolicy::NearRoot => return None,
                HitPolicy::Nearest => {
                    root = (-b + sqrtd) / (2.0 * a);
                    if !ray_t.surrounds(root) {
                        return None;
                    }
                }
            }
        }

        Some(HitRecord {
            t: root,
            color: self.color,
        })
    }
}
