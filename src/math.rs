//! Vector arithmetic shared by points, directions and colors.
//!
//! All geometry runs in double precision on top of [`glam::DVec3`], which
//! supplies component-wise `+`, `-`, scalar `*` and `dot`.

use glam::DVec3;

/// Three-component vector used for directions.
pub type Vec3 = DVec3;

/// Point in world space.
pub type Point3 = DVec3;

/// Normalize vector to unit length.
///
/// The input must have non-zero magnitude. Camera and scene validation keep
/// zero vectors from ever reaching this point.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    debug_assert!(
        v.length_squared() > 0.0,
        "attempted to normalize a zero-length vector"
    );
    v / v.length()
}
