//! Ordered collection of spheres and the nearest-hit query.

use crate::color::{Color, DEFAULT_BACKGROUND};
use crate::hittable::{HitPolicy, HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Collection of spheres forming a scene.
///
/// Uses a linear scan for intersection testing. Insertion order only
/// matters for exact distance ties, where the earlier sphere wins.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Spheres in insertion order
    pub objects: Vec<Sphere>,
    /// Color returned when a ray hits nothing
    pub background: Color,
    /// Root selection used for every intersection test
    pub policy: HitPolicy,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a new empty scene with the default background.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            background: DEFAULT_BACKGROUND,
            policy: HitPolicy::default(),
        }
    }

    /// Replace the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Replace the intersection policy.
    pub fn with_policy(mut self, policy: HitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a sphere to the scene.
    pub fn add(&mut self, sphere: Sphere) {
        self.objects.push(sphere);
    }

    /// Number of spheres in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no spheres.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit along `r`, if any.
    pub fn nearest_hit(&self, r: &Ray) -> Option<HitRecord> {
        self.hit_within(r, Interval::FORWARD)
    }

    /// Nearest hit strictly inside `ray_t`, using the scene's own policy.
    pub fn hit_within(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        // Strict upper bound keeps the first-inserted sphere on exact ties
        for object in &self.objects {
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far), self.policy) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    /// Color seen along `r`: the nearest sphere's color, or the background.
    pub fn trace(&self, r: &Ray) -> Color {
        self.nearest_hit(r).map_or(self.background, |rec| rec.color)
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
            ..Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vec3};

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    fn three_spheres() -> Scene {
        [
            Sphere::new(Point3::new(0.0, 0.0, -5.0), 2.0, RED),
            Sphere::new(Point3::new(2.0, 0.0, -6.0), 2.0, GREEN),
            Sphere::new(Point3::new(-2.0, 0.0, -4.0), 2.0, BLUE),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_scene_returns_background() {
        let scene = Scene::new();
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.is_empty());
        assert_eq!(scene.trace(&r), DEFAULT_BACKGROUND);
    }

    #[test]
    fn ray_pointing_away_returns_background() {
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(three_spheres().trace(&r), Color::new(0.2, 0.3, 0.5));
    }

    #[test]
    fn custom_background_is_used() {
        let scene = three_spheres().with_background(Color::ZERO);
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(scene.trace(&r), Color::ZERO);
    }

    #[test]
    fn nearest_sphere_wins_regardless_of_order() {
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let forward = three_spheres();
        let mut reversed = forward.clone();
        reversed.objects.reverse();

        // Red is hit at t = 3, blue only grazes at t = 4
        assert_eq!(forward.trace(&r), RED);
        assert_eq!(reversed.trace(&r), RED);
        assert_eq!(forward.nearest_hit(&r).map(|h| h.t), Some(3.0));
    }

    #[test]
    fn exact_tie_goes_to_first_inserted() {
        // Both spheres' near surfaces sit at z = -4
        let small = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, RED);
        let large = Sphere::new(Point3::new(0.0, 0.0, -6.0), 2.0, GREEN);
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let a: Scene = [small, large].into_iter().collect();
        let b: Scene = [large, small].into_iter().collect();

        assert_eq!(a.nearest_hit(&r).map(|h| h.t), Some(4.0));
        assert_eq!(b.nearest_hit(&r).map(|h| h.t), Some(4.0));
        assert_eq!(a.trace(&r), RED);
        assert_eq!(b.trace(&r), GREEN);
    }

    #[test]
    fn identical_spheres_resolve_to_first() {
        let center = Point3::new(0.5, -0.5, -3.0);
        let mut scene = Scene::new();
        scene.add(Sphere::new(center, 1.0, BLUE));
        scene.add(Sphere::new(center, 1.0, GREEN));
        let r = Ray::new(Point3::ZERO, crate::math::unit_vector(center));
        assert_eq!(scene.trace(&r), BLUE);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn bounded_query_uses_scene_policy() {
        let inside: Scene = [Sphere::new(Point3::ZERO, 1.0, GREEN)].into_iter().collect();
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let ray_t = Interval::FORWARD.with_max(10.0);

        let nearest = inside.clone().with_policy(HitPolicy::Nearest);
        assert_eq!(nearest.hit_within(&r, ray_t).map(|h| h.t), Some(1.0));
        assert_eq!(nearest.hit_within(&r, ray_t.with_max(1.0)), None);

        let near_root = inside.with_policy(HitPolicy::NearRoot);
        assert_eq!(near_root.hit_within(&r, ray_t), None);
    }

    #[test]
    fn policy_controls_inside_hits() {
        let inside: Scene = [Sphere::new(Point3::ZERO, 1.0, GREEN)].into_iter().collect();
        let r = Ray::new(Point3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(inside.clone().with_policy(HitPolicy::Nearest).trace(&r), GREEN);
        assert_eq!(
            inside.with_policy(HitPolicy::NearRoot).trace(&r),
            DEFAULT_BACKGROUND
        );
    }
}
