//! Render configuration: image size, camera, background and spheres.
//!
//! Loaded from TOML or taken from [`RenderConfig::default`], which is the
//! three-sphere scene rendered when no file is given.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::color::{Color, DEFAULT_BACKGROUND};
use crate::error::RenderError;
use crate::hittable::HitPolicy;
use crate::math::Point3;
use crate::scene::Scene;
use crate::sphere::Sphere;

/// Output raster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSettings {
    /// Width in pixels, at least 2
    pub width: u32,
    /// Height in pixels, at least 2
    pub height: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Pinhole camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    /// Camera position
    #[serde(default)]
    pub position: [f64; 3],
    /// Viewport height in world units
    pub viewport_height: f64,
    /// Distance from camera to viewport
    pub focal_length: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

/// One sphere in the scene description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereSettings {
    /// Center point
    pub center: [f64; 3],
    /// Radius, must be positive
    pub radius: f64,
    /// Flat RGB color in [0, 1]
    pub color: [f64; 3],
}

impl SphereSettings {
    fn to_sphere(self) -> Sphere {
        Sphere::new(
            Point3::from_array(self.center),
            self.radius,
            Color::from_array(self.color),
        )
    }
}

fn default_background() -> [f64; 3] {
    DEFAULT_BACKGROUND.to_array()
}

/// Complete description of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Color for rays that hit nothing
    #[serde(default = "default_background")]
    pub background: [f64; 3],
    /// Root selection for ray/sphere tests
    #[serde(default)]
    pub hit_policy: HitPolicy,
    /// Output size
    #[serde(default)]
    pub image: ImageSettings,
    /// Camera parameters
    #[serde(default)]
    pub camera: CameraSettings,
    /// Spheres in insertion order
    #[serde(default)]
    pub spheres: Vec<SphereSettings>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            hit_policy: HitPolicy::default(),
            image: ImageSettings::default(),
            camera: CameraSettings::default(),
            spheres: vec![
                SphereSettings {
                    center: [0.0, 0.0, -5.0],
                    radius: 2.0,
                    color: [1.0, 0.0, 0.0],
                },
                SphereSettings {
                    center: [2.0, 0.0, -6.0],
                    radius: 2.0,
                    color: [0.0, 1.0, 0.0],
                },
                SphereSettings {
                    center: [-2.0, 0.0, -4.0],
                    radius: 2.0,
                    color: [0.0, 0.0, 1.0],
                },
            ],
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, RenderError> {
        let config: RenderConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RenderError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Override the image size, keeping everything else.
    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.image.width = width;
        }
        if let Some(height) = height {
            self.image.height = height;
        }
        self
    }

    /// Check every value the renderer relies on.
    pub fn validate(&self) -> Result<(), RenderError> {
        // Camera::new owns the image and viewport checks
        self.camera()?;

        if !self.background.iter().all(|c| c.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "background must be finite, got {:?}",
                self.background
            )));
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(RenderError::InvalidConfig(format!(
                    "sphere {} radius must be positive, got {}",
                    index, sphere.radius
                )));
            }
            let finite = sphere
                .center
                .iter()
                .chain(sphere.color.iter())
                .all(|v| v.is_finite());
            if !finite {
                return Err(RenderError::InvalidConfig(format!(
                    "sphere {} has non-finite center or color",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Build the scene in declaration order.
    pub fn scene(&self) -> Scene {
        self.spheres
            .iter()
            .map(|s| s.to_sphere())
            .collect::<Scene>()
            .with_background(Color::from_array(self.background))
            .with_policy(self.hit_policy)
    }

    /// Build the camera, validating image size and viewport.
    pub fn camera(&self) -> Result<Camera, RenderError> {
        Camera::new(
            self.image.width,
            self.image.height,
            Point3::from_array(self.camera.position),
            self.camera.viewport_height,
            self.camera.focal_length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_sphere_scene() {
        let config = RenderConfig::default();
        config.validate().unwrap();
        let scene = config.scene();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.background, DEFAULT_BACKGROUND);
        assert_eq!(scene.policy, HitPolicy::Nearest);
        assert_eq!(scene.objects[0].color, Color::new(1.0, 0.0, 0.0));

        let camera = config.camera().unwrap();
        assert_eq!((camera.image_width, camera.image_height), (400, 400));
        assert_eq!(camera.viewport_width(), 2.0);
    }

    #[test]
    fn parses_full_document() {
        let text = r#"
            background = [0.0, 0.0, 0.0]
            hit_policy = "near_root"

            [image]
            width = 64
            height = 32

            [camera]
            position = [0.0, 1.0, 0.0]
            viewport_height = 3.0
            focal_length = 1.5

            [[spheres]]
            center = [0.0, 0.0, -3.0]
            radius = 1.0
            color = [0.5, 0.5, 0.5]

            [[spheres]]
            center = [1.0, 0.0, -4.0]
            radius = 0.5
            color = [1.0, 1.0, 0.0]
        "#;
        let config = RenderConfig::from_toml_str(text).unwrap();
        assert_eq!(config.hit_policy, HitPolicy::NearRoot);
        assert_eq!(config.image, ImageSettings { width: 64, height: 32 });
        assert_eq!(config.spheres.len(), 2);
        assert_eq!(config.spheres[1].radius, 0.5);

        let camera = config.camera().unwrap();
        assert_eq!(camera.center, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.viewport_width(), 6.0);
        assert_eq!(config.scene().background, Color::ZERO);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(config.image, ImageSettings::default());
        assert_eq!(config.camera, CameraSettings::default());
        assert_eq!(config.background, [0.2, 0.3, 0.5]);
        assert!(config.spheres.is_empty());
    }

    #[test]
    fn rejects_invalid_values() {
        let tiny = "[image]\nwidth = 1\nheight = 10\n";
        assert!(matches!(
            RenderConfig::from_toml_str(tiny),
            Err(RenderError::InvalidConfig(_))
        ));

        let flat = "[camera]\nviewport_height = 2.0\nfocal_length = 0.0\n";
        assert!(matches!(
            RenderConfig::from_toml_str(flat),
            Err(RenderError::InvalidConfig(_))
        ));

        let bad_radius = "[[spheres]]\ncenter = [0.0, 0.0, -1.0]\nradius = -1.0\ncolor = [1.0, 1.0, 1.0]\n";
        assert!(matches!(
            RenderConfig::from_toml_str(bad_radius),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_toml() {
        assert!(matches!(
            RenderConfig::from_toml_str("[image]\nwidht = 10\nheight = 10\n"),
            Err(RenderError::ConfigParse(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("hit_policy = \"sometimes\""),
            Err(RenderError::ConfigParse(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[image"),
            Err(RenderError::ConfigParse(_))
        ));
    }

    #[test]
    fn size_override_applies() {
        let config = RenderConfig::default().with_size(Some(20), None);
        assert_eq!(config.image, ImageSettings { width: 20, height: 400 });
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        match RenderConfig::from_file(&path) {
            Err(RenderError::ConfigRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn serialized_default_round_trips() {
        let text = toml::to_string(&RenderConfig::default()).unwrap();
        let back = RenderConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, RenderConfig::default());
    }
}
