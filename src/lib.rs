//! Flat-shaded sphere ray caster
//!
//! Casts one ray per pixel from a fixed pinhole camera into a scene of
//! spheres, colors each pixel with the nearest sphere's flat color (or the
//! background) and streams the result as a plain-text P3 image or a PNG.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod math;
pub mod output;
pub mod ray;
pub mod scene;
pub mod sphere;

pub use camera::Camera;
pub use config::RenderConfig;
pub use error::RenderError;
pub use scene::Scene;
