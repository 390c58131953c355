//! Camera for ray generation and scene rendering

use image::Rgb;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::color::to_rgb8;
use crate::error::RenderError;
use crate::math::{unit_vector, Point3, Vec3};
use crate::output::RasterSink;
use crate::ray::Ray;
use crate::scene::Scene;

/// Rows handed to each worker per band before results are written out.
const ROWS_PER_THREAD: usize = 4;

/// Fixed pinhole camera looking down the negative z axis.
///
/// The viewport is a rectangle `focal_length` in front of the camera whose
/// width follows the image aspect ratio.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Camera position in world space
    pub center: Point3,
    /// Viewport height in world units
    pub viewport_height: f64,
    /// Distance from the camera to the viewport plane
    pub focal_length: f64,
    /// Draw a progress bar while rendering
    pub show_progress: bool,

    /// Viewport width derived from the aspect ratio
    viewport_width: f64,
}

impl Camera {
    /// Creates a camera after checking that every pixel maps to a valid ray.
    ///
    /// Width and height must both exceed 1 (pixel coordinates are divided by
    /// `W - 1` and `H - 1`). A finite positive focal length guarantees every
    /// ray direction has a non-zero z component and can be normalized.
    pub fn new(
        image_width: u32,
        image_height: u32,
        center: Point3,
        viewport_height: f64,
        focal_length: f64,
    ) -> Result<Self, RenderError> {
        if image_width <= 1 || image_height <= 1 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                image_width, image_height
            )));
        }
        if !center.is_finite() {
            return Err(RenderError::InvalidConfig(format!(
                "camera position must be finite, got {}",
                center
            )));
        }
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "viewport height must be positive, got {}",
                viewport_height
            )));
        }
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "focal length must be positive, got {}",
                focal_length
            )));
        }

        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // The corner rays have the longest directions and the center ray the
        // shortest; both must survive squaring for normalization to work.
        let corner = Vec3::new(0.5 * viewport_width, 0.5 * viewport_height, focal_length);
        if !(viewport_width.is_finite() && corner.length_squared().is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "viewport {}x{} at focal length {} is too large",
                viewport_width, viewport_height, focal_length
            )));
        }
        if focal_length * focal_length == 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "focal length {} is too small",
                focal_length
            )));
        }

        Ok(Self {
            image_width,
            image_height,
            center,
            viewport_height,
            focal_length,
            show_progress: false,
            viewport_width,
        })
    }

    /// Viewport width in world units.
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Generate the ray through column `i` and row `j`.
    ///
    /// Row `j = 0` is the bottom of the viewport and `j = H - 1` the top.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let u = i as f64 / (self.image_width - 1) as f64;
        let v = j as f64 / (self.image_height - 1) as f64;

        let direction = Vec3::new(
            self.viewport_width * (u - 0.5),
            self.viewport_height * (v - 0.5),
            -self.focal_length,
        );

        Ray::new(self.center, unit_vector(direction))
    }

    /// Quantized colors for one row, left to right.
    pub fn render_row(&self, scene: &Scene, j: u32) -> Vec<Rgb<u8>> {
        (0..self.image_width)
            .map(|i| to_rgb8(scene.trace(&self.get_ray(i, j))))
            .collect()
    }

    /// Renders the scene into `sink`.
    ///
    /// Rows are emitted from the top (`j = H - 1`) down to `j = 0`, columns
    /// left to right. Bands of rows are traced in parallel and written in
    /// order, so the output never depends on scheduling.
    pub fn render<S: RasterSink + ?Sized>(
        &self,
        scene: &Scene,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let threads = rayon::current_num_threads();
        info!(
            "Rendering {}x{} with {} spheres on {} threads",
            self.image_width,
            self.image_height,
            scene.len(),
            threads
        );
        let generation_start = std::time::Instant::now();

        let pb = if self.show_progress {
            let pb = ProgressBar::new(self.image_height as u64);
            let template = "{bar:40} {pos}/{len} rows ETA: {eta}";
            if let Ok(style) = ProgressStyle::default_bar().template(template) {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        sink.begin(self.image_width, self.image_height)?;

        let rows: Vec<u32> = (0..self.image_height).rev().collect();
        let band = (threads * ROWS_PER_THREAD).max(1);

        for chunk in rows.chunks(band) {
            let pixels: Vec<Vec<Rgb<u8>>> = chunk
                .par_iter()
                .map(|&j| self.render_row(scene, j))
                .collect();

            for row in &pixels {
                sink.write_row(row)?;
                pb.inc(1);
            }
            debug!("Wrote rows {}..={}", chunk[chunk.len() - 1], chunk[0]);
        }

        sink.finish()?;

        pb.finish_and_clear();
        info!("Image generated in {:.2?}", generation_start.elapsed());
        Ok(())
    }
}
