//! # Output Module
//!
//! Sinks that receive the rendered raster one row at a time:
//! - [`PpmWriter`] streams the plain-text P3 format to any [`Write`]
//! - [`PngSink`] collects rows into an [`RgbImage`] and saves it as PNG
//!
//! [`parse_ppm`] reads a P3 document back into samples, tokenizing on any
//! whitespace the way P3 consumers do.
//!
//! ## P3 layout
//!
//! ```text
//! P3
//! <width> <height>
//! 255
//! <r> <g> <b> <r> <g> <b> ...   one line per row
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::{debug, info};

use crate::error::RenderError;

/// Maximum channel value written to the P3 header.
pub const MAX_VALUE: u32 = 255;

/// Destination for a rendered raster.
///
/// The renderer calls [`begin`](RasterSink::begin) once, then
/// [`write_row`](RasterSink::write_row) exactly `height` times with `width`
/// pixels each (top row first), then [`finish`](RasterSink::finish).
pub trait RasterSink {
    /// Announce the raster dimensions.
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Append the next row, left to right.
    fn write_row(&mut self, row: &[Rgb<u8>]) -> Result<(), RenderError>;

    /// Flush everything to the destination.
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Row bookkeeping shared by the sinks.
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    width: u32,
    height: u32,
    rows: u32,
    started: bool,
}

impl Progress {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.started {
            return Err(RenderError::Raster("begin called twice".to_string()));
        }
        *self = Self {
            width,
            height,
            rows: 0,
            started: true,
        };
        Ok(())
    }

    fn accept(&mut self, row: &[Rgb<u8>]) -> Result<u32, RenderError> {
        if !self.started {
            return Err(RenderError::Raster("row written before begin".to_string()));
        }
        if self.rows >= self.height {
            return Err(RenderError::Raster(format!(
                "more than {} rows written",
                self.height
            )));
        }
        if row.len() != self.width as usize {
            return Err(RenderError::Raster(format!(
                "row {} has {} pixels, expected {}",
                self.rows,
                row.len(),
                self.width
            )));
        }
        let index = self.rows;
        self.rows += 1;
        Ok(index)
    }

    fn complete(&self) -> Result<(), RenderError> {
        if !self.started || self.rows != self.height {
            return Err(RenderError::Raster(format!(
                "only {} of {} rows written",
                self.rows, self.height
            )));
        }
        Ok(())
    }
}

/// Streaming writer for the plain-text P3 raster format.
pub struct PpmWriter<W: Write> {
    out: W,
    progress: Progress,
}

impl PpmWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write P3 into it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let file = File::create(path.as_ref())?;
        debug!("Opened {} for P3 output", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PpmWriter<W> {
    /// Wrap any writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            progress: Progress::default(),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RasterSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.progress.begin(width, height)?;
        write!(self.out, "P3\n{} {}\n{}\n", width, height, MAX_VALUE)?;
        Ok(())
    }

    fn write_row(&mut self, row: &[Rgb<u8>]) -> Result<(), RenderError> {
        self.progress.accept(row)?;
        for (k, Rgb([r, g, b])) in row.iter().enumerate() {
            if k > 0 {
                self.out.write_all(b" ")?;
            }
            write!(self.out, "{} {} {}", r, g, b)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.progress.complete()?;
        self.out.flush()?;
        Ok(())
    }
}

/// Collects rows into an 8-bit image and encodes it as PNG on finish.
///
/// The output file is created up front so a bad path fails before any
/// rendering happens.
pub struct PngSink {
    out: BufWriter<File>,
    image: RgbImage,
    progress: Progress,
}

impl PngSink {
    /// Create (or truncate) `path` for PNG output.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let file = File::create(path.as_ref())?;
        debug!("Opened {} for PNG output", path.as_ref().display());
        Ok(Self {
            out: BufWriter::new(file),
            image: RgbImage::new(0, 0),
            progress: Progress::default(),
        })
    }
}

impl RasterSink for PngSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.progress.begin(width, height)?;
        self.image = RgbImage::new(width, height);
        Ok(())
    }

    fn write_row(&mut self, row: &[Rgb<u8>]) -> Result<(), RenderError> {
        // Rows arrive top first, which is image row 0
        let y = self.progress.accept(row)?;
        for (x, pixel) in row.iter().enumerate() {
            self.image.put_pixel(x as u32, y, *pixel);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.progress.complete()?;
        self.image.write_to(&mut self.out, ImageFormat::Png)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Pick a sink from the output file extension (`.ppm` or `.png`).
pub fn create_sink(path: &Path) -> Result<Box<dyn RasterSink>, RenderError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => Ok(Box::new(PpmWriter::create(path)?)),
        "png" => Ok(Box::new(PngSink::create(path)?)),
        _ => Err(RenderError::UnsupportedFormat(extension)),
    }
}

/// Decoded P3 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixels in file order, row by row
    pub pixels: Vec<Rgb<u8>>,
}

impl Raster {
    /// Pixel at column `x` of the `y`-th row in file order.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }
}

/// Parse a P3 document. Any whitespace separates tokens.
pub fn parse_ppm(text: &str) -> Result<Raster, RenderError> {
    let mut tokens = text.split_whitespace();

    match tokens.next() {
        Some("P3") => {}
        Some(other) => return Err(RenderError::Parse(format!("bad magic '{}'", other))),
        None => return Err(RenderError::Parse("empty document".to_string())),
    }

    let mut header = |name: &str| -> Result<u32, RenderError> {
        let token = tokens
            .next()
            .ok_or_else(|| RenderError::Parse(format!("missing {}", name)))?;
        token
            .parse::<u32>()
            .map_err(|e| RenderError::Parse(format!("{} '{}': {}", name, token, e)))
    };
    let width = header("width")?;
    let height = header("height")?;
    let max_value = header("max value")?;
    if max_value != MAX_VALUE {
        return Err(RenderError::Parse(format!(
            "max value {} is not {}",
            max_value, MAX_VALUE
        )));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(3))
        .ok_or_else(|| {
            RenderError::Parse(format!("dimensions {}x{} are too large", width, height))
        })?;

    // Sized by the document, never by the header
    let samples = tokens
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|e| RenderError::Parse(format!("sample '{}': {}", token, e)))
        })
        .collect::<Result<Vec<u8>, RenderError>>()?;
    if samples.len() != expected {
        return Err(RenderError::Parse(format!(
            "expected {} samples, found {}",
            expected,
            samples.len()
        )));
    }

    let pixels = samples
        .chunks_exact(3)
        .map(|c| Rgb([c[0], c[1], c[2]]))
        .collect();

    Ok(Raster {
        width,
        height,
        pixels,
    })
}

/// Read and parse a P3 file.
pub fn read_ppm<P: AsRef<Path>>(path: P) -> Result<Raster, RenderError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let raster = parse_ppm(&text)?;
    info!(
        "Read {}x{} P3 image from {}",
        raster.width,
        raster.height,
        path.as_ref().display()
    );
    Ok(raster)
}
