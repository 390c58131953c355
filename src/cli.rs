use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "raycaster")]
#[command(about = "Casts one ray per pixel into a scene of flat-colored spheres")]
pub struct Args {
    /// TOML scene description; the built-in three-sphere scene is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the scene file
    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the scene file
    #[arg(long, help = "Image height in pixels")]
    pub height: Option<u32>,

    /// Worker threads for row rendering (defaults to one per core)
    #[arg(long, short = 'j', help = "Worker threads for row rendering")]
    pub threads: Option<usize>,

    /// Show a progress bar while rendering
    #[arg(long, help = "Show a progress bar while rendering")]
    pub progress: bool,

    /// Output file path (.ppm for plain-text P3, .png for PNG)
    #[arg(short, long, default_value = "output.ppm", help = "Output file path (.ppm for plain-text P3, .png for PNG)")]
    pub output: PathBuf,
}
