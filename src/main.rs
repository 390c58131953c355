use clap::Parser;
use log::{error, info};

use raycaster::config::RenderConfig;
use raycaster::error::RenderError;
use raycaster::output::create_sink;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn run(args: &Args) -> Result<(), RenderError> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| RenderError::InvalidConfig(format!("thread pool: {}", e)))?;
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            RenderConfig::from_file(path)?
        }
        None => {
            info!("No scene file given, using the built-in scene");
            RenderConfig::default()
        }
    };
    let config = config.with_size(args.width, args.height);
    config.validate()?;

    let scene = config.scene();
    let mut camera = config.camera()?;
    camera.show_progress = args.progress;

    let mut sink = create_sink(&args.output)?;
    camera.render(&scene, sink.as_mut())?;

    info!("Image saved as {}", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("raycaster - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
