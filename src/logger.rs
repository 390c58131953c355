use log::LevelFilter;

/// Initialize the logger with the specified level
///
/// `RUST_LOG` is read first; the explicit level then takes precedence.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
