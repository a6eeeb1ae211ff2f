use log::LevelFilter;

/// Initialize logging for the CLI.
///
/// Uses `Debug` level if `debug_enabled` is true, otherwise `Info`. An explicit `RUST_LOG`
/// overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second initialisation (e.g. from tests) is harmless.
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
