//! Logger setup for the CLI

use log::LevelFilter;

/// Initialise `env_logger`.
///
/// `--verbose` lowers the default level to debug; `RUST_LOG` still wins.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}
