//! Logger setup shared by the binary and the test suites.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages from this crate are printed.
/// Otherwise only info level and above are shown. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let filter = format!("info,{}={crate_level}", env!("CARGO_CRATE_NAME"));
    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
