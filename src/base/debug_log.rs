use log::LevelFilter;

/// Installs the logger. `RUST_LOG` takes precedence over the default level.
/// Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// A named logger for one component.
pub struct DebugLog {
    prefix: &'static str,
}

impl DebugLog {
    pub const fn new(prefix: &'static str) -> DebugLog {
        DebugLog { prefix }
    }

    pub fn print(&self, msg: &str) {
        log::debug!(target: self.prefix, "{}", msg);
    }
}
