mod debug_log;

pub use debug_log::{init_logging, DebugLog};
