//! Tracing subscriber setup.

use std::io;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// Parse a level name such as `info` or `off`, falling back to `warn` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::WARN)
}

/// Install a stderr subscriber at `level`. Later calls are no-ops.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
