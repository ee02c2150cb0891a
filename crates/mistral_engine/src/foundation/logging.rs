//! Logging setup
//!
//! Everything in the crate logs through the `log` facade; this module wires
//! up `env_logger` as the backend.

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    init_with_level(LevelFilter::Info);
}

/// Initialize the logging system with a default level.
///
/// `RUST_LOG` still takes precedence. Calling this more than once is harmless,
/// later calls are ignored.
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Parse a level name such as `"debug"`, falling back to `Info`
#[must_use]
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_with_level(LevelFilter::Debug);
        init_with_level(LevelFilter::Trace);
        log::debug!("logger initialized");
    }
}
