use crate::config::Config;
use crate::console_sink::ConsoleSink;
use crate::file_sink::FileSink;
use crate::level::Level;
use crate::logger::Logger;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Default output pattern, one placeholder per entry of
/// [`DEFAULT_FIELDS`]:
/// `time [levelname] name[process] filename:lineno:funcname: message`.
pub const DEFAULT_PATTERN: &str = "{} [{}] {}[{}] {}:{}:{}: {}";

/// Default field order matching [`DEFAULT_PATTERN`].
pub const DEFAULT_FIELDS: [&str; 8] = [
    "time",
    "levelname",
    "name",
    "process",
    "filename",
    "lineno",
    "funcname",
    "message",
];

/// Default time format, microsecond precision.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Build a DEBUG-threshold logger appending to the file at `path`.
///
/// **Parameters**
/// - `name`: display name emitted by the `name` field.
/// - `path`: log file location, created if missing.
///
/// **Behavior**
///
/// Uses [`DEFAULT_PATTERN`], [`DEFAULT_FIELDS`] and
/// [`DEFAULT_TIME_FORMAT`]. This is the recommended entrypoint for
/// services that pair the logger with an external rotator through
/// `ReopenOnSignal`.
pub fn file_logger(name: &str, path: impl AsRef<Path>) -> io::Result<Logger> {
    let sink = Arc::new(FileSink::open(path)?);
    Ok(Logger::new(default_config(name), sink))
}

/// Build a DEBUG-threshold logger writing to stderr, using the same
/// defaults as [`file_logger`].
pub fn console_logger(name: &str) -> Logger {
    Logger::new(default_config(name), Arc::new(ConsoleSink))
}

fn default_config(name: &str) -> Config {
    Config::new(
        name,
        Level::Debug,
        DEFAULT_PATTERN,
        &DEFAULT_FIELDS,
        DEFAULT_TIME_FORMAT,
    )
    .expect("default configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;

    #[test]
    fn default_pattern_matches_default_fields() {
        assert_eq!(
            format::placeholder_count(DEFAULT_PATTERN),
            DEFAULT_FIELDS.len()
        );
    }

    #[test]
    fn default_config_builds() {
        let config = default_config("svc");
        assert_eq!(config.level(), Level::Debug);
        assert_eq!(config.fields().len(), DEFAULT_FIELDS.len());
        assert!(config.wants_call_site());
    }
}
