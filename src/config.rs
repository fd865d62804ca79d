use crate::fields::FieldKind;
use crate::format;
use crate::level::Level;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of frames between the call-site capturer and the original
/// logging call when going through [`Logger`](crate::logger::Logger)'s
/// own entry points.
pub const DEFAULT_CALL_DEPTH: usize = 3;

/// Error raised while building a [`Config`].
///
/// Field names and placeholder arity are validated here, once, so the
/// per-call logging path has no configuration failure mode.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown record field {0:?}")]
    UnknownField(String),

    #[error("output pattern has {placeholders} placeholders for {fields} configured fields")]
    PlaceholderMismatch { placeholders: usize, fields: usize },

    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),
}

/// Immutable configuration shared by every request and record of one
/// logger.
///
/// After construction the field list is only ever read, so concurrent
/// logging calls walk it without locks. The sequence counter is the
/// single piece of mutable state and is only reachable through
/// [`Config::next_seqid`].
#[derive(Debug)]
pub struct Config {
    name: String,
    level: Level,
    fields: Vec<FieldKind>,
    pattern: String,
    time_format: String,
    start_time: DateTime<Utc>,
    call_depth: usize,
    seqid: AtomicU64,
}

impl Config {
    /// Parse and validate a logger configuration.
    ///
    /// **Parameters**
    /// - `name`: display name emitted by the `name` field.
    /// - `level`: minimum severity; calls below it are dropped.
    /// - `pattern`: output pattern with one `{}` placeholder per
    ///   configured field, substituted in order.
    /// - `field_names`: ordered names of the fields to emit.
    /// - `time_format`: chrono format string for the `time` field.
    ///
    /// **Returns**
    /// - `Err(ConfigError)` on an unknown field name or when the
    ///   placeholder count does not match the field count.
    pub fn new(
        name: impl Into<String>,
        level: Level,
        pattern: impl Into<String>,
        field_names: &[&str],
        time_format: impl Into<String>,
    ) -> Result<Config, ConfigError> {
        let fields = field_names
            .iter()
            .map(|name| FieldKind::from_str(name))
            .collect::<Result<Vec<_>, _>>()?;

        let pattern = pattern.into();
        let placeholders = format::placeholder_count(&pattern);
        if placeholders != fields.len() {
            return Err(ConfigError::PlaceholderMismatch {
                placeholders,
                fields: fields.len(),
            });
        }

        // Rendering an invalid chrono format only fails at display
        // time; reject it here instead so the per-call path cannot
        // panic on configuration.
        let time_format = time_format.into();
        if StrftimeItems::new(&time_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimeFormat(time_format));
        }

        Ok(Config {
            name: name.into(),
            level,
            fields,
            pattern,
            time_format,
            start_time: Utc::now(),
            call_depth: DEFAULT_CALL_DEPTH,
            seqid: AtomicU64::new(0),
        })
    }

    /// Override how many frames the call-site capturer skips above
    /// [`Request::new`](crate::request::Request::new). The default
    /// matches `Logger`'s own entry points; wrappers that add frames
    /// between their caller and the logger add their depth on top.
    pub fn with_call_depth(mut self, depth: usize) -> Config {
        self.call_depth = depth;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Configured fields, in output order.
    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Construction time of this configuration; the `created`, `nsecs`
    /// and `rtime` fields derive from it.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Atomically issue the next sequence number. Starts at 1 and never
    /// resets for the lifetime of the configuration.
    pub fn next_seqid(&self) -> u64 {
        self.seqid.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn wants_call_site(&self) -> bool {
        self.fields.iter().any(|field| field.is_call_site())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_in_order() {
        let config = Config::new(
            "svc",
            Level::Info,
            "{} {} {}",
            &["seqid", "levelname", "message"],
            "%H:%M:%S",
        )
        .expect("valid config");
        assert_eq!(
            config.fields(),
            &[FieldKind::Seqid, FieldKind::Levelname, FieldKind::Message]
        );
        assert_eq!(config.name(), "svc");
        assert_eq!(config.level(), Level::Info);
    }

    #[test]
    fn rejects_unknown_field_at_construction() {
        let err = Config::new("svc", Level::Info, "{}", &["hostname"], "%H:%M:%S")
            .expect_err("hostname is not a field");
        assert!(matches!(err, ConfigError::UnknownField(name) if name == "hostname"));
    }

    #[test]
    fn rejects_placeholder_arity_mismatch() {
        let err = Config::new("svc", Level::Info, "{} {}", &["message"], "%H:%M:%S")
            .expect_err("two placeholders, one field");
        assert!(matches!(
            err,
            ConfigError::PlaceholderMismatch { placeholders: 2, fields: 1 }
        ));
    }

    #[test]
    fn rejects_invalid_time_format() {
        let err = Config::new("svc", Level::Info, "{}", &["time"], "%!")
            .expect_err("%! is not a chrono specifier");
        assert!(matches!(err, ConfigError::InvalidTimeFormat(fmt) if fmt == "%!"));
    }

    #[test]
    fn sequence_numbers_start_at_one_and_increase() {
        let config =
            Config::new("svc", Level::Debug, "{}", &["message"], "%H:%M:%S").expect("valid");
        assert_eq!(config.next_seqid(), 1);
        assert_eq!(config.next_seqid(), 2);
        assert_eq!(config.next_seqid(), 3);
    }

    #[test]
    fn call_site_detection() {
        let with = Config::new("svc", Level::Debug, "{}", &["lineno"], "%H:%M:%S").expect("valid");
        let without =
            Config::new("svc", Level::Debug, "{}", &["message"], "%H:%M:%S").expect("valid");
        assert!(with.wants_call_site());
        assert!(!without.wants_call_site());
    }
}
