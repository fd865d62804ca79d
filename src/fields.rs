use crate::callsite;
use crate::config::{Config, ConfigError};
use crate::record::Record;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the supported output fields.
///
/// Configured field names are parsed into this enum once, when the
/// logger is built, so resolving a record never goes through a string
/// lookup and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Display name of the logger.
    Name,
    /// Process-wide sequence number, issued once per record.
    Seqid,
    /// Numeric level.
    Levelno,
    /// Level name.
    Levelname,
    /// Logger start time as Unix nanoseconds.
    Created,
    /// Nanosecond component of the logger start time.
    Nsecs,
    /// Record capture time rendered with the configured time format.
    Time,
    /// Record capture time as Unix nanoseconds.
    Timestamp,
    /// Nanoseconds from logger start to the record capture time.
    Rtime,
    /// Base name of the calling source file.
    Filename,
    /// Calling source file with its full path.
    Pathname,
    /// Base name of the running executable.
    Module,
    /// Line number of the logging call.
    Lineno,
    /// Function name of the logging call.
    Funcname,
    /// OS process id.
    Process,
    /// The rendered log message.
    Message,
}

impl FieldKind {
    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Seqid => "seqid",
            FieldKind::Levelno => "levelno",
            FieldKind::Levelname => "levelname",
            FieldKind::Created => "created",
            FieldKind::Nsecs => "nsecs",
            FieldKind::Time => "time",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Rtime => "rtime",
            FieldKind::Filename => "filename",
            FieldKind::Pathname => "pathname",
            FieldKind::Module => "module",
            FieldKind::Lineno => "lineno",
            FieldKind::Funcname => "funcname",
            FieldKind::Process => "process",
            FieldKind::Message => "message",
        }
    }

    /// Whether this field can only be produced by inspecting the
    /// calling stack frame. Requests capture the call site eagerly
    /// when any configured field is of this kind.
    pub fn is_call_site(self) -> bool {
        matches!(
            self,
            FieldKind::Filename | FieldKind::Pathname | FieldKind::Lineno | FieldKind::Funcname
        )
    }

    /// Resolve this field against one record.
    ///
    /// Resolvers are pure except for the lazy caches on [`Record`]
    /// (sequence number, capture time, pid), which are filled on first
    /// access and returned unchanged on every later access within the
    /// same record.
    pub fn resolve(self, config: &Config, record: &mut Record) -> FieldValue {
        match self {
            FieldKind::Name => FieldValue::Str(config.name().to_string()),
            FieldKind::Seqid => FieldValue::Uint(record.seqid(config)),
            FieldKind::Levelno => FieldValue::Int(record.level().number()),
            FieldKind::Levelname => FieldValue::Str(record.level().name().to_string()),
            FieldKind::Created => FieldValue::Int(unix_nanos(config.start_time())),
            FieldKind::Nsecs => {
                FieldValue::Uint(u64::from(config.start_time().timestamp_subsec_nanos()))
            }
            FieldKind::Time => {
                FieldValue::Str(record.time().format(config.time_format()).to_string())
            }
            FieldKind::Timestamp => FieldValue::Int(unix_nanos(record.time())),
            FieldKind::Rtime => FieldValue::Int(
                (record.time() - config.start_time())
                    .num_nanoseconds()
                    .unwrap_or(i64::MAX),
            ),
            FieldKind::Filename => FieldValue::Str(
                record
                    .call_site()
                    .map(|site| site.filename.clone())
                    .unwrap_or_default(),
            ),
            FieldKind::Pathname => FieldValue::Str(
                record
                    .call_site()
                    .map(|site| site.pathname.clone())
                    .unwrap_or_default(),
            ),
            FieldKind::Module => FieldValue::Str(executable_base()),
            // Zero when capture was never requested; the capturer's
            // negative sentinel when it was requested and failed.
            FieldKind::Lineno => {
                FieldValue::Int(record.call_site().map(|site| site.lineno).unwrap_or(0))
            }
            FieldKind::Funcname => FieldValue::Str(
                record
                    .call_site()
                    .map(|site| site.funcname.clone())
                    .unwrap_or_default(),
            ),
            FieldKind::Process => FieldValue::Uint(u64::from(record.process())),
            FieldKind::Message => FieldValue::Str(record.message().to_string()),
        }
    }
}

impl FromStr for FieldKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<FieldKind, ConfigError> {
        Ok(match s {
            "name" => FieldKind::Name,
            "seqid" => FieldKind::Seqid,
            "levelno" => FieldKind::Levelno,
            "levelname" => FieldKind::Levelname,
            "created" => FieldKind::Created,
            "nsecs" => FieldKind::Nsecs,
            "time" => FieldKind::Time,
            "timestamp" => FieldKind::Timestamp,
            "rtime" => FieldKind::Rtime,
            "filename" => FieldKind::Filename,
            "pathname" => FieldKind::Pathname,
            "module" => FieldKind::Module,
            "lineno" => FieldKind::Lineno,
            "funcname" => FieldKind::Funcname,
            "process" => FieldKind::Process,
            "message" => FieldKind::Message,
            other => return Err(ConfigError::UnknownField(other.to_string())),
        })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved field value, ready for pattern substitution or for
/// shipping to a structured backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Uint(n) => write!(f, "{}", n),
        }
    }
}

// Timestamps outside the representable range (~1677..2262) saturate
// instead of failing the logging call.
fn unix_nanos(t: chrono::DateTime<chrono::Utc>) -> i64 {
    t.timestamp_nanos_opt().unwrap_or(i64::MAX)
}

fn executable_base() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| callsite::UNKNOWN.to_string())
}
