use crate::config::Config;
use crate::fields::FieldValue;
use crate::format;
use crate::level::Level;
use crate::record::Record;
use crate::request::Request;
use crate::sink::Sink;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Shared handle driving the logging pipeline.
///
/// Cloning is cheap; clones share the configuration (including the
/// sequence counter) and the sink, so concurrent callers on any number
/// of threads observe one strictly increasing sequence.
#[derive(Clone)]
pub struct Logger {
    config: Arc<Config>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    pub fn new(config: Config, sink: Arc<dyn Sink>) -> Logger {
        Logger {
            config: Arc::new(config),
            sink,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Log one call, reporting write failures on stderr.
    ///
    /// A line into a broken sink is already lost; the write error is
    /// surfaced on stderr instead of being returned so call sites stay
    /// infallible. Use [`try_log`](Logger::try_log) to handle the
    /// error yourself.
    #[inline(never)] // counted by the capturer's skip depth
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if let Err(err) = self.emit(level, args) {
            eprintln!("fieldline: failed to write log line: {}", err);
        }
    }

    /// Log one call, propagating write failures.
    #[inline(never)] // counted by the capturer's skip depth
    pub fn try_log(&self, level: Level, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.emit(level, args)
    }

    #[inline(never)] // counted by the capturer's skip depth
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) -> io::Result<()> {
        if level < self.config.level() {
            return Ok(());
        }

        let request = Request::new(&self.config, level, args);
        let mut record = Record::new(&request, request.message());

        let mut values = Vec::with_capacity(self.config.fields().len());
        for kind in self.config.fields() {
            values.push(kind.resolve(&self.config, &mut record));
        }

        let line = format::render(self.config.pattern(), &values);
        self.sink.write_line(&line)
    }

    /// Resolve the configured fields for one record without rendering
    /// the output pattern, paired with their configured names. Lets
    /// callers feed a structured backend directly.
    pub fn resolve_fields(&self, record: &mut Record) -> Vec<(&'static str, FieldValue)> {
        self.config
            .fields()
            .iter()
            .map(|kind| (kind.as_str(), kind.resolve(&self.config, record)))
            .collect()
    }

    /// Close and reopen the sink at the same destination. Safe to call
    /// from a different thread than writers; see [`Sink::reopen`].
    pub fn reopen(&self) -> io::Result<()> {
        self.sink.reopen()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Log at an explicit level through a [`Logger`], formatting the
/// message like `format!`. Expands in the caller's own frame, so
/// wrapper depth is unaffected.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        ($logger).log($level, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::level::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::level::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::level::Level::Warning, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::level::Level::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::level::Level::Critical, $($arg)*)
    };
}
