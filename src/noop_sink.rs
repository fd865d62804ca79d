use crate::sink::Sink;
use std::io;

/// A sink that simply drops all lines.
///
/// Useful for measuring the overhead of the pipeline itself without
/// any I/O, and for unit tests that don't care about output.
#[derive(Clone, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}
