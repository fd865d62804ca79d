use crate::sink::Sink;
use std::io::{self, Write};

/// Sink writing to the process stderr stream.
#[derive(Clone, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        handle.write_all(line.as_bytes())?;
        handle.write_all(b"\n")
    }
}
