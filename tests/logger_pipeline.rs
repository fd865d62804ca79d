use fieldline::config::Config;
use fieldline::init;
use fieldline::level::Level;
use fieldline::logger::Logger;
use fieldline::sink::Sink;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

struct CollectSink {
    lines: Mutex<Vec<String>>,
}

impl CollectSink {
    fn new() -> Arc<CollectSink> {
        Arc::new(CollectSink {
            lines: Mutex::new(Vec::new()),
        })
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("collect lock").clone()
    }
}

impl Sink for CollectSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines.lock().expect("collect lock").push(line.to_string());
        Ok(())
    }
}

fn collect_logger(pattern: &str, fields: &[&str], sink: Arc<CollectSink>) -> Logger {
    let config =
        Config::new("svc", Level::Debug, pattern, fields, "%H:%M:%S").expect("test config");
    Logger::new(config, sink)
}

#[test]
fn writes_call_site_fields_from_the_macro_call() {
    let sink = CollectSink::new();
    let logger = collect_logger(
        "{}:{}:{}: {}",
        &["filename", "lineno", "funcname", "message"],
        Arc::clone(&sink),
    );

    fieldline::info!(logger, "probe");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(
        line.starts_with("logger_pipeline.rs:"),
        "unexpected call site in {:?}",
        line
    );
    assert!(
        line.contains(":writes_call_site_fields_from_the_macro_call:"),
        "unexpected function name in {:?}",
        line
    );
    assert!(line.ends_with(": probe"), "unexpected message in {:?}", line);

    // The line number sits between the first two colons and is a real
    // positive number, not a sentinel.
    let lineno: i64 = line
        .split(':')
        .nth(1)
        .expect("lineno slot")
        .parse()
        .expect("lineno parses");
    assert!(lineno > 0);
}

#[test]
fn concurrent_callers_get_distinct_sequence_numbers() {
    let sink = CollectSink::new();
    let logger = collect_logger("{}", &["seqid"], Arc::clone(&sink));

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let logger = logger.clone();
            thread::spawn(move || fieldline::info!(logger, "message {}", i))
        })
        .collect();
    for handle in threads {
        handle.join().expect("logging thread");
    }

    let seqids: BTreeSet<u64> = sink
        .lines()
        .iter()
        .map(|line| line.parse().expect("seqid parses"))
        .collect();
    assert_eq!(seqids, (1..=8).collect::<BTreeSet<u64>>());
}

#[test]
fn file_logger_writes_the_default_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("svc.log");
    let logger = init::file_logger("svc", &path).expect("file logger");

    fieldline::warning!(logger, "disk at {}%", 93);
    logger.flush().expect("flush");

    let contents = fs::read_to_string(&path).expect("read log");
    assert_eq!(contents.lines().count(), 1);
    let line = contents.lines().next().expect("one line");
    assert!(line.contains("[WARNING]"), "level missing in {:?}", line);
    assert!(line.contains("svc["), "logger name missing in {:?}", line);
    assert!(
        line.contains("logger_pipeline.rs:"),
        "call site missing in {:?}",
        line
    );
    assert!(line.ends_with(": disk at 93%"), "message missing in {:?}", line);
}

#[test]
fn reopen_cooperates_with_external_rotation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("svc.log");
    let rotated = dir.path().join("svc.log.1");
    let logger = init::file_logger("svc", &path).expect("file logger");

    fieldline::info!(logger, "before rotation");
    logger.flush().expect("flush");

    // An external rotator renames the live file, then asks the logger
    // to move off the stale handle.
    fs::rename(&path, &rotated).expect("rename");
    logger.reopen().expect("reopen");

    fieldline::info!(logger, "after rotation");
    logger.flush().expect("flush");

    let old = fs::read_to_string(&rotated).expect("read rotated");
    let fresh = fs::read_to_string(&path).expect("read fresh");
    assert!(old.contains("before rotation"));
    assert!(!old.contains("after rotation"));
    assert!(fresh.contains("after rotation"));
}
