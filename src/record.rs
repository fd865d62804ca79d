use crate::callsite::CallSite;
use crate::config::Config;
use crate::level::Level;
use crate::request::Request;
use chrono::{DateTime, Utc};

/// One emitted log event.
///
/// Level, call site and message are fixed copies from the request.
/// Sequence number, capture time and pid are computed on first access
/// and cached, so every configured field reading them within this
/// record observes the same value. A record lives only long enough to
/// resolve its fields and hand the rendered line to the sink.
#[derive(Debug)]
pub struct Record {
    level: Level,
    call_site: Option<CallSite>,
    message: String,
    seqid: Option<u64>,
    time: Option<DateTime<Utc>>,
    process: Option<u32>,
}

impl Record {
    pub fn new(request: &Request<'_>, message: impl Into<String>) -> Record {
        Record {
            level: request.level(),
            call_site: request.call_site().cloned(),
            message: message.into(),
            seqid: None,
            time: None,
            process: None,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn call_site(&self) -> Option<&CallSite> {
        self.call_site.as_ref()
    }

    /// Sequence number, drawn from the logger's counter once per
    /// record.
    pub fn seqid(&mut self, config: &Config) -> u64 {
        *self.seqid.get_or_insert_with(|| config.next_seqid())
    }

    /// Capture instant, fixed on first access. The `time`, `timestamp`
    /// and `rtime` fields all derive from this one value.
    pub fn time(&mut self) -> DateTime<Utc> {
        *self.time.get_or_insert_with(Utc::now)
    }

    /// OS process id, read once per record.
    pub fn process(&mut self) -> u32 {
        *self.process.get_or_insert_with(std::process::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("test", Level::Debug, "{}", &["message"], "%H:%M:%S").expect("test config")
    }

    fn record(config: &Config) -> Record {
        Record::new(
            &Request::new(config, Level::Info, format_args!("unused")),
            "hi",
        )
    }

    #[test]
    fn copies_level_and_message_from_the_request() {
        let config = config();
        let record = record(&config);
        assert_eq!(record.level(), Level::Info);
        assert_eq!(record.message(), "hi");
        assert!(record.call_site().is_none());
    }

    #[test]
    fn capture_time_is_fixed_on_first_access() {
        let config = config();
        let mut record = record(&config);
        let first = record.time();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = record.time();
        assert_eq!(first, second);
    }

    #[test]
    fn seqid_is_cached_per_record() {
        let config = config();
        let mut first = record(&config);
        let mut second = record(&config);
        assert_eq!(first.seqid(&config), 1);
        assert_eq!(first.seqid(&config), 1);
        assert_eq!(second.seqid(&config), 2);
    }

    #[test]
    fn process_is_the_current_pid() {
        let config = config();
        let mut record = record(&config);
        assert_eq!(record.process(), std::process::id());
        assert_eq!(record.process(), std::process::id());
    }
}
