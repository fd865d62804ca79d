use crate::callsite::{self, CallSite};
use crate::config::Config;
use crate::level::Level;
use std::fmt;

/// One logging invocation, created in the caller's own stack frame.
///
/// Call-site fields depend on the live stack, so they are captured
/// here, eagerly, before control can move to any other frame or
/// thread; everything else stays lazy on the [`Record`]. Borrowing the
/// caller's `format_args!` payload pins a request to the calling
/// frame, and the captured fields are immutable once set.
///
/// [`Record`]: crate::record::Record
pub struct Request<'a> {
    level: Level,
    args: fmt::Arguments<'a>,
    call_site: Option<CallSite>,
}

impl<'a> Request<'a> {
    /// Capture a logging call.
    ///
    /// If any configured field is call-site derived, one stack walk
    /// fills all four call-site fields together; otherwise the stack
    /// is never touched.
    #[inline(never)] // counted by the capturer's skip depth
    pub fn new(config: &Config, level: Level, args: fmt::Arguments<'a>) -> Request<'a> {
        let call_site = if config.wants_call_site() {
            Some(callsite::capture(config.call_depth()))
        } else {
            None
        };
        Request {
            level,
            args,
            call_site,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Render the message from the deferred format arguments.
    pub fn message(&self) -> String {
        self.args.to_string()
    }

    pub fn call_site(&self) -> Option<&CallSite> {
        self.call_site.as_ref()
    }
}
