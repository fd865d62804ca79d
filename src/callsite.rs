use serde::Serialize;

/// Sentinel for call-site string fields that could not be resolved.
pub const UNKNOWN: &str = "???";

/// Line number meaning "capture was attempted and failed". Zero is
/// reserved for "capture was never requested", so the two cases stay
/// distinguishable in the output.
pub const LINE_UNAVAILABLE: i64 = -1;

/// Source location of a logging call.
///
/// All four values come out of a single stack walk; capturing them
/// individually would re-walk the stack and could land on different
/// frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// Source file with its full path.
    pub pathname: String,
    /// Base name of the source file.
    pub filename: String,
    /// Function name without the module path or symbol hash.
    pub funcname: String,
    pub lineno: i64,
}

impl CallSite {
    pub(crate) fn unavailable() -> CallSite {
        CallSite {
            pathname: UNKNOWN.to_string(),
            filename: UNKNOWN.to_string(),
            funcname: UNKNOWN.to_string(),
            lineno: LINE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
pub(crate) static CAPTURE_CALLS: std::sync::atomic::AtomicU64 =
    std::sync::atomic::AtomicU64::new(0);

/// Walk the live stack and report the frame `skip` levels above this
/// function's caller; `skip = 0` reports the caller itself.
///
/// Frames are matched by symbol name, so the walk tolerates the
/// unwinder's own internal frames at the bottom of the trace. When
/// symbols cannot be resolved at all, every field is set to the
/// [`UNKNOWN`] / [`LINE_UNAVAILABLE`] sentinels and logging continues.
#[inline(never)]
pub fn capture(skip: usize) -> CallSite {
    #[cfg(test)]
    CAPTURE_CALLS.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

    let mut past_self = false;
    let mut remaining = skip;
    let mut out: Option<CallSite> = None;

    backtrace::trace(|frame| {
        let mut is_self = false;
        let mut site: Option<CallSite> = None;

        backtrace::resolve_frame(frame, |symbol| {
            let name = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_default();

            if !past_self {
                if name.contains("callsite::capture") {
                    is_self = true;
                }
                return;
            }

            if site.is_none() {
                site = Some(CallSite {
                    pathname: symbol
                        .filename()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    filename: symbol
                        .filename()
                        .and_then(|p| p.file_name())
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    funcname: if name.is_empty() {
                        UNKNOWN.to_string()
                    } else {
                        short_name(&name)
                    },
                    lineno: symbol.lineno().map(i64::from).unwrap_or(LINE_UNAVAILABLE),
                });
            }
        });

        if !past_self {
            if is_self {
                past_self = true;
            }
            return true;
        }
        if remaining > 0 {
            remaining -= 1;
            return true;
        }
        out = site;
        false
    });

    out.unwrap_or_else(CallSite::unavailable)
}

/// Strip the module path and the trailing `::h<hash>` segment rustc
/// appends to legacy-mangled symbols.
fn short_name(full: &str) -> String {
    let mut segments: Vec<&str> = full.split("::").collect();
    if let Some(last) = segments.last() {
        let bytes = last.as_bytes();
        if bytes.len() == 17
            && bytes[0] == b'h'
            && last[1..].bytes().all(|b| b.is_ascii_hexdigit())
            && segments.len() > 1
        {
            segments.pop();
        }
    }
    segments.last().copied().unwrap_or(full).to_string()
}
