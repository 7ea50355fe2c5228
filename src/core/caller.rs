//! Best-effort caller-location resolution
//!
//! Resolving the call site means capturing a backtrace and parsing its text,
//! which is inherently environment-fragile: frame layout shifts with inlining,
//! optimization level, and platform, and symbols may be stripped entirely.
//! The resolver is therefore isolated behind the narrow [`CallerResolver`]
//! trait so it can be swapped for a deterministic implementation in tests,
//! and every parse step degrades to `None` instead of failing.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};

/// Source-location metadata for the function that issued a log call.
///
/// Every field is best-effort and may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerInfo {
    pub file_name: Option<String>,
    pub function_name: Option<String>,
    pub line_number: Option<u32>,
}

/// Narrow seam over the brittle backtrace parsing.
pub trait CallerResolver: Send + Sync {
    /// Resolve the location of the frame that called into the logger facade.
    ///
    /// Returns `None` whenever the trace cannot be captured or parsed.
    fn resolve(&self) -> Option<CallerInfo>;
}

/// Default resolver: captures a `std::backtrace::Backtrace` and parses its
/// rendered text.
///
/// Frames belonging to this crate (the resolver itself and the facade's
/// per-level wrappers) are recognized by a symbol-path token and skipped; the
/// first foreign frame after them is taken as the call site.
pub struct StackTraceResolver {
    crate_token: &'static str,
}

impl StackTraceResolver {
    pub fn new() -> Self {
        Self {
            crate_token: concat!(env!("CARGO_CRATE_NAME"), "::"),
        }
    }
}

impl Default for StackTraceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerResolver for StackTraceResolver {
    fn resolve(&self) -> Option<CallerInfo> {
        let trace = Backtrace::force_capture();
        if trace.status() != BacktraceStatus::Captured {
            return None;
        }
        parse_backtrace(&trace.to_string(), self.crate_token)
    }
}

/// One parsed frame: symbol path plus optional source location.
struct Frame {
    symbol: String,
    file: Option<String>,
    line: Option<u32>,
}

/// Parse rendered backtrace text into the caller's location.
///
/// The expected shape per frame is a `N: path::to::function` line, optionally
/// followed by an indented `at /path/to/file.rs:line:col` line. The caller is
/// the first frame after the last frame whose symbol contains `crate_token`.
pub(crate) fn parse_backtrace(text: &str, crate_token: &str) -> Option<CallerInfo> {
    let frames = collect_frames(text);

    let last_internal = frames
        .iter()
        .rposition(|frame| frame.symbol.contains(crate_token))?;
    let caller = frames.get(last_internal + 1)?;

    Some(CallerInfo {
        file_name: caller.file.as_deref().map(base_name),
        function_name: Some(clean_symbol(&caller.symbol)),
        line_number: caller.line,
    })
}

fn collect_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(location) = trimmed.strip_prefix("at ") {
            // Location line attaches to the most recent frame.
            if let Some(frame) = frames.last_mut() {
                let (file, line_number) = split_location(location);
                frame.file = file;
                frame.line = line_number;
            }
        } else if let Some(symbol) = frame_symbol(trimmed) {
            frames.push(Frame {
                symbol: symbol.to_string(),
                file: None,
                line: None,
            });
        }
    }

    frames
}

/// Extract the symbol from a `N: path::to::function` frame line.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, rest) = line.split_once(':')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let symbol = rest.trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

/// Split `path:line:col` (path may itself contain colons on some platforms).
fn split_location(location: &str) -> (Option<String>, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let _col = parts.next();
    let line = parts.next().and_then(|l| l.parse::<u32>().ok());
    let file = parts.next().map(str::to_string);
    match (file, line) {
        (Some(file), line) => (Some(file), line),
        // Fewer than three segments: treat the whole text as the path.
        (None, _) => (Some(location.to_string()), None),
    }
}

/// Reduce a symbol path to the innermost function name, dropping the trailing
/// hash suffix (`::h0123abcd…`) and `{{closure}}` segments.
fn clean_symbol(symbol: &str) -> String {
    symbol
        .rsplit("::")
        .find(|segment| {
            !segment.is_empty() && *segment != "{{closure}}" && !is_hash_segment(segment)
        })
        .unwrap_or(symbol)
        .to_string()
}

fn is_hash_segment(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Basename of a source path, tolerating both separators.
fn base_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}
