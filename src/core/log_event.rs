//! Log event structure

use super::caller::CallerInfo;
use super::log_level::LogLevel;
use serde::Serialize;

/// Representation of a single log argument.
///
/// Arguments are arbitrary JSON values so hooks can inspect and rewrite them
/// generically (e.g. serialize object-typed arguments to text).
pub type LogValue = serde_json::Value;

/// A single log invocation, handed to every hook in turn.
///
/// Created fresh per invocation and discarded once the pipeline completes.
/// Hooks may rewrite `args` in place; the console write sees the mutated
/// contents, not the originals.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub args: Vec<LogValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<CallerInfo>,
}

impl LogEvent {
    pub fn new(level: LogLevel, args: Vec<LogValue>) -> Self {
        Self {
            level,
            args,
            caller: None,
        }
    }

    pub fn with_caller(mut self, caller: Option<CallerInfo>) -> Self {
        self.caller = caller;
        self
    }
}
