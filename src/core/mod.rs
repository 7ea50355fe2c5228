//! Core logger types and traits

pub mod caller;
pub mod console;
pub mod error;
pub mod hook;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod options;

pub use caller::{CallerInfo, CallerResolver, StackTraceResolver};
pub use console::{CapturedWrite, ConsoleSink, MemoryConsole, StdConsole};
pub use error::{LoggerError, Result};
pub use hook::Hook;
pub use log_event::{LogEvent, LogValue};
pub use log_level::LogLevel;
pub use logger::{create_logger, Logger, LoggerBuilder};
pub use options::{default_prefix_format, LoggerOptions, OptionsPatch, PrefixFormat};
