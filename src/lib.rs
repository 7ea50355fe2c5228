//! # Hook Logger
//!
//! A small, pluggable logging facade: console output wrapped with level
//! filtering, optional caller-location annotation, and before/after hooks
//! that can transform arguments or trigger side effects such as shipping
//! logs to a backend.
//!
//! ## Features
//!
//! - **Level Filtering**: five ordered levels with a single gate point
//! - **Hook Pipelines**: ordered before/after hooks, failures isolated per hook
//! - **Caller Info**: best-effort source-location capture behind a swappable trait
//! - **Explicit Injection**: provide/inject registry instead of global mutation
//!
//! ## Example
//!
//! ```
//! use hook_logger::prelude::*;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let logger = create_logger(
//!     OptionsPatch::new()
//!         .level(LogLevel::Info)
//!         .before_hook(StringifyObjectsHook),
//! );
//! logger.warn(vec![json!("cache miss"), json!({"key": "user:42"})]).await;
//! # });
//! ```

pub mod core;
pub mod hooks;
pub mod macros;
pub mod plugin;

pub mod prelude {
    pub use crate::core::{
        create_logger, default_prefix_format, CallerInfo, CallerResolver, CapturedWrite,
        ConsoleSink, Hook, LogEvent, LogLevel, LogValue, Logger, LoggerBuilder, LoggerError,
        LoggerOptions, MemoryConsole, OptionsPatch, PrefixFormat, Result, StackTraceResolver,
        StdConsole,
    };
    pub use crate::hooks::{StringifyAndParseObjectsHook, StringifyObjectsHook};
    pub use crate::plugin::{install, use_logger, LoggerRegistry};
}

pub use crate::core::{
    create_logger, default_prefix_format, CallerInfo, CallerResolver, CapturedWrite, ConsoleSink,
    Hook, LogEvent, LogLevel, LogValue, Logger, LoggerBuilder, LoggerError, LoggerOptions,
    MemoryConsole, OptionsPatch, PrefixFormat, Result, StackTraceResolver, StdConsole,
};
pub use crate::hooks::{StringifyAndParseObjectsHook, StringifyObjectsHook};
pub use crate::plugin::{install, use_logger, LoggerRegistry};
