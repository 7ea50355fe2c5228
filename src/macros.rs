//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments into a single string argument and emits
//! it at the corresponding level. The expansion is the logger's future, so
//! the call site decides when (and whether) to await completion.
//!
//! # Examples
//!
//! ```
//! use hook_logger::prelude::*;
//! use hook_logger::info;
//!
//! # tokio_test::block_on(async {
//! let logger = Logger::builder().build();
//!
//! // Basic logging
//! info!(logger, "Server started").await;
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).await;
//! # });
//! ```

/// Emit a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use hook_logger::prelude::*;
/// # tokio_test::block_on(async {
/// # let logger = Logger::builder().build();
/// use hook_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").await;
/// log!(logger, LogLevel::Error, "Error code: {}", 500).await;
/// # });
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, vec![$crate::LogValue::from(format!($($arg)+))])
    };
}

/// Emit a debug-level formatted message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Emit an info-level formatted message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Emit a warn-level formatted message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Emit an error-level formatted message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Emit a generic-level formatted message.
///
/// `generic_log!` sits at the top of the level order, so it survives any
/// minimum-level filter on an enabled logger.
#[macro_export]
macro_rules! generic_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Log, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ConsoleSink, Logger, LogLevel, MemoryConsole};
    use std::sync::Arc;

    fn captured_logger() -> (Logger, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let logger = Logger::builder()
            .console_arc(Arc::clone(&console) as Arc<dyn ConsoleSink>)
            .build();
        (logger, console)
    }

    #[tokio::test]
    async fn test_log_macro() {
        let (logger, console) = captured_logger();
        log!(logger, LogLevel::Info, "Formatted: {}", 42).await;

        let writes = console.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].rendered(), "info | Formatted: 42");
    }

    #[tokio::test]
    async fn test_level_macros() {
        let (logger, console) = captured_logger();
        debug!(logger, "Debug message").await;
        info!(logger, "Items: {}", 100).await;
        warn!(logger, "Retry {} of {}", 1, 3).await;
        error!(logger, "Code: {}", 500).await;
        generic_log!(logger, "Plain message").await;

        let writes = console.writes();
        assert_eq!(writes.len(), 5);
        assert_eq!(writes[2].rendered(), "warn | Retry 1 of 3");
        assert_eq!(writes[4].level, LogLevel::Log);
    }
}
