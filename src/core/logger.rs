//! Logger facade and the per-call invocation pipeline

use super::{
    caller::{CallerResolver, StackTraceResolver},
    console::{ConsoleSink, StdConsole},
    hook::{install_hooks, run_hooks, Hook},
    log_event::{LogEvent, LogValue},
    log_level::LogLevel,
    options::{LoggerOptions, OptionsPatch, PrefixFormat},
};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;

/// Logging facade: level gate, before-hooks, console write, after-hooks.
///
/// Per-level methods return a future that resolves only after the
/// after-hooks complete. Awaiting each call before issuing the next gives
/// non-interleaved, call-ordered execution on a single instance; dropping or
/// concurrently polling the futures leaves interleaving unspecified. There
/// is no cancellation: a hook that never resolves stalls only its own
/// invocation.
///
/// # Example
///
/// ```
/// use hook_logger::prelude::*;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let logger = create_logger(OptionsPatch::new().level(LogLevel::Info));
/// logger.warn(vec![json!("disk space low"), json!({"free_mb": 12})]).await;
/// # });
/// ```
pub struct Logger {
    options: RwLock<LoggerOptions>,
    console: Arc<dyn ConsoleSink>,
    resolver: Arc<dyn CallerResolver>,
}

impl Logger {
    /// Construct a logger by merging `patch` over the defaults.
    ///
    /// Hook installation runs immediately, exactly as a later
    /// [`apply`](Logger::apply) would.
    pub fn new(patch: OptionsPatch) -> Self {
        Logger::builder().options(patch).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use hook_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Warn)
    ///     .caller_info(true)
    ///     .build();
    /// assert_eq!(logger.level(), LogLevel::Warn);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Merge new configuration over the current options.
    ///
    /// Fields the patch leaves unset keep their values. Both hook lists are
    /// (re)installed on every call, whether or not the patch changed them;
    /// hooks must tolerate repeated installation.
    pub fn apply(&self, patch: OptionsPatch) {
        let snapshot = {
            let mut options = self.options.write();
            options.merge(patch);
            options.clone()
        };
        install_hooks(&snapshot.before_hooks, &snapshot);
        install_hooks(&snapshot.after_hooks, &snapshot);
    }

    /// Whether logging is currently enabled.
    pub fn enabled(&self) -> bool {
        self.options.read().enabled
    }

    /// The currently configured minimum level.
    pub fn level(&self) -> LogLevel {
        self.options.read().level
    }

    /// Emit at an explicit level.
    ///
    /// The gate and caller capture happen eagerly, before the returned future
    /// is first polled, so filtering reflects the options at call time and
    /// the backtrace is not polluted by executor frames.
    pub fn log_at(
        &self,
        level: LogLevel,
        args: Vec<LogValue>,
    ) -> impl Future<Output = ()> + Send + '_ {
        let event = self.gate_and_build(level, args);
        async move {
            if let Some(event) = event {
                self.dispatch(event).await;
            }
        }
    }

    pub fn debug(&self, args: Vec<LogValue>) -> impl Future<Output = ()> + Send + '_ {
        self.log_at(LogLevel::Debug, args)
    }

    pub fn info(&self, args: Vec<LogValue>) -> impl Future<Output = ()> + Send + '_ {
        self.log_at(LogLevel::Info, args)
    }

    pub fn warn(&self, args: Vec<LogValue>) -> impl Future<Output = ()> + Send + '_ {
        self.log_at(LogLevel::Warn, args)
    }

    pub fn error(&self, args: Vec<LogValue>) -> impl Future<Output = ()> + Send + '_ {
        self.log_at(LogLevel::Error, args)
    }

    pub fn log(&self, args: Vec<LogValue>) -> impl Future<Output = ()> + Send + '_ {
        self.log_at(LogLevel::Log, args)
    }

    /// Single filtering point: below the gate no event is built, no hook
    /// runs, nothing is written.
    fn gate_and_build(&self, level: LogLevel, args: Vec<LogValue>) -> Option<LogEvent> {
        let (caller_info, enabled, min_level) = {
            let options = self.options.read();
            (options.caller_info, options.enabled, options.level)
        };
        if !enabled || level < min_level {
            return None;
        }

        let caller = if caller_info {
            self.resolver.resolve()
        } else {
            None
        };
        Some(LogEvent::new(level, args).with_caller(caller))
    }

    async fn dispatch(&self, mut event: LogEvent) {
        // Snapshot under the read lock; never hold it across an await.
        let (before_hooks, after_hooks, console_enabled, prefix_format): (
            Vec<Arc<dyn Hook>>,
            Vec<Arc<dyn Hook>>,
            bool,
            PrefixFormat,
        ) = {
            let options = self.options.read();
            (
                options.before_hooks.clone(),
                options.after_hooks.clone(),
                options.console_enabled,
                options.prefix_format.clone(),
            )
        };

        run_hooks(&before_hooks, &mut event).await;

        if console_enabled {
            let prefix = (prefix_format)(event.level, event.caller.as_ref());
            if let Err(e) = self.console.write(event.level, &prefix, &event.args) {
                eprintln!(
                    "[LOGGER ERROR] console sink '{}' failed: {}",
                    self.console.name(),
                    e
                );
            }
        }

        run_hooks(&after_hooks, &mut event).await;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(OptionsPatch::new())
    }
}

/// Construct a logger from a configuration patch.
///
/// # Example
/// ```
/// use hook_logger::prelude::*;
///
/// let logger = create_logger(OptionsPatch::new().level(LogLevel::Error));
/// assert!(logger.enabled());
/// assert_eq!(logger.level(), LogLevel::Error);
/// ```
pub fn create_logger(patch: OptionsPatch) -> Logger {
    Logger::new(patch)
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use hook_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .before_hook(StringifyObjectsHook)
///     .build();
/// ```
pub struct LoggerBuilder {
    patch: OptionsPatch,
    console: Option<Arc<dyn ConsoleSink>>,
    resolver: Option<Arc<dyn CallerResolver>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            patch: OptionsPatch::new(),
            console: None,
            resolver: None,
        }
    }

    /// Use `patch` as the builder's configuration, replacing prior settings
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, patch: OptionsPatch) -> Self {
        self.patch = patch;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.patch = self.patch.enabled(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_enabled(mut self, console_enabled: bool) -> Self {
        self.patch = self.patch.console_enabled(console_enabled);
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.patch = self.patch.level(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_info(mut self, caller_info: bool) -> Self {
        self.patch = self.patch.caller_info(caller_info);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix_format<F>(mut self, format: F) -> Self
    where
        F: Fn(LogLevel, Option<&super::caller::CallerInfo>) -> String + Send + Sync + 'static,
    {
        self.patch = self.patch.prefix_format(format);
        self
    }

    /// Append a before-hook
    #[must_use = "builder methods return a new value"]
    pub fn before_hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.patch = self.patch.before_hook(hook);
        self
    }

    /// Append an after-hook
    #[must_use = "builder methods return a new value"]
    pub fn after_hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.patch = self.patch.after_hook(hook);
        self
    }

    /// Replace the console sink (defaults to [`StdConsole`])
    #[must_use = "builder methods return a new value"]
    pub fn console<C: ConsoleSink + 'static>(mut self, console: C) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_arc(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = Some(console);
        self
    }

    /// Replace the caller resolver (defaults to [`StackTraceResolver`])
    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver<R: CallerResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Build the Logger and run hook installation once
    pub fn build(self) -> Logger {
        let mut options = LoggerOptions::default();
        options.merge(self.patch);

        install_hooks(&options.before_hooks, &options);
        install_hooks(&options.after_hooks, &options);

        Logger {
            options: RwLock::new(options),
            console: self
                .console
                .unwrap_or_else(|| Arc::new(StdConsole::new())),
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(StackTraceResolver::new())),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
