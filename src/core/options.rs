//! Logger configuration: resolved options and merge-able patches

use super::caller::CallerInfo;
use super::hook::Hook;
use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

/// Per-invocation prefix formatter.
///
/// Receives the event level and the resolved caller (when caller capture is
/// enabled and succeeded) and produces the string prepended to console output.
pub type PrefixFormat = Arc<dyn Fn(LogLevel, Option<&CallerInfo>) -> String + Send + Sync>;

/// Default prefix: `"{level} | {file}::{function} | "` with caller info,
/// `"{level} | "` without.
pub fn default_prefix_format(level: LogLevel, caller: Option<&CallerInfo>) -> String {
    match caller {
        Some(caller) => format!(
            "{} | {}::{} | ",
            level,
            caller.file_name.as_deref().unwrap_or(""),
            caller.function_name.as_deref().unwrap_or(""),
        ),
        None => format!("{} | ", level),
    }
}

/// Fully resolved logger configuration.
///
/// Lives as long as the logger instance; mutated only through
/// [`merge`](LoggerOptions::merge) when a patch is applied.
#[derive(Clone)]
pub struct LoggerOptions {
    pub enabled: bool,
    pub console_enabled: bool,
    pub level: LogLevel,
    pub caller_info: bool,
    pub prefix_format: PrefixFormat,
    pub before_hooks: Vec<Arc<dyn Hook>>,
    pub after_hooks: Vec<Arc<dyn Hook>>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            console_enabled: true,
            level: LogLevel::Debug,
            caller_info: false,
            prefix_format: Arc::new(default_prefix_format),
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
        }
    }
}

impl LoggerOptions {
    /// Shallow-merge a patch over the current options.
    ///
    /// Fields the patch leaves unset keep their current values.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(console_enabled) = patch.console_enabled {
            self.console_enabled = console_enabled;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(caller_info) = patch.caller_info {
            self.caller_info = caller_info;
        }
        if let Some(prefix_format) = patch.prefix_format {
            self.prefix_format = prefix_format;
        }
        if let Some(before_hooks) = patch.before_hooks {
            self.before_hooks = before_hooks;
        }
        if let Some(after_hooks) = patch.after_hooks {
            self.after_hooks = after_hooks;
        }
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("enabled", &self.enabled)
            .field("console_enabled", &self.console_enabled)
            .field("level", &self.level)
            .field("caller_info", &self.caller_info)
            .field("before_hooks", &self.before_hooks.len())
            .field("after_hooks", &self.after_hooks.len())
            .finish()
    }
}

/// Partial logger configuration with builder-style setters.
///
/// # Example
/// ```
/// use hook_logger::prelude::*;
///
/// let patch = OptionsPatch::new()
///     .level(LogLevel::Warn)
///     .caller_info(true);
/// let logger = create_logger(patch);
/// assert_eq!(logger.level(), LogLevel::Warn);
/// ```
#[derive(Clone, Default)]
pub struct OptionsPatch {
    pub enabled: Option<bool>,
    pub console_enabled: Option<bool>,
    pub level: Option<LogLevel>,
    pub caller_info: Option<bool>,
    pub prefix_format: Option<PrefixFormat>,
    pub before_hooks: Option<Vec<Arc<dyn Hook>>>,
    pub after_hooks: Option<Vec<Arc<dyn Hook>>>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_enabled(mut self, console_enabled: bool) -> Self {
        self.console_enabled = Some(console_enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_info(mut self, caller_info: bool) -> Self {
        self.caller_info = Some(caller_info);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix_format<F>(mut self, format: F) -> Self
    where
        F: Fn(LogLevel, Option<&CallerInfo>) -> String + Send + Sync + 'static,
    {
        self.prefix_format = Some(Arc::new(format));
        self
    }

    /// Append a before-hook (initializes the list if the patch had none).
    #[must_use = "builder methods return a new value"]
    pub fn before_hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.before_hooks
            .get_or_insert_with(Vec::new)
            .push(Arc::new(hook));
        self
    }

    /// Append an after-hook (initializes the list if the patch had none).
    #[must_use = "builder methods return a new value"]
    pub fn after_hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.after_hooks
            .get_or_insert_with(Vec::new)
            .push(Arc::new(hook));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn before_hooks(mut self, hooks: Vec<Arc<dyn Hook>>) -> Self {
        self.before_hooks = Some(hooks);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn after_hooks(mut self, hooks: Vec<Arc<dyn Hook>>) -> Self {
        self.after_hooks = Some(hooks);
        self
    }
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("enabled", &self.enabled)
            .field("console_enabled", &self.console_enabled)
            .field("level", &self.level)
            .field("caller_info", &self.caller_info)
            .field("before_hooks", &self.before_hooks.as_ref().map(Vec::len))
            .field("after_hooks", &self.after_hooks.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoggerOptions::default();
        assert!(options.enabled);
        assert!(options.console_enabled);
        assert_eq!(options.level, LogLevel::Debug);
        assert!(!options.caller_info);
        assert!(options.before_hooks.is_empty());
        assert!(options.after_hooks.is_empty());
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut options = LoggerOptions::default();
        options.merge(OptionsPatch::new().level(LogLevel::Error));

        assert_eq!(options.level, LogLevel::Error);
        assert!(options.enabled);
        assert!(options.console_enabled);
        assert!(!options.caller_info);
    }

    #[test]
    fn test_merge_overwrites_set_fields() {
        let mut options = LoggerOptions::default();
        options.merge(OptionsPatch::new().enabled(false).console_enabled(false));
        options.merge(OptionsPatch::new().enabled(true));

        assert!(options.enabled);
        assert!(!options.console_enabled);
    }

    #[test]
    fn test_default_prefix_without_caller() {
        assert_eq!(default_prefix_format(LogLevel::Debug, None), "debug | ");
        assert_eq!(default_prefix_format(LogLevel::Error, None), "error | ");
    }

    #[test]
    fn test_default_prefix_with_caller() {
        let caller = CallerInfo {
            file_name: Some("checkout.rs".to_string()),
            function_name: Some("submit_order".to_string()),
            line_number: Some(88),
        };
        assert_eq!(
            default_prefix_format(LogLevel::Warn, Some(&caller)),
            "warn | checkout.rs::submit_order | "
        );
    }
}
