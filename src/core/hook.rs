//! Hook trait and the runner that invokes hooks around each log event
//!
//! Failure isolation follows one policy throughout: a hook that returns an
//! error or panics is reported on the self-diagnostic channel and skipped,
//! and every sibling hook (and the console write) still runs. Logging must
//! never be the reason a program crashes.

use super::error::Result;
use super::log_event::LogEvent;
use super::options::LoggerOptions;
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// A pluggable unit of logic run before or after the console write.
///
/// Before-hooks typically transform `event.args` in place; after-hooks
/// typically trigger side effects such as shipping the event to a backend.
///
/// # Example
///
/// ```
/// use hook_logger::prelude::*;
/// use async_trait::async_trait;
///
/// struct RedactTokens;
///
/// #[async_trait]
/// impl Hook for RedactTokens {
///     async fn run(&self, event: &mut LogEvent) -> hook_logger::Result<()> {
///         for arg in &mut event.args {
///             if arg.as_str().is_some_and(|s| s.starts_with("token-")) {
///                 *arg = LogValue::from("<redacted>");
///             }
///         }
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "redact_tokens"
///     }
/// }
/// ```
#[async_trait]
pub trait Hook: Send + Sync {
    /// Run against a log event. May mutate `event.args` in place.
    async fn run(&self, event: &mut LogEvent) -> Result<()>;

    /// Called once per `apply`, for every apply, with the merged options.
    ///
    /// Must tolerate repeated installation.
    fn install(&self, _options: &LoggerOptions) -> Result<()> {
        Ok(())
    }

    /// Name used in diagnostics when the hook fails.
    fn name(&self) -> &str {
        "hook"
    }
}

/// Install every hook in the list, isolating failures per hook.
pub(crate) fn install_hooks(hooks: &[Arc<dyn Hook>], options: &LoggerOptions) {
    for hook in hooks {
        let install_result =
            std::panic::catch_unwind(AssertUnwindSafe(|| hook.install(options)));

        match install_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!(
                    "[LOGGER WARNING] hook '{}' install failed: {}",
                    hook.name(),
                    e
                );
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER WARNING] hook '{}' panicked during install: {}. \
                     Other hooks continue to function.",
                    hook.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}

/// Invoke every hook in list order, awaiting each before the next.
///
/// A failing hook never blocks its siblings.
pub(crate) async fn run_hooks(hooks: &[Arc<dyn Hook>], event: &mut LogEvent) {
    for hook in hooks {
        let run_result = AssertUnwindSafe(hook.run(event)).catch_unwind().await;

        match run_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER WARNING] hook '{}' run failed: {}", hook.name(), e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER WARNING] hook '{}' panicked: {}. \
                     Other hooks continue to function.",
                    hook.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
