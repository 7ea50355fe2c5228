//! Integration tests for the invocation pipeline
//!
//! These tests verify:
//! - Level gating (single filtering point)
//! - Hook ordering around the console write
//! - Per-hook failure isolation
//! - Argument mutation visibility
//! - Configuration merging via apply
//! - Caller-info flow into the prefix

use async_trait::async_trait;
use hook_logger::prelude::*;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hook that records its invocations into a shared step trace.
struct TraceHook {
    tag: String,
    trace: Arc<Mutex<Vec<String>>>,
    installs: Arc<AtomicUsize>,
}

impl TraceHook {
    fn new(tag: &str, trace: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            tag: tag.to_string(),
            trace: Arc::clone(trace),
            installs: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Hook for TraceHook {
    async fn run(&self, _event: &mut LogEvent) -> Result<()> {
        self.trace.lock().push(self.tag.clone());
        Ok(())
    }

    fn install(&self, _options: &LoggerOptions) -> Result<()> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.tag
    }
}

/// Sink that records writes and marks the console step in the shared trace.
struct TraceConsole {
    inner: MemoryConsole,
    trace: Arc<Mutex<Vec<String>>>,
}

impl ConsoleSink for TraceConsole {
    fn write(&self, level: LogLevel, prefix: &str, args: &[LogValue]) -> Result<()> {
        self.trace.lock().push("console".to_string());
        self.inner.write(level, prefix, args)
    }

    fn name(&self) -> &str {
        "trace_console"
    }
}

/// Before-hook that rewrites every argument to a fixed marker.
struct RewriteArgsHook;

#[async_trait]
impl Hook for RewriteArgsHook {
    async fn run(&self, event: &mut LogEvent) -> Result<()> {
        for arg in &mut event.args {
            *arg = json!("rewritten");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rewrite_args"
    }
}

struct ErroringHook;

#[async_trait]
impl Hook for ErroringHook {
    async fn run(&self, _event: &mut LogEvent) -> Result<()> {
        Err(LoggerError::other("deliberate failure"))
    }

    fn name(&self) -> &str {
        "erroring"
    }
}

/// Deterministic stand-in for the backtrace-based resolver.
struct FixedResolver;

impl CallerResolver for FixedResolver {
    fn resolve(&self) -> Option<CallerInfo> {
        Some(CallerInfo {
            file_name: Some("checkout.rs".to_string()),
            function_name: Some("submit_order".to_string()),
            line_number: Some(88),
        })
    }
}

fn memory_logger(patch: OptionsPatch) -> (Logger, Arc<MemoryConsole>) {
    let console = Arc::new(MemoryConsole::new());
    let logger = Logger::builder()
        .options(patch)
        .console_arc(Arc::clone(&console) as Arc<dyn ConsoleSink>)
        .build();
    (logger, console)
}

#[tokio::test]
async fn test_below_minimum_level_produces_nothing() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let (logger, console) = memory_logger(
        OptionsPatch::new()
            .level(LogLevel::Error)
            .before_hook(TraceHook::new("before", &trace))
            .after_hook(TraceHook::new("after", &trace)),
    );

    logger.debug(vec![json!("x")]).await;
    logger.info(vec![json!("x")]).await;
    logger.warn(vec![json!("x")]).await;

    assert!(console.is_empty());
    assert!(trace.lock().is_empty());
}

#[tokio::test]
async fn test_pipeline_order_before_console_after() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let console = TraceConsole {
        inner: MemoryConsole::new(),
        trace: Arc::clone(&trace),
    };
    let logger = Logger::builder()
        .before_hook(TraceHook::new("before:1", &trace))
        .before_hook(TraceHook::new("before:2", &trace))
        .after_hook(TraceHook::new("after:1", &trace))
        .after_hook(TraceHook::new("after:2", &trace))
        .console(console)
        .build();

    logger.info(vec![json!("x")]).await;

    assert_eq!(
        *trace.lock(),
        vec!["before:1", "before:2", "console", "after:1", "after:2"]
    );
}

#[tokio::test]
async fn test_each_level_reaches_the_sink_once() {
    let (logger, console) = memory_logger(OptionsPatch::new());

    logger.debug(vec![json!("d")]).await;
    logger.info(vec![json!("i")]).await;
    logger.warn(vec![json!("w")]).await;
    logger.error(vec![json!("e")]).await;
    logger.log(vec![json!("l")]).await;

    let writes = console.writes();
    let levels: Vec<LogLevel> = writes.iter().map(|w| w.level).collect();
    assert_eq!(levels, LogLevel::ALL.to_vec());
    assert_eq!(writes[0].rendered(), "debug | d");
    assert_eq!(writes[4].rendered(), "log | l");
}

#[tokio::test]
async fn test_console_disabled_still_runs_hooks() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let (logger, console) = memory_logger(
        OptionsPatch::new()
            .console_enabled(false)
            .before_hook(TraceHook::new("before", &trace))
            .after_hook(TraceHook::new("after", &trace)),
    );

    logger.log(vec![json!("x")]).await;

    assert!(console.is_empty());
    assert_eq!(*trace.lock(), vec!["before", "after"]);
}

#[tokio::test]
async fn test_disabled_logger_suppresses_everything() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let (logger, console) = memory_logger(
        OptionsPatch::new()
            .enabled(false)
            .before_hook(TraceHook::new("before", &trace)),
    );

    logger.log(vec![json!("x")]).await;
    logger.error(vec![json!("x")]).await;

    assert!(console.is_empty());
    assert!(trace.lock().is_empty());
}

#[tokio::test]
async fn test_mutated_args_reach_the_console() {
    let (logger, console) =
        memory_logger(OptionsPatch::new().before_hook(RewriteArgsHook));

    logger.info(vec![json!("original"), json!({"a": 1})]).await;

    let writes = console.writes();
    assert_eq!(writes[0].args, vec![json!("rewritten"), json!("rewritten")]);
}

#[tokio::test]
async fn test_erroring_hook_isolated_from_siblings_and_console() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let (logger, console) = memory_logger(
        OptionsPatch::new()
            .before_hook(ErroringHook)
            .before_hook(TraceHook::new("survivor", &trace)),
    );

    // Awaiting returns normally; the failure never propagates.
    logger.info(vec![json!("x")]).await;

    assert_eq!(*trace.lock(), vec!["survivor"]);
    assert_eq!(console.len(), 1);
}

#[tokio::test]
async fn test_apply_changes_filtering_immediately() {
    let (logger, console) = memory_logger(OptionsPatch::new());

    logger.warn(vec![json!("first")]).await;
    logger.apply(OptionsPatch::new().level(LogLevel::Error));
    logger.warn(vec![json!("second")]).await;
    logger.error(vec![json!("third")]).await;

    let writes = console.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].args, vec![json!("first")]);
    assert_eq!(writes[1].args, vec![json!("third")]);
}

#[tokio::test]
async fn test_default_warn_scenario() {
    let (logger, console) = memory_logger(OptionsPatch::new());

    logger.warn(vec![json!("x"), json!({"a": 1})]).await;

    let writes = console.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].level, LogLevel::Warn);
    assert_eq!(writes[0].prefix, "warn | ");
    assert_eq!(writes[0].args, vec![json!("x"), json!({"a": 1})]);
    assert_eq!(writes[0].rendered(), "warn | x {\"a\":1}");
}

#[tokio::test]
async fn test_warn_scenario_with_stringify_hook() {
    let (logger, console) =
        memory_logger(OptionsPatch::new().before_hook(StringifyObjectsHook));

    logger.warn(vec![json!("x"), json!({"a": 1})]).await;

    let writes = console.writes();
    assert_eq!(writes[0].args, vec![json!("x"), json!("{\"a\":1}")]);
}

#[tokio::test]
async fn test_error_level_logger_drops_warn() {
    let (logger, console) = memory_logger(OptionsPatch::new().level(LogLevel::Error));

    logger.warn(vec![json!("x")]).await;

    assert!(console.is_empty());
}

#[tokio::test]
async fn test_stringify_and_parse_preserves_structure_through_pipeline() {
    let (logger, console) =
        memory_logger(OptionsPatch::new().before_hook(StringifyAndParseObjectsHook));

    let payload = json!({"name": "testObject", "items": [1, 2, 3]});
    logger.info(vec![payload.clone()]).await;

    assert_eq!(console.writes()[0].args, vec![payload]);
}

#[tokio::test]
async fn test_caller_info_flows_into_prefix() {
    let console = Arc::new(MemoryConsole::new());
    let logger = Logger::builder()
        .caller_info(true)
        .console_arc(Arc::clone(&console) as Arc<dyn ConsoleSink>)
        .caller_resolver(FixedResolver)
        .build();

    logger.warn(vec![json!("x")]).await;

    let writes = console.writes();
    assert_eq!(writes[0].prefix, "warn | checkout.rs::submit_order | ");
}

#[tokio::test]
async fn test_caller_info_disabled_by_default() {
    let console = Arc::new(MemoryConsole::new());
    let logger = Logger::builder()
        .console_arc(Arc::clone(&console) as Arc<dyn ConsoleSink>)
        .caller_resolver(FixedResolver)
        .build();

    logger.warn(vec![json!("x")]).await;

    assert_eq!(console.writes()[0].prefix, "warn | ");
}

#[tokio::test]
async fn test_custom_prefix_format() {
    let (logger, console) = memory_logger(
        OptionsPatch::new().prefix_format(|level, _caller| format!("[{}] ", level)),
    );

    logger.error(vec![json!("boom")]).await;

    assert_eq!(console.writes()[0].rendered(), "[error] boom");
}

#[tokio::test]
async fn test_hooks_reinstalled_on_every_apply() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let hook = TraceHook::new("counting", &trace);
    let installs = Arc::clone(&hook.installs);

    let (logger, _console) = memory_logger(OptionsPatch::new().before_hook(hook));
    assert_eq!(installs.load(Ordering::SeqCst), 1);

    // An apply that touches no hook list still reinstalls both lists.
    logger.apply(OptionsPatch::new().level(LogLevel::Info));
    assert_eq!(installs.load(Ordering::SeqCst), 2);

    logger.apply(OptionsPatch::new());
    assert_eq!(installs.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_awaited_calls_preserve_order() {
    let (logger, console) = memory_logger(OptionsPatch::new());

    for i in 0..10 {
        logger.info(vec![json!(i)]).await;
    }

    let observed: Vec<LogValue> = console
        .writes()
        .into_iter()
        .map(|w| w.args[0].clone())
        .collect();
    let expected: Vec<LogValue> = (0..10).map(|i| json!(i)).collect();
    assert_eq!(observed, expected);
}

#[tokio::test]
async fn test_shared_logger_across_tasks() {
    let (logger, console) = memory_logger(OptionsPatch::new());
    let logger = Arc::new(logger);

    let mut handles = Vec::new();
    for i in 0..4 {
        let logger = Arc::clone(&logger);
        handles.push(tokio::spawn(async move {
            logger.info(vec![json!(i)]).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Cross-task ordering is unspecified; every write must still land.
    assert_eq!(console.len(), 4);
}
