//! Console sinks: where the pipeline's formatted output lands

use super::error::Result;
use super::log_event::LogValue;
use super::log_level::LogLevel;
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Output destination for the console-write stage of the pipeline.
///
/// Receives the event's level, the computed prefix, and the *current*
/// argument contents (hooks may have rewritten them by this point).
pub trait ConsoleSink: Send + Sync {
    fn write(&self, level: LogLevel, prefix: &str, args: &[LogValue]) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Render a log argument the way a console would: strings bare, everything
/// else as compact JSON.
pub fn render_arg(arg: &LogValue) -> String {
    match arg {
        LogValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_line(prefix: &str, args: &[LogValue]) -> String {
    let rendered: Vec<String> = args.iter().map(render_arg).collect();
    format!("{}{}", prefix, rendered.join(" "))
}

enum Stream {
    Stdout,
    Stderr,
}

/// Default sink writing to the process's standard streams.
///
/// Each level is mapped to a concrete stream when the sink is constructed
/// (the mapping is total by construction): `error` goes to stderr, everything
/// else to the generic stdout writer, which doubles as the fallback for any
/// level without a dedicated stream.
pub struct StdConsole {
    use_colors: bool,
}

impl StdConsole {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    #[must_use]
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn stream_for(level: LogLevel) -> Stream {
        match level {
            LogLevel::Error => Stream::Stderr,
            LogLevel::Debug | LogLevel::Info | LogLevel::Warn | LogLevel::Log => Stream::Stdout,
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for StdConsole {
    fn write(&self, level: LogLevel, prefix: &str, args: &[LogValue]) -> Result<()> {
        let prefix = if self.use_colors {
            prefix.color(level.color_code()).to_string()
        } else {
            prefix.to_string()
        };

        let line = render_line(&prefix, args);
        match Self::stream_for(level) {
            Stream::Stderr => eprintln!("{}", line),
            Stream::Stdout => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "std_console"
    }
}

/// One captured console write.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedWrite {
    pub level: LogLevel,
    pub prefix: String,
    pub args: Vec<LogValue>,
}

impl CapturedWrite {
    /// The line a text console would have printed.
    pub fn rendered(&self) -> String {
        render_line(&self.prefix, &self.args)
    }
}

/// In-memory sink for asserting on console output in tests.
#[derive(Default)]
pub struct MemoryConsole {
    writes: Mutex<Vec<CapturedWrite>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<CapturedWrite> {
        self.writes.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }
}

impl ConsoleSink for MemoryConsole {
    fn write(&self, level: LogLevel, prefix: &str, args: &[LogValue]) -> Result<()> {
        self.writes.lock().push(CapturedWrite {
            level,
            prefix: prefix.to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory_console"
    }
}
