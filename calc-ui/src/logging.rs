use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{Event, Level, Subscriber, error, info};
use tracing_subscriber::{
    EnvFilter,
    Layer, // used by .with_filter() on the stdout layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LogSettings;

// --- Formatter ---

/// `<local time> <LEVEL> <file:line> <fields>`, colored on a terminal.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };

        write!(
            writer,
            "{}{}{} ",
            paint("\x1b[2m"),
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            paint("\x1b[0m")
        )?;

        let level_color = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        write!(
            writer,
            "{}{:>5}{} ",
            paint(level_color),
            meta.level(),
            paint("\x1b[0m")
        )?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .rsplit_once("src/")
                .or_else(|| file.rsplit_once("src\\"))
                .map_or(file, |(_, rest)| rest);
            write!(writer, "{}{file}:{line}{} ", paint("\x1b[36m"), paint("\x1b[0m"))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

/// A MakeWriter that can be pointed at a file after initialization.
/// While no file is set, all writes are discarded.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Runtime control ---

type SetStrFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type SetBoolFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

/// Runtime handle onto the installed subscriber.
pub struct LogControl {
    set_level: SetStrFn,
    set_stdout: SetBoolFn,
    file: SharedFile,
}

impl LogControl {
    /// Changes the active filter. Accepts a bare level ("warn", "debug")
    /// or any full EnvFilter directive.
    pub fn set_level(
        &self,
        level: &str,
    ) -> Result<()> {
        (self.set_level)(level)
    }

    /// Shows or hides stdout output without affecting file output.
    pub fn set_stdout_enabled(
        &self,
        enabled: bool,
    ) -> Result<()> {
        (self.set_stdout)(enabled)
    }

    /// Starts appending log output to `path`, replacing any open file.
    /// The directory must already exist.
    pub fn enable_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;
        *self.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
        Ok(())
    }

    pub fn disable_file(&self) {
        *self.file.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Applies the `[log]` section of the configuration.
    pub fn apply(
        &self,
        settings: &LogSettings,
    ) -> Result<()> {
        if let Some(level) = &settings.level {
            self.set_level(level)?;
        }
        self.set_stdout_enabled(settings.stdout)?;
        match &settings.file {
            Some(path) => {
                self.enable_file(path)?;
                info!(path = %path.display(), "file logging enabled");
            }
            None => self.disable_file(),
        }
        Ok(())
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Call once at startup.
///
/// - Stdout: colored when attached to a terminal, plain when piped.
/// - File: inactive until [`LogControl::enable_file`] is called.
/// - Level: RUST_LOG when set, otherwise INFO.
///
/// Returns `None` if another subscriber was already installed.
pub fn init_logging() -> Option<LogControl> {
    let file: SharedFile = Arc::new(Mutex::new(None));

    // Per-stdout gate; the level filter below stays the ceiling.
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(default_filter());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(LogControl {
        set_level: Box::new(move |level: &str| {
            let filter = EnvFilter::try_new(level)
                .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))?;
            level_handle
                .reload(filter)
                .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
        }),
        set_stdout: Box::new(move |enabled: bool| {
            let gate = if enabled { "trace" } else { "off" };
            stdout_handle
                .reload(EnvFilter::new(gate))
                .map_err(|e| anyhow::anyhow!("stdout reload failed: {e}"))
        }),
        file,
    })
}

/// Logs a background task failure with context.
pub fn log_task_error(
    task_name: &'static str,
    result: Result<()>,
) {
    if let Err(error) = result {
        error!(task = task_name, ?error, "background task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_discards_until_file_is_set() {
        let slot = FileSlot(Arc::new(Mutex::new(None)));
        let mut writer = slot.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn log_task_error_accepts_ok_and_err() {
        log_task_error("ok-task", Ok(()));
        log_task_error("failing-task", Err(anyhow::anyhow!("boom")));
    }
}
