//! Tracing setup for the payroll session.
//!
//! Console output goes to stderr so it never interleaves with the table the
//! session prints on stdout. After [`init_logging`] the filter, the console
//! gate and the log file can all be changed while the session runs; the
//! `level` and `logfile` session commands go through the functions here.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    Layer, // .with_filter() on the console layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
        writer::OptionalWriter,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_DIRECTIVE: &str = "info,payroll_ui=debug";

// --- Formatter ---

/// `12:04:31.207  INFO ui::state: message key=value`
///
/// Sessions are short and interactive, so only the local time of day is
/// printed. Warnings and errors also carry their source location.
struct SessionFormat;

/// Shortens `payroll_core::ledger` to `core::ledger` and `payroll_ui::app`
/// to `ui::app`. Targets outside the workspace are left alone.
fn short_target(target: &str) -> &str {
    target.strip_prefix("payroll_").unwrap_or(target)
}

/// Shortens `payroll-ui/src/state.rs` to `state.rs`.
fn short_file(file: &str) -> &str {
    file.rsplit_once("src/")
        .or_else(|| file.rsplit_once("src\\"))
        .map_or(file, |(_, rest)| rest)
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "31",
        Level::WARN => "33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for SessionFormat
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
        let level = meta.level();
        let time = Local::now().format("%H:%M:%S%.3f");
        let target = short_target(meta.target());

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m \x1b[1;{}m{level:>5}\x1b[0m \x1b[2m{target}:\x1b[0m ",
                level_color(level)
            )?;
        } else {
            write!(writer, "{time} {level:>5} {target}: ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        if *level <= Level::WARN {
            if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
                write!(writer, " ({}:{line})", short_file(file))?;
            }
        }
        writeln!(writer)
    }
}

// --- Log file sink ---

/// Shared, swappable log file. Events are dropped while it is empty.
#[derive(Clone, Default)]
struct LogFile(Arc<RwLock<Option<Arc<File>>>>);

impl LogFile {
    fn replace(
        &self,
        file: Option<File>,
    ) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = file.map(Arc::new);
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = OptionalWriter<Arc<File>>;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .into()
    }
}

// --- Runtime control ---

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

/// Reload handles captured by [`init_logging`].
struct LogControl {
    level: ReloadFn,
    console: ReloadFn,
    file: LogFile,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();

fn control() -> Result<&'static LogControl> {
    CONTROL.get().ok_or_else(|| anyhow!("logging is not initialized"))
}

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> ReloadFn
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("{what} filter reload failed: {e}"))
    })
}

/// Parses a bare level ("warn") or a full directive ("payroll_core=trace").
pub fn parse_filter(directive: &str) -> Result<EnvFilter> {
    let directive = directive.trim();
    if directive.is_empty() {
        bail!("empty log filter");
    }
    EnvFilter::try_new(directive).map_err(|e| anyhow!("invalid log filter '{directive}': {e}"))
}

/// `RUST_LOG` wins, then the configured level, then [`DEFAULT_DIRECTIVE`].
fn initial_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match configured.map(parse_filter) {
        Some(Ok(filter)) => filter,
        Some(Err(e)) => {
            eprintln!("{e:#}; using '{DEFAULT_DIRECTIVE}'");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

// --- Public API ---

/// Replaces the active log filter.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = parse_filter(directive)?;
    (control()?.level)(filter)
}

/// Shows or hides console log output. The log file is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let gate = if enabled { "trace" } else { "off" };
    (control()?.console)(EnvFilter::new(gate))
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let control = control()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    control.file.replace(Some(file));
    Ok(())
}

/// Closes the current log file, if any.
pub fn disable_file_logging() -> Result<()> {
    control()?.file.replace(None);
    Ok(())
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// - Console: stderr, colored when attached to a terminal.
/// - File: inactive until [`enable_file_logging`] is called.
/// - Level: `RUST_LOG` if set, else `level`, else `info,payroll_ui=debug`.
pub fn init_logging(level: Option<&str>) {
    if CONTROL.get().is_some() {
        return;
    }

    let file = LogFile::default();
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(initial_filter(level));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(SessionFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(SessionFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = CONTROL.set(LogControl {
            level: reloader(level_handle, "level"),
            console: reloader(console_handle, "console"),
            file,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_target_drops_workspace_prefix() {
        assert_eq!(short_target("payroll_core::ledger"), "core::ledger");
        assert_eq!(short_target("payroll_ui::state"), "ui::state");
        assert_eq!(short_target("csv::reader"), "csv::reader");
    }

    #[test]
    fn short_file_strips_crate_prefix() {
        assert_eq!(short_file("payroll-ui/src/state.rs"), "state.rs");
        assert_eq!(short_file("src/views/mod.rs"), "views/mod.rs");
        assert_eq!(short_file("C:\\work\\payroll-ui\\src\\app.rs"), "app.rs");
        assert_eq!(short_file("lib.rs"), "lib.rs");
    }

    #[test]
    fn parse_filter_accepts_levels_and_directives() {
        assert!(parse_filter("warn").is_ok());
        assert!(parse_filter(" debug ").is_ok());
        assert!(parse_filter("info,payroll_core=trace").is_ok());
    }

    #[test]
    fn parse_filter_rejects_blank() {
        assert!(parse_filter("   ").is_err());
    }

    // The unit-test binary never installs a subscriber.
    #[test]
    fn controls_fail_before_init() {
        let err = set_log_level("debug").unwrap_err();
        assert_eq!(err.to_string(), "logging is not initialized");
        assert!(disable_file_logging().is_err());
        assert!(set_console_enabled(false).is_err());
    }

    #[test]
    fn log_file_sink_discards_until_set() {
        use std::io::Write;

        let sink = LogFile::default();
        let mut writer = sink.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);

        let path = std::env::temp_dir().join(format!("payroll-log-{}.txt", std::process::id()));
        sink.replace(Some(File::create(&path).unwrap()));
        sink.make_writer().write_all(b"kept\n").unwrap();
        sink.replace(None);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
        std::fs::remove_file(&path).unwrap();
    }
}
