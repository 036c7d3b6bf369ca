//! Logger handle: immutable chaining and severity-driven emission

use super::{
    caller::{format_frames, BacktraceInspector, CallerFrame, StackInspector, MAX_CALLER_DEPTH},
    error::{LoggerError, Result},
    escalation::Escalation,
    fields::{FieldValue, Fields},
    line_writer::{LineWriter, WriterFlags},
    log_level::{LogLevel, Termination},
    metrics::LoggerMetrics,
    record::{assemble_record, LogRecord},
    request_context::{ContextEnricher, RequestContext},
};
use crate::sinks::ConsoleSink;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Exit status used when a `Fatal` line has been written
pub const FATAL_EXIT_CODE: i32 = 1;

/// State shared by a root logger and every handle derived from it
struct Shared {
    writer: LineWriter,
    metrics: LoggerMetrics,
    inspector: Arc<dyn StackInspector>,
    enricher: Option<ContextEnricher>,
}

/// A cheap, cloneable logging handle
///
/// Handles are never modified in place. Every `with_*` method copies the
/// handle and swaps in one freshly built attribute, so handles derived from
/// the same parent on different threads never see each other's additions.
/// The sink is the only state they share.
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(buffer.clone(), "", WriterFlags::NONE);
///
/// logger
///     .with_fields([("request_id", "abc")])
///     .infof(format_args!("hello {}", "world"));
///
/// let line: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
/// assert_eq!(line["level"], "info");
/// assert_eq!(line["message"], "hello world");
/// assert_eq!(line["request_id"], "abc");
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    context: Option<Arc<RequestContext>>,
    fields: Option<Arc<Fields>>,
    callers: Option<Arc<[String]>>,
}

impl Logger {
    /// Create a root handle writing to `out`
    ///
    /// `prefix` and `flags` configure the underlying line writer; the
    /// handle starts with no context, fields or callers.
    pub fn new<W>(out: W, prefix: impl Into<String>, flags: WriterFlags) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_parts(
            LineWriter::new(out, prefix, flags),
            Arc::new(BacktraceInspector),
            None,
        )
    }

    fn from_parts(
        writer: LineWriter,
        inspector: Arc<dyn StackInspector>,
        enricher: Option<ContextEnricher>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                writer,
                metrics: LoggerMetrics::new(),
                inspector,
                enricher,
            }),
            context: None,
            fields: None,
            callers: None,
        }
    }

    /// Derive a handle whose fields are this handle's fields overlaid with
    /// `additions`
    #[must_use]
    pub fn with_fields(&self, additions: impl Into<Fields>) -> Logger {
        let additions = additions.into();
        let merged = match &self.fields {
            Some(existing) => existing.merged(&additions),
            None => additions,
        };
        Logger {
            fields: Some(Arc::new(merged)),
            ..self.clone()
        }
    }

    /// Derive a handle with one extra field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields(Fields::new().with_field(key, value))
    }

    /// Derive a handle carrying `ctx`
    #[must_use]
    pub fn with_context(&self, ctx: RequestContext) -> Logger {
        Logger {
            context: Some(Arc::new(ctx)),
            ..self.clone()
        }
    }

    /// Derive a handle recording the single frame `skip` levels up the stack
    ///
    /// `skip == 0` records `with_caller` itself, `skip == 1` the function
    /// calling it, `skip == 2` that function's caller, and so on. When the
    /// frame cannot be resolved the derived handle keeps this handle's
    /// callers.
    ///
    /// Optimized builds may turn a call in tail position (for example
    /// `fn f(l: &Logger) -> Logger { l.with_caller(1) }`) into a jump, in
    /// which case `f` has no frame of its own and a frame further up the
    /// stack is recorded instead.
    #[must_use]
    #[inline(never)]
    pub fn with_caller(&self, skip: usize) -> Logger {
        let frame = match skip {
            0 => Some(CallerFrame::new(
                file!(),
                line!(),
                concat!(module_path!(), "::Logger::with_caller"),
            )),
            _ => self.shared.inspector.caller(skip - 1),
        };
        let callers = match frame {
            Some(frame) => Some(Arc::from(vec![frame.to_string()])),
            None => self.callers.clone(),
        };
        Logger {
            callers,
            ..self.clone()
        }
    }

    /// Derive a handle recording up to 25 frames, starting at the caller of
    /// this method
    #[must_use]
    #[inline(never)]
    pub fn with_callers_frames(&self) -> Logger {
        let frames = self.shared.inspector.callers(MAX_CALLER_DEPTH);
        Logger {
            callers: Some(Arc::from(format_frames(&frames))),
            ..self.clone()
        }
    }

    /// Fields attached to this handle
    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_deref()
    }

    /// Request context attached to this handle
    pub fn context(&self) -> Option<&RequestContext> {
        self.context.as_deref()
    }

    /// Caller frames attached to this handle, empty if none were captured
    pub fn callers(&self) -> &[String] {
        self.callers.as_deref().unwrap_or(&[])
    }

    /// Metrics shared with every handle derived from the same root
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn prefix(&self) -> &str {
        self.shared.writer.prefix()
    }

    pub fn flags(&self) -> WriterFlags {
        self.shared.writer.flags()
    }

    /// Build the record this handle would emit for `message`
    pub fn record(&self, level: LogLevel, message: &str) -> LogRecord {
        let mut record = assemble_record(level, message, self.fields(), self.callers());
        if let (Some(enricher), Some(ctx)) = (&self.shared.enricher, &self.context) {
            record.fill_missing(&enricher(ctx));
        }
        record
    }

    /// Emit `message` at `level` and apply the level's termination policy
    ///
    /// Returns normally only for `Debug`, `Info` and `Warn`.
    pub fn output(&self, level: LogLevel, message: &str) {
        let line = self.write_record(level, message);
        match level.termination() {
            Termination::Continue => {}
            Termination::Escalate => self.escalate(level, line),
            Termination::Exit => self.exit(),
        }
    }

    /// Encode and write one record, returning the encoded line
    fn write_record(&self, level: LogLevel, message: &str) -> String {
        let line = match self.record(level, message).to_json() {
            Ok(line) => line,
            Err(e) => {
                self.shared.metrics.record_encode_failure();
                eprintln!("[LOGGER ERROR] Failed to encode {} record: {}", level, e);
                String::new()
            }
        };

        match self.shared.writer.write_line(&line) {
            Ok(()) => {
                self.shared.metrics.record_written();
            }
            Err(e) => {
                self.shared.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] Failed to write {} record: {}", level, e);
            }
        }

        line
    }

    fn escalate(&self, level: LogLevel, line: String) -> ! {
        self.shared.metrics.record_escalation();
        Escalation::new(level, line).raise()
    }

    fn exit(&self) -> ! {
        if let Err(e) = self.shared.writer.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    fn emit_escalating(&self, level: LogLevel, message: &str) -> ! {
        let line = self.write_record(level, message);
        self.escalate(level, line)
    }

    /// Flush the shared sink
    pub fn flush(&self) -> Result<()> {
        self.shared
            .writer
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing", "sink flush failed", e))
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.output(LogLevel::Debug, &message.to_string());
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.output(LogLevel::Debug, &fmt::format(args));
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.output(LogLevel::Info, &message.to_string());
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.output(LogLevel::Info, &fmt::format(args));
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.output(LogLevel::Warn, &message.to_string());
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.output(LogLevel::Warn, &fmt::format(args));
    }

    /// Write an `error` line, then unwind with an [`Escalation`]
    pub fn error(&self, message: impl fmt::Display) -> ! {
        self.emit_escalating(LogLevel::Error, &message.to_string())
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_escalating(LogLevel::Error, &fmt::format(args))
    }

    /// Write a `panic` line, then unwind with an [`Escalation`]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.emit_escalating(LogLevel::Panic, &message.to_string())
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_escalating(LogLevel::Panic, &fmt::format(args))
    }

    /// Write a `fatal` line, flush, and exit the process with status 1
    ///
    /// Reserved for startup failures and broken invariants; nothing can
    /// intercept the exit.
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.write_record(LogLevel::Fatal, &message.to_string());
        self.exit()
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.write_record(LogLevel::Fatal, &fmt::format(args));
        self.exit()
    }
}

impl Default for Logger {
    /// Root handle writing to stderr with no prefix and no header
    fn default() -> Self {
        Self::new(ConsoleSink::stderr(), "", WriterFlags::NONE)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("writer", &self.shared.writer)
            .field("context", &self.context)
            .field("fields", &self.fields)
            .field("callers", &self.callers)
            .finish()
    }
}

/// Builder for constructing a root Logger with a fluent API
///
/// # Example
/// ```
/// use rust_context_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .stdout()
///     .prefix("[api] ")
///     .flags(WriterFlags::NONE)
///     .enricher(tracing_enricher())
///     .build();
///
/// assert_eq!(logger.prefix(), "[api] ");
/// ```
pub struct LoggerBuilder {
    out: Option<Box<dyn Write + Send>>,
    prefix: String,
    flags: WriterFlags,
    inspector: Arc<dyn StackInspector>,
    enricher: Option<ContextEnricher>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            out: None,
            prefix: String::new(),
            flags: WriterFlags::NONE,
            inspector: Arc::new(BacktraceInspector),
            enricher: None,
        }
    }

    /// Write lines to `out`
    ///
    /// If no writer is configured the logger writes to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.out = Some(Box::new(out));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout(self) -> Self {
        self.writer(ConsoleSink::stdout())
    }

    #[must_use = "builder methods return a new value"]
    pub fn stderr(self) -> Self {
        self.writer(ConsoleSink::stderr())
    }

    /// Write lines to a file opened in append mode
    #[cfg(feature = "file")]
    pub fn file(self, path: impl Into<std::path::PathBuf>) -> Result<Self> {
        Ok(self.writer(crate::sinks::FileSink::new(path)?))
    }

    /// Literal prefix written by the line writer
    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: WriterFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Turn handle contexts into record fields at emission time
    #[must_use = "builder methods return a new value"]
    pub fn enricher(mut self, enricher: ContextEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Replace the stack walker used by `with_caller`/`with_callers_frames`
    #[must_use = "builder methods return a new value"]
    pub fn stack_inspector<I: StackInspector + 'static>(mut self, inspector: I) -> Self {
        self.inspector = Arc::new(inspector);
        self
    }

    /// Build the root Logger
    pub fn build(self) -> Logger {
        let writer = match self.out {
            Some(out) => LineWriter::new(out, self.prefix, self.flags),
            None => LineWriter::new(ConsoleSink::stderr(), self.prefix, self.flags),
        };
        Logger::from_parts(writer, self.inspector, self.enricher)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
