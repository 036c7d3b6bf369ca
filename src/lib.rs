//! # Rust Context Logger
//!
//! Structured, leveled, context-aware JSON logging for services.
//!
//! ## Features
//!
//! - **Immutable handles**: `with_fields`, `with_context`, `with_caller` and
//!   `with_callers_frames` derive new handles and never touch the parent
//! - **Structured records**: one JSON object per line with `level`, `time`,
//!   `message`, `callers` and any attached fields
//! - **Severity-driven termination**: `error`/`panic` unwind the caller with an
//!   [`Escalation`], `fatal` exits the process
//! - **Thread safe**: handles are `Send + Sync`; the shared sink writes whole
//!   lines under a lock

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        catch_escalation, tracing_enricher, CallerFrame, ContextEnricher, Escalation,
        FieldValue, Fields, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        RequestContext, Result, StackInspector, WriterFlags,
    };
    pub use crate::sinks::{ConsoleSink, SharedBuffer};
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    assemble_record, catch_escalation, tracing_enricher, BacktraceInspector, CallerFrame,
    ContextEnricher, Escalation, FieldValue, Fields, FixedStack, LineWriter, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, RequestContext, Result, StackInspector,
    Termination, WriterFlags, FATAL_EXIT_CODE, MAX_CALLER_DEPTH, RESERVED_KEYS,
};
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
pub use crate::sinks::{ConsoleSink, SharedBuffer};
