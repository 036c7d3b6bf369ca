//! Core logger types and traits

pub mod caller;
pub mod error;
pub mod escalation;
pub mod fields;
pub mod line_writer;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod request_context;

pub use caller::{BacktraceInspector, CallerFrame, FixedStack, StackInspector, MAX_CALLER_DEPTH};
pub use error::{LoggerError, Result};
pub use escalation::{catch_escalation, Escalation};
pub use fields::{FieldValue, Fields};
pub use line_writer::{LineWriter, WriterFlags};
pub use log_level::{LogLevel, Termination};
pub use logger::{Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use record::{assemble_record, LogRecord, RESERVED_KEYS};
pub use request_context::{tracing_enricher, ContextEnricher, RequestContext};
