//! Escalation raised by `Error` and `Panic` level emissions
//!
//! After the line is written the logger unwinds with an [`Escalation`]
//! payload. Code that acts as a recovery boundary (a request handler, a job
//! runner) can turn the unwind back into a value with [`catch_escalation`].

use super::log_level::LogLevel;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Panic payload carrying the encoded line that triggered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    level: LogLevel,
    line: String,
}

impl Escalation {
    pub fn new(level: LogLevel, line: impl Into<String>) -> Self {
        Self {
            level,
            line: line.into(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// The encoded JSON line, as written to the sink
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Look for an escalation inside a panic payload
    pub fn from_payload(payload: &(dyn Any + Send)) -> Option<&Escalation> {
        payload.downcast_ref::<Escalation>()
    }

    /// Unwind the current thread with this escalation as payload
    pub fn raise(self) -> ! {
        panic::panic_any(self)
    }
}

impl fmt::Display for Escalation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl std::error::Error for Escalation {}

/// Run `f`, converting an escalation raised inside it into `Err`
///
/// Panics that do not carry an [`Escalation`] keep unwinding.
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(buffer.clone(), "", WriterFlags::NONE);
///
/// let result = catch_escalation(|| logger.errorf(format_args!("lookup failed: {}", 42)));
///
/// let escalation = result.unwrap_err();
/// assert_eq!(escalation.level(), LogLevel::Error);
/// assert!(buffer.contents().contains("lookup failed: 42"));
/// ```
pub fn catch_escalation<F, R>(f: F) -> Result<R, Escalation>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Escalation>() {
            Ok(escalation) => Err(*escalation),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
