//! Logging macros for ergonomic log message formatting.
//!
//! These macros forward `format!`-style arguments to the `*f` emission
//! methods of a [`Logger`](crate::Logger) without allocating an intermediate
//! format string at the call site.
//!
//! # Examples
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::info;
//!
//! let logger = Logger::new(SharedBuffer::new(), "", WriterFlags::NONE);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// `Error`, `Fatal` and `Panic` keep their termination behavior.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(SharedBuffer::new(), "", WriterFlags::NONE);
/// use rust_context_logger::log;
/// log!(logger, LogLevel::Warn, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.output($level, &::std::fmt::format(::std::format_args!($($arg)+)))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message, then unwind with an `Escalation`.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(SharedBuffer::new(), "", WriterFlags::NONE);
/// use rust_context_logger::error;
/// let result = catch_escalation(|| error!(logger, "Error code: {}", 500));
/// assert!(result.is_err());
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then exit the process.
///
/// ```no_run
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_context_logger::fatal;
/// fatal!(logger, "Unable to bind {}", "0.0.0.0:8080");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// Log a panic-level message, then unwind with an `Escalation`.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{catch_escalation, LogLevel, Logger, WriterFlags};
    use crate::sinks::SharedBuffer;

    fn logger() -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Logger::new(buffer.clone(), "", WriterFlags::NONE), buffer)
    }

    #[test]
    fn test_log_macro() {
        let (logger, buffer) = logger();
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert!(buffer.contents().contains(r#""message":"Formatted: 42""#));
    }

    #[test]
    fn test_leveled_macros() {
        let (logger, buffer) = logger();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);

        let contents = buffer.contents();
        assert!(contents.contains(r#""level":"debug""#));
        assert!(contents.contains(r#""message":"Items: 100""#));
        assert!(contents.contains(r#""message":"Retry 1 of 3""#));
    }

    #[test]
    fn test_escalating_macros() {
        let (logger, buffer) = logger();

        let err = catch_escalation(|| error!(logger, "Code: {}", 500)).unwrap_err();
        assert_eq!(err.level(), LogLevel::Error);

        let err = catch_escalation(|| panic_log!(logger, "invariant {}", "broken")).unwrap_err();
        assert_eq!(err.level(), LogLevel::Panic);

        assert_eq!(buffer.lines().len(), 2);
    }
}
