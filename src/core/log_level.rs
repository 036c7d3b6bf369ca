//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
}

/// What happens to the caller once a line has been written at a given level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Return to the caller
    Continue,
    /// Unwind the current control flow with an [`Escalation`](super::Escalation)
    Escalate,
    /// Exit the process with a non-zero status
    Exit,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Panic,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
        }
    }

    /// Termination policy applied after the line is written.
    ///
    /// `Error` deliberately shares `Panic`'s behavior: both abort the
    /// current operation, only `Fatal` ends the process.
    pub fn termination(&self) -> Termination {
        match self {
            LogLevel::Debug | LogLevel::Info | LogLevel::Warn => Termination::Continue,
            LogLevel::Error | LogLevel::Panic => Termination::Escalate,
            LogLevel::Fatal => Termination::Exit,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_are_lowercase() {
        let names: Vec<&str> = LogLevel::ALL.iter().map(LogLevel::to_str).collect();
        assert_eq!(names, ["debug", "info", "warn", "error", "fatal", "panic"]);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Panic);
    }

    #[test]
    fn test_termination_table() {
        assert_eq!(LogLevel::Debug.termination(), Termination::Continue);
        assert_eq!(LogLevel::Info.termination(), Termination::Continue);
        assert_eq!(LogLevel::Warn.termination(), Termination::Continue);
        assert_eq!(LogLevel::Error.termination(), Termination::Escalate);
        assert_eq!(LogLevel::Fatal.termination(), Termination::Exit);
        assert_eq!(LogLevel::Panic.termination(), Termination::Escalate);
    }

    #[test]
    fn test_parse() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!(
            "trace".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LogLevel::Fatal).unwrap();
        assert_eq!(json, "\"fatal\"");
        let level: LogLevel = serde_json::from_str("\"panic\"").unwrap();
        assert_eq!(level, LogLevel::Panic);
    }
}
