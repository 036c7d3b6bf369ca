//! Call-stack capture for caller provenance
//!
//! Stack walking sits behind [`StackInspector`] so the logger can be driven by
//! the real unwinder ([`BacktraceInspector`]) or by a canned stack
//! ([`FixedStack`]). Both answer the same two questions: "which frame is
//! `skip` levels above the call site" and "what are the first `max` frames
//! above the call site". Failing to resolve a frame is never an error.

use std::fmt;

/// Upper bound on frames recorded by `with_callers_frames`
pub const MAX_CALLER_DEPTH: usize = 25;

/// Upper bound on raw symbols inspected while looking for the call site
const MAX_SCANNED_SYMBOLS: usize = 256;

/// Symbol prefixes and fragments that belong to the capture machinery itself
const INTERNAL_MARKERS: &[&str] = &[
    concat!(env!("CARGO_CRATE_NAME"), "::core::caller::BacktraceInspector"),
    concat!(env!("CARGO_CRATE_NAME"), "::core::logger::Logger::with_caller"),
];

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: String,
}

impl CallerFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            function: function.into(),
        }
    }

    fn is_internal(&self) -> bool {
        self.function.starts_with("backtrace::")
            || INTERNAL_MARKERS
                .iter()
                .any(|marker| self.function.contains(marker))
    }
}

/// Renders as `<file>: <line> <function>`
impl fmt::Display for CallerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.file.as_deref().unwrap_or("<unknown>"),
            self.line.unwrap_or(0),
            self.function
        )
    }
}

/// Source of caller frames
///
/// Frame `0` is the function that called into the logger (for example the
/// function invoking `Logger::with_caller`), frame `1` its caller, and so on.
pub trait StackInspector: Send + Sync {
    /// The frame `skip` levels above the call site, if it can be resolved
    fn caller(&self, skip: usize) -> Option<CallerFrame>;

    /// Up to `max` resolvable frames, starting at the call site
    fn callers(&self, max: usize) -> Vec<CallerFrame>;
}

/// Inspector backed by the platform unwinder
///
/// Frames are resolved through debug info when available. With a stripped
/// binary the call site cannot be located and both methods come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceInspector;

impl BacktraceInspector {
    /// Resolve the current stack and drop everything up to and including
    /// the last frame that belongs to the capture machinery.
    #[inline(never)]
    fn capture(limit: usize) -> Vec<CallerFrame> {
        let mut frames = Vec::new();

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if let Some(name) = symbol.name() {
                    frames.push(CallerFrame {
                        file: symbol.filename().map(|p| p.display().to_string()),
                        line: symbol.lineno(),
                        function: format!("{:#}", name),
                    });
                }
            });
            frames.len() < MAX_SCANNED_SYMBOLS
        });

        let Some(last_internal) = frames.iter().rposition(CallerFrame::is_internal) else {
            return Vec::new();
        };

        frames
            .into_iter()
            .skip(last_internal + 1)
            .take(limit)
            .collect()
    }
}

impl StackInspector for BacktraceInspector {
    #[inline(never)]
    fn caller(&self, skip: usize) -> Option<CallerFrame> {
        Self::capture(skip.saturating_add(1)).into_iter().nth(skip)
    }

    #[inline(never)]
    fn callers(&self, max: usize) -> Vec<CallerFrame> {
        Self::capture(max)
    }
}

/// Inspector that always reports the same stack, innermost frame first
///
/// Useful for deterministic tests of code that records callers.
#[derive(Debug, Clone, Default)]
pub struct FixedStack {
    frames: Vec<CallerFrame>,
}

impl FixedStack {
    pub fn new(frames: Vec<CallerFrame>) -> Self {
        Self { frames }
    }

    /// A synthetic stack of `depth` frames named `frame_0..frame_{depth-1}`
    pub fn with_depth(depth: usize) -> Self {
        let frames = (0..depth)
            .map(|i| CallerFrame::new("src/app.rs", 10 + i as u32, format!("app::frame_{}", i)))
            .collect();
        Self { frames }
    }
}

impl StackInspector for FixedStack {
    fn caller(&self, skip: usize) -> Option<CallerFrame> {
        self.frames.get(skip).cloned()
    }

    fn callers(&self, max: usize) -> Vec<CallerFrame> {
        self.frames.iter().take(max).cloned().collect()
    }
}

/// Format frames into the strings stored on a handle
pub(crate) fn format_frames(frames: &[CallerFrame]) -> Vec<String> {
    frames.iter().map(CallerFrame::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn capture_from_here() -> Vec<CallerFrame> {
        BacktraceInspector.callers(MAX_CALLER_DEPTH)
    }

    #[inline(never)]
    fn direct_caller() -> Option<CallerFrame> {
        BacktraceInspector.caller(0)
    }

    #[inline(never)]
    fn recurse(depth: usize) -> Vec<CallerFrame> {
        if depth == 0 {
            capture_from_here()
        } else {
            let frames = recurse(depth - 1);
            std::hint::black_box(frames)
        }
    }

    #[test]
    fn test_frame_display() {
        let frame = CallerFrame::new("src/handlers.rs", 42, "app::handlers::create");
        assert_eq!(frame.to_string(), "src/handlers.rs: 42 app::handlers::create");

        let unresolved = CallerFrame {
            file: None,
            line: None,
            function: "app::main".to_string(),
        };
        assert_eq!(unresolved.to_string(), "<unknown>: 0 app::main");
    }

    #[test]
    fn test_backtrace_starts_at_call_site() {
        let frames = capture_from_here();
        assert!(!frames.is_empty());
        assert!(
            frames[0].function.ends_with("capture_from_here"),
            "first frame was {}",
            frames[0]
        );
        assert!(frames.iter().all(|f| !f.is_internal()));
    }

    #[test]
    fn test_backtrace_caller_zero_is_direct_caller() {
        let frame = direct_caller().expect("frame resolvable in test builds");
        assert!(frame.function.ends_with("direct_caller"), "got {}", frame);
    }

    #[test]
    fn test_backtrace_is_bounded() {
        let frames = recurse(40);
        assert_eq!(frames.len(), MAX_CALLER_DEPTH);
    }

    #[test]
    fn test_backtrace_unreachable_depth_is_none() {
        assert!(BacktraceInspector.caller(10_000).is_none());
    }

    #[test]
    fn test_fixed_stack() {
        let stack = FixedStack::with_depth(3);
        assert_eq!(stack.callers(25).len(), 3);
        assert_eq!(stack.callers(2).len(), 2);
        assert_eq!(stack.caller(1).map(|f| f.function), Some("app::frame_1".to_string()));
        assert!(stack.caller(3).is_none());
    }
}
