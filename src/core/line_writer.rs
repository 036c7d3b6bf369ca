//! Synchronized line writer shared by every handle derived from one root
//!
//! Each call to [`LineWriter::write_line`] renders the optional header and
//! prefix, then writes and flushes the complete line while holding the lock,
//! so concurrent emissions never interleave their bytes.

use chrono::{DateTime, Local, TimeZone, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::ops::{BitOr, BitOrAssign};

/// Header options for the line writer
///
/// The structured record already carries its own `time` key, so the default
/// is [`WriterFlags::NONE`].
///
/// # Examples
///
/// ```
/// use rust_context_logger::WriterFlags;
///
/// let flags = WriterFlags::DATE | WriterFlags::TIME | WriterFlags::UTC;
/// assert!(flags.contains(WriterFlags::TIME));
/// assert!(!flags.contains(WriterFlags::MICROSECONDS));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WriterFlags(u8);

impl WriterFlags {
    /// No header at all
    pub const NONE: Self = Self(0);
    /// Local date: `2025/01/08`
    pub const DATE: Self = Self(1);
    /// Local time: `10:30:45`
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution, implies `TIME`
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Use UTC instead of the local time zone for the header
    pub const UTC: Self = Self(1 << 3);
    /// Put the prefix right before the line instead of before the header
    pub const MSG_PREFIX: Self = Self(1 << 4);
    /// `DATE | TIME`
    pub const STD: Self = Self(Self::DATE.0 | Self::TIME.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1_1111)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn has_time(self) -> bool {
        self.contains(Self::TIME) || self.contains(Self::MICROSECONDS)
    }
}

impl BitOr for WriterFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WriterFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

pub struct LineWriter {
    out: Mutex<Box<dyn Write + Send>>,
    prefix: String,
    flags: WriterFlags,
}

impl LineWriter {
    pub fn new<W>(out: W, prefix: impl Into<String>, flags: WriterFlags) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            prefix: prefix.into(),
            flags,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> WriterFlags {
        self.flags
    }

    /// Write one line, appending a newline if `line` lacks one
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let rendered = self.render(line);
        let mut out = self.out.lock();
        out.write_all(rendered.as_bytes())?;
        out.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }

    fn render(&self, line: &str) -> String {
        let header = if self.flags.contains(WriterFlags::UTC) {
            self.header(&Utc::now())
        } else {
            self.header(&Local::now())
        };

        let mut rendered =
            String::with_capacity(self.prefix.len() + header.len() + line.len() + 1);
        if self.flags.contains(WriterFlags::MSG_PREFIX) {
            rendered.push_str(&header);
            rendered.push_str(&self.prefix);
        } else {
            rendered.push_str(&self.prefix);
            rendered.push_str(&header);
        }
        rendered.push_str(line);
        if !line.ends_with('\n') {
            rendered.push('\n');
        }
        rendered
    }

    /// Render the date/time header for `now`, each part followed by a space
    fn header<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut header = String::new();
        if self.flags.contains(WriterFlags::DATE) {
            header.push_str(&now.format("%Y/%m/%d ").to_string());
        }
        if self.flags.has_time() {
            let pattern = if self.flags.contains(WriterFlags::MICROSECONDS) {
                "%H:%M:%S%.6f "
            } else {
                "%H:%M:%S "
            };
            header.push_str(&now.format(pattern).to_string());
        }
        header
    }
}

impl fmt::Debug for LineWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineWriter")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
