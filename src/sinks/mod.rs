//! Sink implementations
//!
//! A sink is any `Write + Send` destination; these are the ones shipped with
//! the crate.

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::SharedBuffer;
