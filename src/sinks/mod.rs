//! Sink adapter implementations
//!
//! The console sink is the reference adapter for the [`Sink`] contract;
//! file and network delivery targets live outside this crate.

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::{ConsoleFormat, ConsoleSink};
pub use memory::MemorySink;

pub use crate::core::Sink;
