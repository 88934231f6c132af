//! Logging abstractions
//!
//! Providers accept a `SharedLogger` for diagnostics their owner wants to see.
//! Library internals write trace output to the global file logger instead,
//! which stays silent unless `CONFKIT_DEBUG` is set.

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, LoggerExt, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;

pub use file_logger::{log_file_path, LogLevel};
