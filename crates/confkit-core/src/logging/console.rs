//! Console logger implementation

use super::traits::Logger;

/// A logger that writes to stdout/stderr
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default `[confkit]` prefix
    pub fn new() -> Self {
        Self {
            prefix: "[confkit]".to_string(),
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn line(&self, level: &str, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{}", self.line("DEBUG", message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.line("INFO", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.line("WARN", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.line("ERROR", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigProvider, MemoryConfigProvider};
    use std::sync::Arc;

    #[test]
    fn test_console_logger_prefix() {
        assert_eq!(ConsoleLogger::new().line("INFO", "hi"), "[confkit] INFO: hi");
        assert_eq!(ConsoleLogger::with_prefix("[app]").line("WARN", "x"), "[app] WARN: x");
    }

    #[test]
    fn test_console_logger_with_provider() {
        let config = MemoryConfigProvider::new().with_logger(Arc::new(ConsoleLogger::new()));
        config.register_change_callback("k", Arc::new(|_, _, _| {}));
        config.set("k", "v");
    }
}
