//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction so hosts can route provider diagnostics
///
/// Implementations:
/// - `NoOpLogger`: Silent logger, the default for providers
/// - `ConsoleLogger`: Logs to stdout/stderr
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension trait for logging with format arguments
pub trait LoggerExt: Logger {
    fn debug_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.debug(&args.to_string());
    }

    fn info_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.info(&args.to_string());
    }

    fn warn_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.warn(&args.to_string());
    }

    fn error_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.error(&args.to_string());
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}

/// Log through a `Logger` with `format!` arguments
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collecting {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for Collecting {
        fn debug(&self, message: &str) {
            self.lines.lock().push(format!("debug {}", message));
        }
        fn info(&self, message: &str) {
            self.lines.lock().push(format!("info {}", message));
        }
        fn warn(&self, message: &str) {
            self.lines.lock().push(format!("warn {}", message));
        }
        fn error(&self, message: &str) {
            self.lines.lock().push(format!("error {}", message));
        }
    }

    #[test]
    fn test_logger_ext_formats() {
        let logger = Collecting::default();
        logger.info_fmt(format_args!("{} keys", 3));
        logger.error_fmt(format_args!("bad key {:?}", "a.b"));
        assert_eq!(*logger.lines.lock(), vec!["info 3 keys", "error bad key \"a.b\""]);
    }

    #[test]
    fn test_log_macros_on_shared_logger() {
        let collecting = Arc::new(Collecting::default());
        let logger: SharedLogger = collecting.clone();
        crate::log_debug!(logger, "scope {}", "db");
        crate::log_warn!(logger, "missing {}", 1);
        assert_eq!(*collecting.lines.lock(), vec!["debug scope db", "warn missing 1"]);
    }
}
