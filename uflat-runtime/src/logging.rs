// Logging bridge to the bound engine's log sink.

use crate::engine::LogVerbosity;

/// Log level constants for the `ulog!` macro.
pub const LOG_DISPLAY: LogVerbosity = LogVerbosity::Display;
pub const LOG_WARNING: LogVerbosity = LogVerbosity::Warning;
pub const LOG_ERROR: LogVerbosity = LogVerbosity::Error;
pub const LOG_FATAL: LogVerbosity = LogVerbosity::Fatal;

/// Log a message through the engine bound to the calling thread.
///
/// Usage:
/// ```ignore
/// ulog!(LOG_DISPLAY, "spawned {} as {}", kind.name(), name);
/// ulog!(LOG_WARNING, "class override rejected");
/// ```
///
/// Messages are dropped when no engine is bound.
#[macro_export]
macro_rules! ulog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::logging::log_message($level, &format!($($arg)*));
    }};
}

#[doc(hidden)]
pub fn log_message(level: LogVerbosity, message: &str) {
    crate::api::with_engine((), |engine| engine.log(level, message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::install_engine;
    use crate::headless::HeadlessEngine;

    #[test]
    fn ulog_reaches_the_bound_engine() {
        std::thread::spawn(|| {
            let engine = HeadlessEngine::new_rc();
            install_engine(engine.clone());
            crate::ulog!(LOG_WARNING, "value is {}", 3);
            let records = engine.log_records();
            assert_eq!(records.last(), Some(&(LogVerbosity::Warning, "value is 3".to_string())));
        })
        .join()
        .unwrap();
    }

    #[test]
    fn ulog_without_engine_is_a_no_op() {
        std::thread::spawn(|| crate::ulog!(LOG_ERROR, "dropped")).join().unwrap();
    }
}
