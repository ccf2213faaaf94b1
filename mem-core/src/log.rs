//! Minimal logging facade.
//!
//! Mirrors the host stub's `platform::generic` logging shape: a [`LogLevel`], a pluggable sink
//! installed once, and level-tagged macros. No formatting crate beyond `core::fmt` is used, and
//! nothing here allocates.

use core::fmt;

use sync::ControlledModificationCell;

/// Severity of a logged message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Fine-grained tracing, off by default in any real sink.
    Trace,
    /// Diagnostic detail useful while developing the bootstrap sequence.
    Debug,
    /// Notable, expected events (e.g. a merge or a carve).
    Info,
    /// Recoverable anomalies: invalidated descriptors, retried placements.
    Warn,
    /// Failures serious enough that bootstrap is about to fail or trap.
    Error,
}

/// The installed log sink, if any.
///
/// `None` by default: logging is a no-op until [`set_sink`] is called, which hosts exercising this
/// crate in tests typically do not bother with.
static SINK: ControlledModificationCell<Option<fn(LogLevel, fmt::Arguments<'_>)>> =
    ControlledModificationCell::new(None);

/// Installs the function that receives every logged message.
///
/// Intended to be called once, early in bootstrap, before any other operation in this crate is
/// invoked from multiple call sites that might race on installing a different sink. This crate's
/// own bootstrap is single-threaded (see [`crate`]'s crate-level docs), so no synchronization
/// beyond [`ControlledModificationCell`] is required.
///
/// # Safety
///
/// Must not be called concurrently with itself or with any logging macro.
pub unsafe fn set_sink(sink: fn(LogLevel, fmt::Arguments<'_>)) {
    // SAFETY: forwarded from this function's own safety contract.
    unsafe { *SINK.get_mut() = Some(sink) };
}

/// The underlying dispatch function used by the logging macros.
#[doc(hidden)]
pub fn _log(level: LogLevel, args: fmt::Arguments<'_>) {
    if let Some(sink) = SINK.get() {
        sink(level, args);
    }
}

/// Logs a message with [`LogLevel::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => ($crate::log::_log($crate::log::LogLevel::Trace, format_args!($($arg)*)));
}

/// Logs a message with [`LogLevel::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => ($crate::log::_log($crate::log::LogLevel::Debug, format_args!($($arg)*)));
}

/// Logs a message with [`LogLevel::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => ($crate::log::_log($crate::log::LogLevel::Info, format_args!($($arg)*)));
}

/// Logs a message with [`LogLevel::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => ($crate::log::_log($crate::log::LogLevel::Warn, format_args!($($arg)*)));
}

/// Logs a message with [`LogLevel::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => ($crate::log::_log($crate::log::LogLevel::Error, format_args!($($arg)*)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static LAST_LEVEL: AtomicU32 = AtomicU32::new(u32::MAX);

    fn record_sink(level: LogLevel, _args: fmt::Arguments<'_>) {
        LAST_LEVEL.store(level as u32, Ordering::SeqCst);
    }

    #[test]
    fn sink_receives_dispatched_level() {
        // SAFETY: this test owns `LAST_LEVEL` exclusively and runs no other logging concurrently.
        unsafe { set_sink(record_sink) };
        crate::warn!("test message {}", 42);
        assert_eq!(LAST_LEVEL.load(Ordering::SeqCst), LogLevel::Warn as u32);
    }
}
