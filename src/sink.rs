//! Logging sink injected into the [`Assembler`](crate::Assembler).
//!
//! The assembler never touches a global logger directly. It reports through a
//! [`LogSink`] owned by the caller. [`TracingSink`] forwards to `tracing`
//! events (target `runnerconf`), so whatever subscriber the host process
//! installed receives them; [`NoopSink`] discards everything.

use tracing::Level;

/// Destination for the assembler's progress and failure messages.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }
}

/// Forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        // `tracing::event!` needs a constant level.
        match level {
            Level::ERROR => tracing::error!(target: "runnerconf", "{message}"),
            Level::WARN => tracing::warn!(target: "runnerconf", "{message}"),
            Level::INFO => tracing::info!(target: "runnerconf", "{message}"),
            Level::DEBUG => tracing::debug!(target: "runnerconf", "{message}"),
            Level::TRACE => tracing::trace!(target: "runnerconf", "{message}"),
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _level: Level, _message: &str) {}
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}
