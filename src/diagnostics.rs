//! Injected message sinks.
//!
//! Library routines never install or assume a global logger for their
//! user-facing warnings. Callers that want them pass a [`WarnSink`]; the
//! stock [`LogSink`] forwards to the `log` facade.

/// Receiver for diagnostic warnings emitted by a single call.
pub trait WarnSink {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `log::warn!` under the given target.
#[derive(Clone, Copy, Debug)]
pub struct LogSink {
    pub target: &'static str,
}

impl Default for LogSink {
    fn default() -> Self {
        Self {
            target: "phase_merge",
        }
    }
}

impl WarnSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!(target: self.target, "{message}");
    }
}

impl<F> WarnSink for F
where
    F: Fn(&str),
{
    fn warn(&self, message: &str) {
        self(message)
    }
}
