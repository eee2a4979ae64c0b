//! User-facing notification sink
//!
//! The UI layer plugs its toast implementation in here; library code only
//! talks to the trait. The default implementation logs through `tracing`
//! so headless callers (tests, CLIs) still see the feedback.

/// Sink for transient user feedback.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Notifier that forwards everything to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(kind = "error", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{message}");
    }
}
