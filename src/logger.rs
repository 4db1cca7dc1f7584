//! Logging seam for container runs.

use std::sync::Arc;

/// Sink for lifecycle and streamed container output.
///
/// `debug` receives container stdout lines, `error` receives container
/// stderr lines and cleanup failures, `info` receives lifecycle milestones.
pub trait RunLogger: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink: forwards to the `tracing` facade. Silent unless the host
/// application installs a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RunLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// The default shared logger.
pub fn default_logger() -> Arc<dyn RunLogger> {
    Arc::new(TracingLogger)
}
