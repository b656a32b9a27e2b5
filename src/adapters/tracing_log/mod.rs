// Tracing log adapter - Job log forwarded to the tracing subscriber

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::ports::*;

/// Job log adapter that emits every line as a `tracing` event
///
/// Events use the `job` target, so the job log can be filtered on its own
/// with `RUST_LOG=job=info`. The interactors run each file inside a span
/// naming it, which the subscriber prints alongside every line.
#[derive(Debug, Default)]
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!(target: "job", "{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!(target: "job", "{}", message);
    }

    async fn error(&self, message: &str) {
        error!(target: "job", "{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!(target: "job", "{}", message);
    }
}
