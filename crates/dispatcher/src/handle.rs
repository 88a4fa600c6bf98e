//! SinkHandle - owns a sink and serializes every write to it

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use contracts::{LineSink, SinkIdentity};

use crate::metrics::SinkMetrics;
use crate::sinks::Sink;

/// Handle to a registered sink
///
/// Writes go through a FIFO async mutex, so each `process` call on one handle
/// runs to completion before the next begins. Separate handles are
/// independent and give no ordering guarantee relative to each other.
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// Identity, cached so registry checks never wait on a write
    identity: SinkIdentity,
    /// The sink itself
    sink: Mutex<Sink>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
}

impl SinkHandle {
    /// Wrap a sink in a new handle
    pub fn new(sink: impl Into<Sink>) -> Self {
        let sink = sink.into();
        let identity = sink.identity();

        Self {
            name: identity.to_string(),
            identity,
            sink: Mutex::new(sink),
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get sink identity
    pub fn identity(&self) -> &SinkIdentity {
        &self.identity
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Write one line, waiting for any in-flight write on this sink first
    ///
    /// Never fails: an unavailable destination drops the line.
    pub async fn process(&self, line: &str) {
        let mut sink = self.sink.lock().await;

        match sink.process(line).await {
            Ok(()) => {
                self.metrics.inc_write_count();
            }
            Err(e) => {
                self.metrics.inc_dropped_count();
                warn!(sink = %self.name, error = %e, "Line dropped");
                // Continue processing - don't crash on single failure
            }
        }
    }

    /// Flush the sink
    #[instrument(name = "sink_handle_flush", skip(self), fields(sink = %self.name))]
    pub async fn flush(&self) {
        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.flush().await {
            warn!(sink = %self.name, error = %e, "Flush failed");
        }
    }
}
