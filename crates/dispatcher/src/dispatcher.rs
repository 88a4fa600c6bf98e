//! Dispatcher - sink registry and fan-out

use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, instrument};

use contracts::{LoggerBlueprint, SinkIdentity, SinkKind};

use crate::handle::SinkHandle;
use crate::metrics::MetricsSnapshot;
use crate::sinks::Sink;

static SHARED: OnceLock<Dispatcher> = OnceLock::new();

/// Builder for creating a Dispatcher from configuration
pub struct DispatcherBuilder {
    blueprint: LoggerBlueprint,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(blueprint: LoggerBlueprint) -> Self {
        Self { blueprint }
    }

    /// Build the dispatcher, registering every configured sink in order
    #[instrument(
        name = "dispatcher_builder_build",
        skip(self),
        fields(sink_count = self.blueprint.sinks.len())
    )]
    pub fn build(self) -> Dispatcher {
        let dispatcher = Dispatcher::new();
        let device = self.blueprint.device.as_ref();

        for config in &self.blueprint.sinks {
            dispatcher.add_output(Sink::from_config(config, device));
        }

        dispatcher
    }
}

/// Registry that fans every line out to its sinks
///
/// The console sink is registered at construction and is always first.
/// Sinks are appended in registration order and never removed.
pub struct Dispatcher {
    handles: RwLock<Vec<Arc<SinkHandle>>>,
}

impl Dispatcher {
    /// Create a dispatcher holding only the console sink
    pub fn new() -> Self {
        Self {
            handles: RwLock::new(vec![Arc::new(SinkHandle::new(Sink::console()))]),
        }
    }

    /// Process-wide dispatcher, created on first access
    ///
    /// Prefer constructing a [`Dispatcher`] and passing it around; this exists
    /// for host glue that cannot carry a handle.
    pub fn shared() -> &'static Dispatcher {
        SHARED.get_or_init(Dispatcher::new)
    }

    /// Register a sink unless an equivalent one is already registered
    ///
    /// Returns `true` if the sink was appended. The check and the append run
    /// under one lock, so concurrent registrations of equivalent sinks leave
    /// exactly one of them.
    #[instrument(name = "dispatcher_add_output", skip(self, sink))]
    pub fn add_output(&self, sink: impl Into<Sink>) -> bool {
        let handle = SinkHandle::new(sink);
        let mut handles = self.handles.write().unwrap_or_else(PoisonError::into_inner);

        if handles
            .iter()
            .any(|existing| existing.identity().is_duplicate_of(handle.identity()))
        {
            debug!(sink = %handle.name(), "Duplicate sink ignored");
            return false;
        }

        info!(sink = %handle.name(), position = handles.len(), "Sink registered");
        handles.push(Arc::new(handle));
        true
    }

    /// Alias of [`Dispatcher::add_output`]
    pub fn register_sink(&self, sink: impl Into<Sink>) -> bool {
        self.add_output(sink)
    }

    /// Send `line` to every registered sink, in registration order
    pub async fn log(&self, line: &str) {
        for handle in self.snapshot() {
            handle.process(line).await;
        }
    }

    /// Send `line` to the console and to file sinks whose path equals `path`
    ///
    /// Other file sinks and remote sinks are skipped.
    pub async fn log_to_file_and_console_only(&self, path: &str, line: &str) {
        for handle in self.snapshot() {
            let targeted = match handle.identity() {
                SinkIdentity::Console => true,
                SinkIdentity::File(file_path) => file_path == path,
                SinkIdentity::Remote(_) => false,
            };
            if targeted {
                handle.process(line).await;
            }
        }
    }

    /// Flush every sink
    pub async fn flush(&self) {
        for handle in self.snapshot() {
            handle.flush().await;
        }
    }

    /// Identities of registered sinks, in registration order
    pub fn identities(&self) -> Vec<SinkIdentity> {
        self.read(|handles| handles.iter().map(|h| h.identity().clone()).collect())
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.read(|handles| handles.len())
    }

    /// Number of registered sinks of one kind
    pub fn count_of(&self, kind: SinkKind) -> usize {
        self.read(|handles| {
            handles
                .iter()
                .filter(|h| h.identity().kind() == kind)
                .count()
        })
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.read(|handles| {
            handles
                .iter()
                .map(|h| (h.name().to_string(), h.metrics().snapshot()))
                .collect()
        })
    }

    // The registry lock is never held across an await: writes wait on the
    // per-sink lock only, so registration is never blocked by a slow sink.
    fn snapshot(&self) -> Vec<Arc<SinkHandle>> {
        self.read(|handles| handles.to_vec())
    }

    fn read<T>(&self, f: impl FnOnce(&[Arc<SinkHandle>]) -> T) -> T {
        let handles = self.handles.read().unwrap_or_else(PoisonError::into_inner);
        f(&handles)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to create a dispatcher from a blueprint
pub fn create_dispatcher(blueprint: LoggerBlueprint) -> Dispatcher {
    DispatcherBuilder::new(blueprint).build()
}
