//! # Dispatcher
//!
//! 日志分发模块。
//!
//! 负责：
//! - 维护 sink 注册表 (按身份去重)
//! - Fan-out 每一行日志到所有 sinks
//! - 每个 sink 串行写入，sink 之间互不阻塞顺序

pub mod dispatcher;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{DeviceInfo, LineSink, SinkIdentity, SinkKind};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherBuilder};
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{ConsoleSink, FileSink, RemoteSink, RemoteTarget, Sink};
