//! Sink implementations
//!
//! Contains ConsoleSink, FileSink, and RemoteSink, plus the closed [`Sink`]
//! enum the dispatcher stores.

mod append;
mod console;
mod file;
mod remote;

pub use self::console::ConsoleSink;
pub use self::file::FileSink;
pub use self::remote::{RemoteSink, RemoteTarget};

use contracts::{ContractError, DeviceInfo, LineSink, SinkConfig, SinkIdentity};

/// Any sink the dispatcher can hold
pub enum Sink {
    Console(ConsoleSink),
    File(FileSink),
    Remote(RemoteSink),
}

impl Sink {
    /// Console sink writing to stdout
    pub fn console() -> Self {
        Self::Console(ConsoleSink::new())
    }

    /// File sink at `path`, writing the device header on creation
    pub fn file(path: impl Into<String>, device_info: Option<DeviceInfo>) -> Self {
        Self::File(FileSink::new(path, device_info))
    }

    /// Remote sink for `destination`
    pub fn remote(destination: impl Into<String>) -> Self {
        Self::Remote(RemoteSink::new(destination))
    }

    /// Build the sink a configuration entry describes
    pub fn from_config(config: &SinkConfig, device_info: Option<&DeviceInfo>) -> Self {
        match config {
            SinkConfig::Console => Self::console(),
            SinkConfig::File { path, with_header } => {
                let header = if *with_header {
                    device_info.cloned()
                } else {
                    None
                };
                Self::file(path.clone(), header)
            }
            SinkConfig::Remote { destination } => Self::remote(destination.clone()),
        }
    }
}

impl From<ConsoleSink> for Sink {
    fn from(sink: ConsoleSink) -> Self {
        Self::Console(sink)
    }
}

impl From<FileSink> for Sink {
    fn from(sink: FileSink) -> Self {
        Self::File(sink)
    }
}

impl From<RemoteSink> for Sink {
    fn from(sink: RemoteSink) -> Self {
        Self::Remote(sink)
    }
}

impl LineSink for Sink {
    fn identity(&self) -> SinkIdentity {
        match self {
            Self::Console(sink) => sink.identity(),
            Self::File(sink) => sink.identity(),
            Self::Remote(sink) => sink.identity(),
        }
    }

    async fn process(&mut self, line: &str) -> Result<(), ContractError> {
        match self {
            Self::Console(sink) => sink.process(line).await,
            Self::File(sink) => sink.process(line).await,
            Self::Remote(sink) => sink.process(line).await,
        }
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        match self {
            Self::Console(sink) => sink.flush().await,
            Self::File(sink) => sink.flush().await,
            Self::Remote(sink) => sink.flush().await,
        }
    }
}
