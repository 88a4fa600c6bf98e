//! FileSink - appends lines to a local log file

use contracts::{ContractError, DeviceInfo, LineSink, SinkIdentity};
use tracing::{debug, instrument};

use super::append::AppendFile;

/// Sink that appends lines to a file
///
/// The file is created on the first `process` call, not at construction.
/// When this sink creates the file and a [`DeviceInfo`] was supplied, the
/// device header block is written before the first line.
pub struct FileSink {
    target: AppendFile,
    device_info: Option<DeviceInfo>,
    name: String,
}

impl FileSink {
    /// Create a new FileSink
    pub fn new(path: impl Into<String>, device_info: Option<DeviceInfo>) -> Self {
        let target = AppendFile::new(path);
        let name = SinkIdentity::File(target.path().to_string()).to_string();
        Self {
            target,
            device_info,
            name,
        }
    }

    /// Destination path, compared verbatim for dedup
    pub fn path(&self) -> &str {
        self.target.path()
    }

    /// Device info written on creation, if any
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.device_info.as_ref()
    }

    /// Whether the destination handle is currently open
    pub fn is_open(&self) -> bool {
        self.target.is_open()
    }

    async fn write_header(&mut self) -> Result<(), ContractError> {
        if let Some(info) = &self.device_info {
            let header = info.header_block();
            self.target.append(&self.name, header.as_bytes()).await?;
            debug!(sink = %self.name, "Device header written");
        }
        Ok(())
    }
}

impl LineSink for FileSink {
    fn identity(&self) -> SinkIdentity {
        SinkIdentity::File(self.target.path().to_string())
    }

    #[instrument(name = "file_sink_process", skip(self, line), fields(sink = %self.name))]
    async fn process(&mut self, line: &str) -> Result<(), ContractError> {
        let created = self.target.acquire(&self.name).await?;
        if created {
            self.write_header().await?;
        }

        let printed = format!("{line}\n");
        self.target.append(&self.name, printed.as_bytes()).await
    }

    #[instrument(name = "file_sink_flush", skip(self), fields(sink = %self.name))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        self.target.flush(&self.name).await
    }
}
