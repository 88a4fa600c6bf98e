//! AppendFile - lazily created, append-only file handle

use contracts::ContractError;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Append-only file destination shared by file and file-backed remote sinks
///
/// Nothing touches the filesystem until [`AppendFile::acquire`] runs.
/// The handle stays open across writes and is closed when this value drops.
pub(crate) struct AppendFile {
    path: String,
    file: Option<File>,
}

impl AppendFile {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Make sure the destination exists and a write handle is open
    ///
    /// Returns `true` when the destination did not exist and was created by
    /// this call. A handle left over from a file that has since been removed
    /// is replaced by the handle of the new file.
    pub(crate) async fn acquire(&mut self, sink: &str) -> Result<bool, ContractError> {
        let exists = fs::try_exists(&self.path).await.unwrap_or(false);

        if !exists {
            let file = OpenOptions::new()
                .append(true)
                .create_new(true)
                .open(&self.path)
                .await;

            match file {
                Ok(file) => {
                    debug!(sink, path = %self.path, "Destination created");
                    self.file = Some(file);
                    return Ok(true);
                }
                // Another writer created it between the check and the open
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => {
                    self.file = None;
                    return Err(ContractError::sink_open(sink, e.to_string()));
                }
            }
        }

        if self.file.is_none() {
            let file = open_append(Path::new(&self.path))
                .await
                .map_err(|e| ContractError::sink_open(sink, e.to_string()))?;
            debug!(sink, path = %self.path, "Destination opened");
            self.file = Some(file);
        }

        Ok(false)
    }

    /// Append bytes to the open handle and wait until they reach the file
    pub(crate) async fn append(&mut self, sink: &str, data: &[u8]) -> Result<(), ContractError> {
        let Some(file) = self.file.as_mut() else {
            return Err(ContractError::sink_write(sink, "destination not open"));
        };

        let result = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;

        result.map_err(|e| ContractError::sink_write(sink, e.to_string()))
    }

    pub(crate) async fn flush(&mut self, sink: &str) -> Result<(), ContractError> {
        match self.file.as_mut() {
            Some(file) => file
                .flush()
                .await
                .map_err(|e| ContractError::sink_write(sink, e.to_string())),
            None => Ok(()),
        }
    }
}

async fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().append(true).open(path).await
}
