//! ConsoleSink - writes lines to standard output

use contracts::{ContractError, LineSink, SinkIdentity};
use tokio::io::{self, AsyncWriteExt, Stdout};

/// Sink that prints every line to stdout
pub struct ConsoleSink {
    stdout: Stdout,
}

impl ConsoleSink {
    /// Create a new ConsoleSink
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for ConsoleSink {
    fn identity(&self) -> SinkIdentity {
        SinkIdentity::Console
    }

    async fn process(&mut self, line: &str) -> Result<(), ContractError> {
        let printed = format!("{line}\n");
        self.stdout
            .write_all(printed.as_bytes())
            .await
            .map_err(|e| ContractError::sink_write("console", e.to_string()))?;
        self.flush().await
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        self.stdout
            .flush()
            .await
            .map_err(|e| ContractError::sink_write("console", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sink_write() {
        let mut sink = ConsoleSink::new();
        assert!(sink.process("console line").await.is_ok());
    }

    #[test]
    fn test_console_sink_identity() {
        assert_eq!(ConsoleSink::default().identity(), SinkIdentity::Console);
    }
}
