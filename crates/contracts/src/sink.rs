//! LineSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for sinks.

use crate::{ContractError, SinkIdentity};

/// Line output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(LineSink: Send)]
pub trait LocalLineSink {
    /// Identity used for registration dedup and targeted dispatch
    fn identity(&self) -> SinkIdentity;

    /// Append `line` followed by a newline to the destination
    ///
    /// # Errors
    /// Returns open/write error (should include context). Callers above the
    /// sink handle never see it.
    async fn process(&mut self, line: &str) -> Result<(), ContractError>;

    /// Flush buffered bytes (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;
}
