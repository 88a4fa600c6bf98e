//! # Contracts
//!
//! Frozen interface contracts shared by every plogs crate: the device banner,
//! sink identities, the `LineSink` trait, configuration model, and errors.
//! All business crates depend on this crate, reverse dependencies are prohibited.
//!
//! ## Line Model
//! - A log record is a single UTF-8 string; sinks append it followed by `\n`
//! - No levels, no structured fields

mod blueprint;
mod device;
mod error;
mod identity;
mod sink;

pub use blueprint::*;
pub use device::DeviceInfo;
pub use error::*;
pub use identity::{SinkIdentity, SinkKind};
pub use sink::*;
