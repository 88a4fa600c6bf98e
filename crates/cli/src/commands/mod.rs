//! Command implementations.

mod info;
mod log;
mod validate;

pub use info::run_info;
pub use log::run_log;
pub use validate::run_validate;
