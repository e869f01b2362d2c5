//! Slipway Git - raw commit log reading
//!
//! This crate materializes a repository's commit history into ordered
//! [`RawRecord`]s for the changelog parsing engine. Reading the log is the
//! only I/O step of a changelog run; everything downstream is a pure
//! transformation.

mod log;
mod repository;
pub mod types;

pub use log::read_log;
pub use repository::{GitRepo, Result};
pub use types::RawRecord;
