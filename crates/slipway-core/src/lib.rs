//! Slipway Core - foundational types for changelog tooling
//!
//! This crate provides the error taxonomy and the repository descriptor
//! consumed by the commit parsing and reference resolution engine.

pub mod descriptor;
pub mod error;

pub use descriptor::{RepositoryDescriptor, DEFAULT_HOST};
pub use error::{GitError, ResolveError, Result, SlipwayError};
