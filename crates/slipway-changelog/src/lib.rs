//! Slipway Changelog - commit parsing and reference resolution
//!
//! Turns a repository's raw commit log into a structured, semantically
//! typed sequence of commits suitable for changelog generation: conventional
//! headers, note blocks, issue/PR references, merge detection, and
//! resolution of references into hyperlink-ready form.
//!
//! The engine is a pure transformation: [`parse_commits`] never fails, and
//! [`resolve_references`] is a function of the parsed commits plus a
//! [`slipway_core::RepositoryDescriptor`]. Rendering the result to
//! markdown/HTML is downstream of this crate.

pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::{extract_references, parse_commit, parse_commits};
pub use resolver::resolve_references;
pub use types::{Commit, Note, Reference};
