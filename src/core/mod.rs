//! Core module
//!
//! Digest computation, verification, and the recent-hash history.

pub mod digest;
pub mod history;
pub mod verify;

use thiserror::Error;

/// Errors surfaced by digest and verification operations.
///
/// History storage corruption is deliberately absent here: the history
/// store absorbs it and degrades to an empty log (see [`history`]).
#[derive(Debug, Error)]
pub enum HashError {
    /// The file's bytes could not be fully read.
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// A required input was missing when the operation was invoked.
    #[error("missing required input: {0}")]
    MissingInput(&'static str),
}
