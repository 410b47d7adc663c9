//! Error types for pipe operations.

use thiserror::Error;

/// Pipe operation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipeError {
    /// The write side is closed, or the pipe was torn down mid-write.
    #[error("pipe: closed")]
    Closed,

    /// The pipe's buffer discarded the value (dropping policy).
    #[error("pipe: value rejected by the buffer")]
    Rejected,
}
