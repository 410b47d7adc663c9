//! Error types for buffer operations.

use thiserror::Error;

/// Buffer operation error.
///
/// The erroring forms of the buffer API (`put`, `take` and the timeout
/// variants) distinguish misuse of an already-disposed buffer from an
/// operation that genuinely did not complete. The `try_*` family never
/// returns these; it reports failure through its return value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A buffer was constructed with a capacity of zero.
    #[error("buffer: capacity must be greater than 0")]
    InvalidCapacity,

    /// The buffer was already disposed when the operation was called.
    #[error("buffer: disposed")]
    Disposed,

    /// The operation did not complete: the wait timed out, the buffer was
    /// disposed mid-wait, or a non-blocking policy rejected the value.
    #[error("buffer: operation failed")]
    OperationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", BufferError::InvalidCapacity),
            "buffer: capacity must be greater than 0"
        );
        assert_eq!(format!("{}", BufferError::Disposed), "buffer: disposed");
        assert_eq!(
            format!("{}", BufferError::OperationFailed),
            "buffer: operation failed"
        );
    }
}
