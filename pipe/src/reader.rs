//! The read endpoint of a pipe.

use std::sync::Arc;

use crate::pipe::Shared;
use crate::signal::Signal;

/// The read endpoint of a pipe.
///
/// Readers pull values out of the pipe's buffer in FIFO order, blocking
/// while it is empty. A reader does not close just because the writer
/// did: it keeps yielding until the buffered backlog is drained, and only
/// then reports closed. Closing the reader early tears the whole pipe
/// down, releasing any producer still blocked on a full buffer.
///
/// Cloning shares the endpoint. For sequence-style consumption, a reader
/// converts into a lazy iterator via [`IntoIterator`].
pub struct PipeReader<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for PipeReader<T> {
    fn clone(&self) -> Self {
        PipeReader {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> PipeReader<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        PipeReader { shared }
    }

    /// Reads the next value from the pipe, blocking while it is empty and
    /// the writer is still open.
    ///
    /// Returns `None` once the reader is closed — explicitly, or because
    /// the writer closed and the backlog has drained.
    pub fn read(&self) -> Option<T> {
        // Drain rule: the writer is gone and nothing is left to yield.
        if self.shared.writer_is_closed() && self.shared.buffer().is_empty() {
            self.shared.close_reader();
        }
        if self.is_closed() {
            return None;
        }
        self.shared.buffer().try_take()
    }

    /// Closes the reader. Closing twice is a no-op.
    pub fn close(&self) {
        self.shared.close_reader();
    }

    /// Returns true if the reader is closed.
    pub fn is_closed(&self) -> bool {
        self.shared.reader_is_closed()
    }

    /// The one-shot signal fired when this reader closes.
    pub fn closed_signal(&self) -> Signal {
        self.shared.reader_closed_signal()
    }
}
