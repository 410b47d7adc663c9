//! The write endpoint of a pipe.

use std::sync::Arc;

use crate::error::PipeError;
use crate::pipe::Shared;
use crate::signal::Signal;

/// The write endpoint of a pipe.
///
/// Writers push values into the pipe's buffer, blocking when the buffer's
/// policy calls for backpressure. Once closed — explicitly, or because the
/// reader closed — every further write fails with [`PipeError::Closed`].
///
/// Cloning shares the endpoint, so any number of producer threads can
/// write through it.
pub struct PipeWriter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for PipeWriter<T> {
    fn clone(&self) -> Self {
        PipeWriter {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> PipeWriter<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        PipeWriter { shared }
    }

    /// Writes a value into the pipe, blocking while the buffer's policy
    /// requires it.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::Closed`] when the writer is closed or the pipe
    /// is torn down while the write is waiting, and [`PipeError::Rejected`]
    /// when a dropping buffer discards the value.
    pub fn write(&self, item: T) -> Result<(), PipeError> {
        if self.is_closed() {
            return Err(PipeError::Closed);
        }
        if self.shared.buffer().try_put(item) {
            return Ok(());
        }
        if self.is_closed() || self.shared.buffer().is_disposed() {
            Err(PipeError::Closed)
        } else {
            Err(PipeError::Rejected)
        }
    }

    /// Closes the writer.
    ///
    /// The reader keeps yielding buffered values until the backlog drains;
    /// only then does it close too. Closing twice is a no-op.
    pub fn close(&self) {
        self.shared.close_writer();
    }

    /// Returns true if the writer is closed.
    pub fn is_closed(&self) -> bool {
        self.shared.writer_is_closed()
    }

    /// The one-shot signal fired when this writer closes.
    pub fn closed_signal(&self) -> Signal {
        self.shared.writer_closed_signal()
    }
}

#[cfg(test)]
mod tests {
    use crate::PipeError;
    use crate::pipe::open_bounded;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_write_after_close_fails() {
        let (writer, _reader) = open_bounded::<i32>(2).unwrap().split();
        writer.close();
        assert_eq!(writer.write(1), Err(PipeError::Closed));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (writer, _reader) = open_bounded::<i32>(2).unwrap().split();
        writer.close();
        writer.close();
        assert!(writer.is_closed());
    }

    #[test]
    fn test_close_fires_signal_once() {
        let (writer, _reader) = open_bounded::<i32>(2).unwrap().split();
        let signal = writer.closed_signal();
        assert!(!signal.is_set());

        writer.close();
        assert!(signal.is_set());
    }

    #[test]
    fn test_reader_close_closes_writer() {
        let (writer, reader) = open_bounded::<i32>(2).unwrap().split();
        reader.close();
        assert!(writer.is_closed());
        assert_eq!(writer.write(1), Err(PipeError::Closed));
    }

    #[test]
    fn test_reader_close_releases_blocked_writer() {
        let (writer, reader) = open_bounded::<i32>(1).unwrap().split();
        writer.write(1).unwrap();

        let blocked = thread::spawn(move || writer.write(2));

        thread::sleep(Duration::from_millis(50));
        reader.close();

        assert_eq!(blocked.join().unwrap(), Err(PipeError::Closed));
    }
}
