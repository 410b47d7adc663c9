//! Pipe construction and the shared half-close state.

use std::sync::Arc;

use handoff_buffer::{Buffer, BufferError};
use parking_lot::Mutex;
use tracing::debug;

use crate::reader::PipeReader;
use crate::signal::Signal;
use crate::writer::PipeWriter;

/// Opens a pipe that never blocks on writes.
pub fn open<T>() -> Pipe<T> {
    open_with(Buffer::unbounded())
}

/// Opens a pipe that blocks writers once `capacity` values are in flight.
///
/// # Errors
///
/// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero.
pub fn open_bounded<T>(capacity: usize) -> Result<Pipe<T>, BufferError> {
    Ok(open_with(Buffer::bounded(capacity)?))
}

/// Opens a pipe over the supplied buffer.
///
/// The pipe takes on whatever overflow behavior the buffer was built
/// with; a dropping or sliding buffer yields a pipe whose writes never
/// block.
pub fn open_with<T>(buffer: Buffer<T>) -> Pipe<T> {
    let shared = Arc::new(Shared {
        buffer,
        close: Mutex::new(CloseState {
            reader_closed: false,
            writer_closed: false,
        }),
        reader_closed: Signal::new(),
        writer_closed: Signal::new(),
    });

    Pipe {
        reader: PipeReader::new(Arc::clone(&shared)),
        writer: PipeWriter::new(shared),
    }
}

/// A unidirectional communication pipe.
///
/// A pipe pairs a [`PipeReader`] and a [`PipeWriter`] over one shared
/// buffer and coordinates their shutdown: the writer closing does not cut
/// off the reader until the backlog has drained, and the buffer is
/// disposed exactly once, when both endpoints have closed.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// let (writer, reader) = handoff_pipe::open_bounded::<i32>(2).unwrap().split();
///
/// let producer = thread::spawn(move || {
///     for i in 0..10 {
///         writer.write(i).unwrap();
///     }
///     writer.close();
/// });
///
/// let sum: i32 = reader.into_iter().sum();
/// producer.join().unwrap();
/// assert_eq!(sum, 45);
/// ```
pub struct Pipe<T> {
    reader: PipeReader<T>,
    writer: PipeWriter<T>,
}

impl<T> std::fmt::Debug for Pipe<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe").finish_non_exhaustive()
    }
}

impl<T> Pipe<T> {
    /// The read endpoint.
    pub fn reader(&self) -> &PipeReader<T> {
        &self.reader
    }

    /// The write endpoint.
    pub fn writer(&self) -> &PipeWriter<T> {
        &self.writer
    }

    /// Consumes the pipe, returning its endpoints.
    pub fn split(self) -> (PipeWriter<T>, PipeReader<T>) {
        (self.writer, self.reader)
    }
}

/// State shared by both endpoints of one pipe.
pub(crate) struct Shared<T> {
    buffer: Buffer<T>,
    close: Mutex<CloseState>,
    reader_closed: Signal,
    writer_closed: Signal,
}

struct CloseState {
    reader_closed: bool,
    writer_closed: bool,
}

impl<T> Shared<T> {
    pub(crate) fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    pub(crate) fn reader_is_closed(&self) -> bool {
        self.close.lock().reader_closed
    }

    pub(crate) fn writer_is_closed(&self) -> bool {
        self.close.lock().writer_closed
    }

    pub(crate) fn reader_closed_signal(&self) -> Signal {
        self.reader_closed.clone()
    }

    pub(crate) fn writer_closed_signal(&self) -> Signal {
        self.writer_closed.clone()
    }

    /// Closes the write endpoint.
    ///
    /// If the buffer is already drained the reader has nothing left to
    /// consume, so it closes too; once both endpoints are closed the
    /// buffer is disposed, releasing any blocked producer or consumer.
    pub(crate) fn close_writer(&self) {
        let mut close = self.close.lock();
        if close.writer_closed {
            return;
        }
        close.writer_closed = true;
        self.writer_closed.set();
        debug!("pipe writer closed");

        if !close.reader_closed && self.buffer.is_empty() {
            close.reader_closed = true;
            self.reader_closed.set();
            debug!("pipe reader closed after drain");
        }
        if close.reader_closed {
            self.buffer.dispose();
        }
    }

    /// Closes the read endpoint.
    ///
    /// Closing the reader also closes the writer: with nobody left to
    /// consume, the buffer is disposed so a producer blocked on a full
    /// buffer fails instead of waiting forever.
    pub(crate) fn close_reader(&self) {
        let mut close = self.close.lock();
        if close.reader_closed {
            return;
        }
        close.reader_closed = true;
        self.reader_closed.set();
        debug!("pipe reader closed");

        if !close.writer_closed {
            close.writer_closed = true;
            self.writer_closed.set();
            debug!("pipe writer closed");
        }
        self.buffer.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_buffer::BufferError;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_open_bounded_zero_capacity_rejected() {
        assert_eq!(
            open_bounded::<i32>(0).unwrap_err(),
            BufferError::InvalidCapacity
        );
    }

    #[test]
    fn test_endpoints_share_one_buffer() {
        let pipe = open_bounded::<i32>(4).unwrap();
        pipe.writer().write(42).unwrap();
        assert_eq!(pipe.reader().read(), Some(42));
    }

    #[test]
    fn test_slow_consumer_sees_every_value() {
        let (writer, reader) = open_bounded::<i32>(2).unwrap().split();

        let producer = thread::spawn(move || {
            for i in 0..10 {
                writer.write(i).unwrap();
            }
        });

        let mut sum = 0;
        for _ in 0..10 {
            sum += reader.read().unwrap();
            thread::sleep(Duration::from_millis(5));
        }

        producer.join().unwrap();
        assert_eq!(sum, 45);
    }

    #[test]
    fn test_many_producers() {
        let (writer, reader) = open_bounded::<i32>(2).unwrap().split();

        let mut producers = Vec::new();
        for _ in 0..3 {
            let writer = writer.clone();
            producers.push(thread::spawn(move || {
                for i in 0..10 {
                    writer.write(i).unwrap();
                }
            }));
        }

        let mut sum = 0;
        for _ in 0..30 {
            sum += reader.read().unwrap();
        }

        for producer in producers {
            producer.join().unwrap();
        }
        assert_eq!(sum, 45 * 3);
    }

    #[test]
    fn test_dropping_pipe_never_blocks_writer() {
        let (writer, reader) =
            open_with(handoff_buffer::Buffer::<i32>::dropping(2).unwrap()).split();

        writer.write(1).unwrap();
        writer.write(2).unwrap();
        assert_eq!(writer.write(3), Err(crate::PipeError::Rejected));

        assert_eq!(reader.read(), Some(1));
        assert_eq!(reader.read(), Some(2));
    }
}
