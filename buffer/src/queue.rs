//! Blocking queue facade over a buffer.

use crate::buffer::Buffer;
use crate::error::BufferError;

/// A blocking FIFO queue backed by a [`Buffer`].
///
/// `BlockingQueue<T>` is a thin facade for code that wants plain
/// enqueue/dequeue naming and no policy decisions: by default it wraps a
/// bounded buffer at [`DEFAULT_CAPACITY`], but any buffer can be supplied
/// to change the overflow behavior.
///
/// [`DEFAULT_CAPACITY`]: crate::DEFAULT_CAPACITY
///
/// # Example
///
/// ```
/// use handoff_buffer::BlockingQueue;
///
/// let queue = BlockingQueue::new();
/// queue.enqueue(42).unwrap();
/// assert_eq!(queue.dequeue(), Some(42));
/// ```
pub struct BlockingQueue<T> {
    buffer: Buffer<T>,
}

impl<T> Clone for BlockingQueue<T> {
    fn clone(&self) -> Self {
        BlockingQueue {
            buffer: self.buffer.clone(),
        }
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingQueue<T> {
    /// Creates a queue over a bounded buffer with the default capacity.
    pub fn new() -> Self {
        BlockingQueue {
            buffer: Buffer::default(),
        }
    }

    /// Creates a queue over a bounded buffer with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        Ok(BlockingQueue {
            buffer: Buffer::bounded(capacity)?,
        })
    }

    /// Creates a queue over the supplied buffer.
    pub fn with_buffer(buffer: Buffer<T>) -> Self {
        BlockingQueue { buffer }
    }

    /// Enqueues a value, blocking while the buffer's policy requires it.
    ///
    /// # Errors
    ///
    /// Propagates the underlying [`Buffer::put`] error unchanged.
    pub fn enqueue(&self, item: T) -> Result<(), BufferError> {
        self.buffer.put(item)
    }

    /// Dequeues the oldest value, blocking while the queue is empty.
    ///
    /// Returns `None` once the underlying buffer is disposed.
    pub fn dequeue(&self) -> Option<T> {
        self.buffer.try_take()
    }

    /// Returns the number of values currently queued.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no values are queued.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the buffer backing this queue.
    pub fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_enqueue_dequeue() {
        let queue = BlockingQueue::new();
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();

        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(2));
    }

    #[test]
    fn test_default_is_bounded() {
        let queue = BlockingQueue::<i32>::new();
        assert_eq!(queue.buffer().capacity(), crate::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_custom_buffer_policy() {
        let queue = BlockingQueue::with_buffer(Buffer::sliding(2).unwrap());
        for i in 0..5 {
            queue.enqueue(i).unwrap();
        }
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), Some(4));
    }

    #[test]
    fn test_threaded_handoff() {
        let queue = BlockingQueue::with_capacity(2).unwrap();
        let producer_queue = queue.clone();

        let producer = thread::spawn(move || {
            for i in 0..10 {
                producer_queue.enqueue(i).unwrap();
            }
        });

        let mut sum = 0;
        for _ in 0..10 {
            sum += queue.dequeue().unwrap();
        }

        producer.join().unwrap();
        assert_eq!(sum, 45);
    }

    #[test]
    fn test_dequeue_after_dispose_returns_none() {
        let queue = BlockingQueue::<i32>::new();
        queue.buffer().dispose();
        assert_eq!(queue.dequeue(), None);
    }
}
