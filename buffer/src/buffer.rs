//! The blocking buffer engine.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::error::BufferError;
use crate::policy::OverflowPolicy;

/// Capacity used by [`Buffer::default`] and [`BlockingQueue::new`].
///
/// [`BlockingQueue::new`]: crate::BlockingQueue::new
pub const DEFAULT_CAPACITY: usize = 100;

/// A thread-safe FIFO buffer with a configurable overflow policy.
///
/// `Buffer<T>` hands values from producer threads to consumer threads in
/// strict FIFO order. What happens when the buffer is full depends on how
/// it was constructed:
///
/// - [`Buffer::bounded`]: producers block until a consumer makes room
/// - [`Buffer::dropping`]: new values are discarded, producers never block
/// - [`Buffer::sliding`]: the oldest value is evicted, producers never block
/// - [`Buffer::unbounded`]: the buffer grows without bound
///
/// Consumers block while the buffer is empty, for every policy.
///
/// # Semantics
///
/// - **put/take**: block indefinitely, fail with a [`BufferError`]
/// - **put_timeout/take_timeout**: block up to a deadline
/// - **try_put/try_take**: identical waiting behavior, but report failure
///   through the return value instead of an error
/// - **dispose**: irreversibly shuts the buffer down and releases every
///   blocked producer and consumer with a failure
///
/// All waits are bounded by disposal: a thread blocked in `put` or `take`
/// returns promptly once another thread calls [`Buffer::dispose`].
///
/// # Thread Safety
///
/// `Buffer<T>` is `Send + Sync` and `Clone`; cloning shares the underlying
/// buffer via `Arc`.
///
/// # Example
///
/// ```
/// use handoff_buffer::Buffer;
/// use std::thread;
///
/// let buf = Buffer::<i32>::bounded(4).unwrap();
/// let producer_buf = buf.clone();
///
/// let producer = thread::spawn(move || {
///     for i in 0..10 {
///         producer_buf.put(i).unwrap();
///     }
/// });
///
/// let mut items = Vec::new();
/// for _ in 0..10 {
///     items.push(buf.take().unwrap());
/// }
///
/// producer.join().unwrap();
/// assert_eq!(items, (0..10).collect::<Vec<_>>());
/// ```
pub struct Buffer<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    state: Mutex<State<T>>,
    readable: Condvar,
    writable: Condvar,
    policy: OverflowPolicy,
}

struct State<T> {
    queue: VecDeque<T>,
    disposed: bool,
}

impl<T> std::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").finish_non_exhaustive()
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Buffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Buffer<T> {
    /// Equivalent to `Buffer::bounded(DEFAULT_CAPACITY)`.
    fn default() -> Self {
        Self::with_policy(OverflowPolicy::Bounded {
            max: DEFAULT_CAPACITY,
        })
    }
}

impl<T> Buffer<T> {
    fn with_policy(policy: OverflowPolicy) -> Self {
        Buffer {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    disposed: false,
                }),
                readable: Condvar::new(),
                writable: Condvar::new(),
                policy,
            }),
        }
    }

    /// Creates a buffer that blocks producers once it holds `capacity`
    /// values.
    ///
    /// Bounded buffers give backpressure: a producer can never flood the
    /// buffer, and a consumer sees every value.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity);
        }
        Ok(Self::with_policy(OverflowPolicy::Bounded { max: capacity }))
    }

    /// Creates a buffer that discards new values once it holds `capacity`
    /// values. Producers never block.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero.
    pub fn dropping(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity);
        }
        Ok(Self::with_policy(OverflowPolicy::Dropping { max: capacity }))
    }

    /// Creates a buffer that evicts its oldest value to admit a new one
    /// once it holds `capacity` values. Producers never block, and the
    /// buffer always holds the most recent `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCapacity`] when `capacity` is zero.
    pub fn sliding(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity);
        }
        Ok(Self::with_policy(OverflowPolicy::Sliding { max: capacity }))
    }

    /// Creates a buffer that never refuses a value.
    pub fn unbounded() -> Self {
        Self::with_policy(OverflowPolicy::Bounded { max: usize::MAX })
    }

    /// Puts a value into the buffer, blocking until the policy admits it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Disposed`] when the buffer was already
    /// disposed at call time, and [`BufferError::OperationFailed`] when the
    /// buffer is disposed mid-wait or a dropping policy rejects the value.
    pub fn put(&self, item: T) -> Result<(), BufferError> {
        if self.is_disposed() {
            return Err(BufferError::Disposed);
        }
        if self.put_deadline(item, None) {
            Ok(())
        } else {
            Err(BufferError::OperationFailed)
        }
    }

    /// Puts a value into the buffer, blocking at most `timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::put`], with an elapsed timeout also reported as
    /// [`BufferError::OperationFailed`]. Timeout and disposal mid-wait are
    /// not distinguishable from the error alone.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), BufferError> {
        if self.is_disposed() {
            return Err(BufferError::Disposed);
        }
        if self.put_deadline(item, Some(Instant::now() + timeout)) {
            Ok(())
        } else {
            Err(BufferError::OperationFailed)
        }
    }

    /// Like [`Buffer::put`], but reports failure as `false` instead of an
    /// error.
    pub fn try_put(&self, item: T) -> bool {
        self.put_deadline(item, None)
    }

    /// Like [`Buffer::put_timeout`], but reports failure as `false`
    /// instead of an error.
    pub fn try_put_timeout(&self, item: T, timeout: Duration) -> bool {
        self.put_deadline(item, Some(Instant::now() + timeout))
    }

    /// Takes the oldest value from the buffer, blocking while it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Disposed`] when the buffer was already
    /// disposed at call time, and [`BufferError::OperationFailed`] when the
    /// buffer is disposed mid-wait.
    pub fn take(&self) -> Result<T, BufferError> {
        if self.is_disposed() {
            return Err(BufferError::Disposed);
        }
        self.take_deadline(None).ok_or(BufferError::OperationFailed)
    }

    /// Takes the oldest value from the buffer, blocking at most `timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::take`], with an elapsed timeout also reported as
    /// [`BufferError::OperationFailed`].
    pub fn take_timeout(&self, timeout: Duration) -> Result<T, BufferError> {
        if self.is_disposed() {
            return Err(BufferError::Disposed);
        }
        self.take_deadline(Some(Instant::now() + timeout))
            .ok_or(BufferError::OperationFailed)
    }

    /// Like [`Buffer::take`], but reports failure as `None` instead of an
    /// error.
    pub fn try_take(&self) -> Option<T> {
        self.take_deadline(None)
    }

    /// Like [`Buffer::take_timeout`], but reports failure as `None`
    /// instead of an error.
    pub fn try_take_timeout(&self, timeout: Duration) -> Option<T> {
        self.take_deadline(Some(Instant::now() + timeout))
    }

    fn put_deadline(&self, item: T, deadline: Option<Instant>) -> bool {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        loop {
            if state.disposed {
                return false;
            }
            if inner.policy.can_admit(&state.queue) {
                let admitted = inner.policy.admit(&mut state.queue, item);
                if admitted {
                    inner.readable.notify_one();
                }
                return admitted;
            }
            // Full under a blocking policy: wait for a taker, racing
            // against disposal. The wake is a hint, another producer may
            // have claimed the slot, so admission is re-checked on loop.
            match deadline {
                Some(d) => {
                    if inner.writable.wait_until(&mut state, d).timed_out() {
                        return false;
                    }
                }
                None => inner.writable.wait(&mut state),
            }
        }
    }

    fn take_deadline(&self, deadline: Option<Instant>) -> Option<T> {
        let inner = &*self.inner;
        let mut state = inner.state.lock();
        loop {
            if state.disposed {
                return None;
            }
            // Dequeue whenever non-empty, regardless of policy.
            if let Some(item) = state.queue.pop_front() {
                inner.writable.notify_one();
                return Some(item);
            }
            match deadline {
                Some(d) => {
                    if inner.readable.wait_until(&mut state, d).timed_out() {
                        return None;
                    }
                }
                None => inner.readable.wait(&mut state),
            }
        }
    }

    /// Returns the number of values currently in the buffer.
    pub fn len(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Returns true if the buffer currently holds no values.
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().queue.is_empty()
    }

    /// Returns the capacity bound enforced by the buffer's policy.
    ///
    /// Unbounded buffers report `usize::MAX`.
    pub fn capacity(&self) -> usize {
        self.inner.policy.max()
    }

    /// Returns true if the buffer has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.state.lock().disposed
    }

    /// Disposes the buffer.
    ///
    /// Every thread blocked in a put or take wakes up with a failure, and
    /// every later operation fails fast. Queued values are dropped.
    /// Calling `dispose` more than once is a no-op.
    pub fn dispose(&self) {
        let mut state = self.inner.state.lock();
        if state.disposed {
            return;
        }
        state.disposed = true;
        let discarded = state.queue.len();
        state.queue.clear();
        self.inner.readable.notify_all();
        self.inner.writable.notify_all();
        debug!(discarded, "buffer disposed");
    }
}
