//! Thread-safe bounded FIFO buffers with pluggable overflow policies.
//!
//! This crate provides a blocking producer/consumer buffer for handing
//! values between threads. One engine implements the waiting, waking,
//! timeout and disposal machinery; the overflow policy chosen at
//! construction time decides what happens to a producer once the buffer
//! is full:
//!
//! - [`Buffer::bounded`]: the producer blocks until a consumer makes room
//! - [`Buffer::dropping`]: the new value is silently discarded
//! - [`Buffer::sliding`]: the oldest value is evicted to make room
//! - [`Buffer::unbounded`]: the buffer grows without bound
//!
//! Consumers always block while the buffer is empty. Values come out in
//! the order they were admitted, strictly FIFO.
//!
//! # Blocking, timeouts and disposal
//!
//! Every operation comes in an erroring form (`put`, `take` and their
//! `_timeout` variants) and a `try_*` form that reports failure through
//! its return value. Both wait identically; they differ only in how
//! failure surfaces. All waits race against [`Buffer::dispose`], which
//! irreversibly shuts the buffer down and releases every blocked thread.
//!
//! ```
//! use handoff_buffer::Buffer;
//! use std::time::Duration;
//!
//! let buf = Buffer::<i32>::bounded(2).unwrap();
//! assert!(buf.try_put(1));
//! assert!(buf.try_put(2));
//!
//! // Full: a third put gives up after the timeout.
//! assert!(!buf.try_put_timeout(3, Duration::from_millis(10)));
//!
//! assert_eq!(buf.take().unwrap(), 1);
//! ```
//!
//! # Thread Safety
//!
//! All types are `Send + Sync` and can be shared between threads using
//! `Clone` (which shares the underlying buffer via `Arc`).

mod buffer;
mod error;
mod policy;
mod queue;

pub use buffer::{Buffer, DEFAULT_CAPACITY};
pub use error::BufferError;
pub use queue::BlockingQueue;
