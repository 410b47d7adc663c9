//! Reader/writer endpoints over a shared buffer with coordinated shutdown.
//!
//! A pipe pairs a write endpoint and a read endpoint over one
//! [`Buffer`], so a producer thread and a consumer thread can exchange
//! values and agree on when the stream ends:
//!
//! - [`open`]: a pipe that never blocks on writes (unbounded buffer)
//! - [`open_bounded`]: writers block once `capacity` values are in flight
//! - [`open_with`]: any buffer policy — dropping and sliding buffers give
//!   pipes whose writes never block
//!
//! # Half-close
//!
//! Closing the writer does not cut the reader off: buffered values keep
//! flowing until the backlog drains, and only then does the reader close.
//! Closing the reader tears the pipe down immediately — the writer closes
//! too, and a producer blocked on a full buffer is released with an error
//! instead of deadlocking. When both endpoints are closed, the shared
//! buffer is disposed exactly once. Each endpoint carries a one-shot
//! [`Signal`] observable by the other side or by tests.
//!
//! ```
//! use std::thread;
//!
//! let (writer, reader) = handoff_pipe::open_bounded::<i32>(4).unwrap().split();
//!
//! let producer = thread::spawn(move || {
//!     for i in 0..3 {
//!         writer.write(i).unwrap();
//!     }
//!     writer.close();
//! });
//!
//! let values: Vec<i32> = reader.into_iter().collect();
//! producer.join().unwrap();
//! assert_eq!(values, vec![0, 1, 2]);
//! ```
//!
//! [`Buffer`]: handoff_buffer::Buffer

mod error;
mod iter;
mod pipe;
mod reader;
mod signal;
mod writer;

pub use error::PipeError;
pub use iter::PipeIter;
pub use pipe::{Pipe, open, open_bounded, open_with};
pub use reader::PipeReader;
pub use signal::Signal;
pub use writer::PipeWriter;
