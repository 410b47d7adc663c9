//! One-shot notification primitive.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A one-shot notification shared between threads.
///
/// A `Signal` starts unset and can be set exactly once; setting it is
/// irreversible and wakes every waiter. The pipe endpoints each carry one
/// to announce their open-to-closed transition, so callers can observe or
/// wait on an endpoint closing without registering callbacks.
///
/// Cloning shares the signal.
#[derive(Clone, Default)]
pub struct Signal {
    inner: Arc<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    set: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    /// Creates a new, unset signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signal, waking every waiter.
    ///
    /// Returns true only for the call that performed the unset-to-set
    /// transition.
    pub(crate) fn set(&self) -> bool {
        let mut set = self.inner.set.lock();
        if *set {
            return false;
        }
        *set = true;
        self.inner.cond.notify_all();
        true
    }

    /// Returns true if the signal has been set.
    pub fn is_set(&self) -> bool {
        *self.inner.set.lock()
    }

    /// Blocks until the signal is set.
    pub fn wait(&self) {
        let mut set = self.inner.set.lock();
        while !*set {
            self.inner.cond.wait(&mut set);
        }
    }

    /// Blocks until the signal is set or `timeout` elapses.
    ///
    /// Returns whether the signal was set.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut set = self.inner.set.lock();
        while !*set {
            if self.inner.cond.wait_until(&mut set, deadline).timed_out() {
                return *set;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_once() {
        let signal = Signal::new();
        assert!(!signal.is_set());

        assert!(signal.set());
        assert!(signal.is_set());

        // Only the first call reports the transition.
        assert!(!signal.set());
        assert!(signal.is_set());
    }

    #[test]
    fn test_wait_timeout_unset() {
        let signal = Signal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(20)));
    }

    #[test]
    fn test_wait_released_across_threads() {
        let signal = Signal::new();
        let waiter_signal = signal.clone();

        let waiter = thread::spawn(move || {
            waiter_signal.wait();
            waiter_signal.is_set()
        });

        thread::sleep(Duration::from_millis(20));
        signal.set();

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_wait_timeout_already_set() {
        let signal = Signal::new();
        signal.set();
        assert!(signal.wait_timeout(Duration::from_millis(1)));
    }
}
