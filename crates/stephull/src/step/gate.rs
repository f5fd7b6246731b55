//! Single-slot rendezvous between observer and solver.

use std::sync::{Condvar, Mutex, PoisonError};

use super::lock;

/// One-slot advance gate.
///
/// The observer deposits at most one pending advance; the solver blocks until
/// a deposit is available and consumes it atomically. Deposits made before a
/// consumption collapse into the single slot: excess signals are discarded,
/// not queued.
#[derive(Debug, Default)]
pub struct StepGate {
    state: Mutex<GateState>,
    signal: Condvar,
}

#[derive(Debug, Default)]
struct GateState {
    pending: bool,
    cancelled: bool,
}

impl StepGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit one advance. Callable from any thread, any number of times.
    pub fn request_advance(&self) {
        let mut st = lock(&self.state);
        st.pending = true;
        // At most one solver waits here.
        self.signal.notify_one();
    }

    /// Park until an advance is pending, then consume it.
    ///
    /// The sole suspension point of a stepped run. Returns `false` when the
    /// gate was cancelled instead of signaled; the waiter must unwind.
    /// Cancellation wins over a deposit that arrives in the same window.
    pub fn await_advance(&self) -> bool {
        let mut st = lock(&self.state);
        while !st.pending && !st.cancelled {
            st = self.signal.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
        if st.cancelled {
            return false;
        }
        st.pending = false;
        true
    }

    /// Refuse the current and all future waits; wakes a parked waiter.
    pub fn cancel(&self) {
        let mut st = lock(&self.state);
        st.cancelled = true;
        self.signal.notify_one();
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        lock(&self.state).cancelled
    }
}
