//! Step synchronization: the advance gate and the run coordinator.
//!
//! Purpose
//! - Decouple the sweep's mutation rate from the observer's pace. The solver
//!   blocks at a single-slot gate before every mutation; the observer signals
//!   advances and snapshots the shared live sequence at any time without ever
//!   seeing a half-applied mutation.
//!
//! Why this design
//! - A condition-variable gate instead of fixed-delay flag polling: the
//!   waiting run parks until signaled and consumes exactly one deposit per
//!   pass, so a burst of signals collapses rather than queuing.
//! - The sequence lock is scoped to one push/pop or one snapshot and is never
//!   held across the gate wait, keeping observers responsive while the run
//!   is parked.
//!
//! Code cross-refs: `gate::StepGate`, `run::StepRunner`,
//! `crate::hull::chain_hull_steps`.

mod gate;
mod run;

pub use gate::StepGate;
pub use run::{Pacing, RunError, RunState, StartError, StepRunner};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock, recovering from poisoning. Every critical section in this module is
/// a single push/pop, store, or clone, so a panic elsewhere cannot leave the
/// guarded data torn.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests;
