//! Run lifecycle: worker thread, shared live sequence, stepping API.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use nalgebra::Vector2;
use thiserror::Error;

use crate::hull::{chain_hull_steps, HullMutation};

use super::gate::StepGate;
use super::lock;

/// Lifecycle of the coordinator's current run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// How the solver is paced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Park at the gate before every mutation; one advance per mutation.
    Stepped,
    /// Never park; mutations still apply one at a time under the lock.
    FreeRun,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StartError {
    /// A run is executing. Cancel it first or let it complete.
    #[error("a run is already active")]
    RunActive,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("no run has been started")]
    NoRun,
    #[error("the run was cancelled before completion")]
    Cancelled,
    #[error("the solver thread panicked")]
    Panicked,
}

/// View shared between the worker and observers. One lock spans the sequence
/// and the state, held per mutation or per snapshot, never across the gate
/// wait.
#[derive(Debug)]
struct Shared {
    hull: Vec<Vector2<f64>>,
    state: RunState,
}

#[derive(Debug)]
struct ActiveRun {
    shared: Arc<Mutex<Shared>>,
    gate: Arc<StepGate>,
    join: Option<JoinHandle<Option<Vec<Vector2<f64>>>>>,
    outcome: Option<Result<Vec<Vector2<f64>>, RunError>>,
}

/// Single-run coordinator: owns the worker, the gate, and the live sequence.
///
/// At most one run is active at a time. Starting while a run is `Running` is
/// rejected; restart is the explicit composition `cancel_run` then
/// `start_run`.
#[derive(Debug, Default)]
pub struct StepRunner {
    run: Option<ActiveRun>,
}

impl StepRunner {
    pub fn new() -> Self {
        Self { run: None }
    }

    /// Begin a run over `cloud`.
    ///
    /// Deposits no advance: a `Stepped` run makes no progress until the
    /// observer signals. A previous `Completed` run is discarded; a `Running`
    /// one is rejected.
    pub fn start_run(
        &mut self,
        cloud: Vec<Vector2<f64>>,
        pacing: Pacing,
    ) -> Result<(), StartError> {
        if self.state() == RunState::Running {
            return Err(StartError::RunActive);
        }
        let shared = Arc::new(Mutex::new(Shared {
            hull: Vec::new(),
            state: RunState::Running,
        }));
        let gate = Arc::new(StepGate::new());
        let worker_shared = Arc::clone(&shared);
        let worker_gate = Arc::clone(&gate);
        let join = thread::spawn(move || {
            // Gate first, then apply the mutation under the lock. The lock is
            // scoped to the single push/pop and is never held across the wait.
            let mut sink = |m: HullMutation| {
                match pacing {
                    Pacing::Stepped => {
                        if !worker_gate.await_advance() {
                            return false;
                        }
                    }
                    Pacing::FreeRun => {
                        if worker_gate.is_cancelled() {
                            return false;
                        }
                    }
                }
                let mut sh = lock(&worker_shared);
                match m {
                    HullMutation::Add(p) => sh.hull.push(p),
                    HullMutation::RemoveLast => {
                        sh.hull.pop();
                    }
                }
                true
            };
            let result = chain_hull_steps(&cloud, &mut sink);
            if result.is_some() {
                lock(&worker_shared).state = RunState::Completed;
            }
            result
        });
        self.run = Some(ActiveRun {
            shared,
            gate,
            join: Some(join),
            outcome: None,
        });
        Ok(())
    }

    /// Signal one step forward.
    ///
    /// Bursts coalesce into a single pending advance. With no active run this
    /// is a no-op; a deposit on a completed run is inert and is discarded
    /// with the run.
    pub fn request_advance(&self) {
        if let Some(run) = &self.run {
            run.gate.request_advance();
        }
    }

    /// Coherent snapshot of the live sequence and the run state.
    ///
    /// Non-blocking with respect to run progress. While the run is live the
    /// sequence is in construction order and, once the sweep has closed the
    /// chain, ends with the duplicate of its first vertex.
    pub fn observe_hull(&self) -> (Vec<Vector2<f64>>, RunState) {
        match &self.run {
            Some(run) => {
                let sh = lock(&run.shared);
                (sh.hull.clone(), sh.state)
            }
            None => (Vec::new(), RunState::Idle),
        }
    }

    /// Current run state without copying the sequence.
    pub fn state(&self) -> RunState {
        match &self.run {
            Some(run) => lock(&run.shared).state,
            None => RunState::Idle,
        }
    }

    /// Park until the run completes and return the final trimmed hull.
    ///
    /// A stepped run completes only if the observer keeps signaling; with no
    /// further signals this holds indefinitely, which is the documented
    /// contract of a paused run. The runner stays `Completed` afterwards and
    /// accepts a new cloud via `start_run`.
    pub fn await_completion(&mut self) -> Result<Vec<Vector2<f64>>, RunError> {
        let run = self.run.as_mut().ok_or(RunError::NoRun)?;
        if run.outcome.is_none() {
            let outcome = match run.join.take() {
                Some(join) => match join.join() {
                    Ok(Some(hull)) => Ok(hull),
                    Ok(None) => Err(RunError::Cancelled),
                    Err(_) => Err(RunError::Panicked),
                },
                None => Err(RunError::Cancelled),
            };
            run.outcome = Some(outcome);
        }
        match run.outcome.as_ref() {
            Some(Ok(hull)) => Ok(hull.clone()),
            Some(Err(e)) => Err(*e),
            None => Err(RunError::NoRun),
        }
    }

    /// Abort the active run, if any, and return to `Idle`.
    ///
    /// Wakes a parked wait with a refusal, joins the worker, and discards the
    /// run together with its sequence and any pending advance.
    pub fn cancel_run(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.gate.cancel();
            if let Some(join) = run.join.take() {
                let _ = join.join();
            }
        }
    }
}
