use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use nalgebra::Vector2;

use super::*;
use crate::hull::{chain_hull, chain_hull_steps, HullMutation};

const TIMEOUT: Duration = Duration::from_secs(5);

fn v(x: f64, y: f64) -> Vector2<f64> {
    Vector2::new(x, y)
}

fn square_with_center() -> Vec<Vector2<f64>> {
    vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(2.0, 2.0)]
}

/// Record the sweep's mutation log without pacing.
fn mutation_log(cloud: &[Vector2<f64>]) -> Vec<HullMutation> {
    let mut log = Vec::new();
    let _ = chain_hull_steps(cloud, &mut |m: HullMutation| {
        log.push(m);
        true
    });
    log
}

/// The sequence a sink mirroring the first `log` entries would hold.
fn replay(log: &[HullMutation]) -> Vec<Vector2<f64>> {
    let mut seq = Vec::new();
    for m in log {
        match *m {
            HullMutation::Add(p) => seq.push(p),
            HullMutation::RemoveLast => {
                seq.pop();
            }
        }
    }
    seq
}

fn wait_until(mut pred: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if pred() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn gate_coalesces_bursts_into_one_deposit() {
    let gate = Arc::new(StepGate::new());
    gate.request_advance();
    gate.request_advance();
    // One consumption empties the slot despite two requests.
    assert!(gate.await_advance());

    let waiter = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || gate.await_advance())
    };
    // The second waiter finds no deposit and parks until cancelled.
    thread::sleep(Duration::from_millis(50));
    gate.cancel();
    assert!(!waiter.join().unwrap());
}

#[test]
fn gate_cancel_wakes_a_parked_waiter() {
    let gate = Arc::new(StepGate::new());
    let waiter = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || gate.await_advance())
    };
    thread::sleep(Duration::from_millis(20));
    gate.cancel();
    assert!(!waiter.join().unwrap());
    // Cancelled gates refuse even when a deposit is present.
    gate.request_advance();
    assert!(!gate.await_advance());
}

#[test]
fn free_run_completes_without_signals() {
    let cloud = square_with_center();
    let mut runner = StepRunner::new();
    runner.start_run(cloud.clone(), Pacing::FreeRun).unwrap();
    let hull = runner.await_completion().unwrap();
    assert_eq!(hull, chain_hull(&cloud));
    assert_eq!(runner.state(), RunState::Completed);

    // The live sequence keeps the closing duplicate of its first vertex.
    let (seq, state) = runner.observe_hull();
    assert_eq!(state, RunState::Completed);
    assert_eq!(seq.len(), hull.len() + 1);
    assert_eq!(seq[..hull.len()], hull[..]);

    // Repeated waits return the same hull.
    assert_eq!(runner.await_completion().unwrap(), hull);
}

#[test]
fn stepped_run_takes_exactly_one_signal_per_mutation() {
    let cloud = square_with_center();
    let log = mutation_log(&cloud);
    assert!(!log.is_empty());

    let mut runner = StepRunner::new();
    runner.start_run(cloud.clone(), Pacing::Stepped).unwrap();

    // Start deposits nothing: the sweep must not move on its own.
    assert!(!wait_until(
        || !runner.observe_hull().0.is_empty(),
        Duration::from_millis(100)
    ));
    assert_eq!(runner.state(), RunState::Running);

    for i in 0..log.len() {
        runner.request_advance();
        let expected = replay(&log[..i + 1]);
        assert!(
            wait_until(|| runner.observe_hull().0 == expected, TIMEOUT),
            "mutation {i} was not applied after its signal"
        );
        if i + 1 < log.len() {
            // Partial signaling leaves the run live on the exact prefix.
            assert_eq!(runner.state(), RunState::Running);
        }
    }

    assert!(wait_until(|| runner.state() == RunState::Completed, TIMEOUT));
    assert_eq!(runner.await_completion().unwrap(), chain_hull(&cloud));
}

#[test]
fn start_while_running_is_rejected() {
    let mut runner = StepRunner::new();
    runner
        .start_run(square_with_center(), Pacing::Stepped)
        .unwrap();
    assert_eq!(
        runner.start_run(square_with_center(), Pacing::Stepped),
        Err(StartError::RunActive)
    );

    // Explicit cancel-and-restart is the sanctioned composition.
    runner.cancel_run();
    assert_eq!(runner.state(), RunState::Idle);
    runner.start_run(vec![v(1.0, 1.0)], Pacing::FreeRun).unwrap();
    assert_eq!(runner.await_completion().unwrap(), vec![v(1.0, 1.0)]);
}

#[test]
fn cancel_discards_a_partial_run() {
    let mut runner = StepRunner::new();
    runner
        .start_run(square_with_center(), Pacing::Stepped)
        .unwrap();
    runner.request_advance();
    assert!(wait_until(
        || runner.observe_hull().0.len() == 1,
        TIMEOUT
    ));

    runner.cancel_run();
    assert_eq!(runner.state(), RunState::Idle);
    let (seq, state) = runner.observe_hull();
    assert!(seq.is_empty());
    assert_eq!(state, RunState::Idle);
    assert_eq!(runner.await_completion(), Err(RunError::NoRun));
}

#[test]
fn await_without_a_run_is_an_error() {
    let mut runner = StepRunner::new();
    assert_eq!(runner.await_completion(), Err(RunError::NoRun));
}

#[test]
fn unsignaled_stepped_run_holds_indefinitely() {
    let mut runner = StepRunner::new();
    runner
        .start_run(square_with_center(), Pacing::Stepped)
        .unwrap();
    thread::sleep(Duration::from_millis(100));
    assert_eq!(runner.state(), RunState::Running);
    assert!(runner.observe_hull().0.is_empty());
    runner.cancel_run();
}

#[test]
fn advances_after_completion_are_inert() {
    let cloud = square_with_center();
    let mut runner = StepRunner::new();
    runner.start_run(cloud.clone(), Pacing::FreeRun).unwrap();
    let hull = runner.await_completion().unwrap();

    runner.request_advance();
    let (seq, state) = runner.observe_hull();
    assert_eq!(state, RunState::Completed);
    assert_eq!(seq.len(), hull.len() + 1);
}

#[test]
fn completed_runner_accepts_a_fresh_cloud() {
    let cloud = square_with_center();
    let mut runner = StepRunner::new();
    runner.start_run(cloud.clone(), Pacing::FreeRun).unwrap();
    let first = runner.await_completion().unwrap();

    runner.start_run(cloud, Pacing::FreeRun).unwrap();
    let second = runner.await_completion().unwrap();
    assert_eq!(first, second);
}
