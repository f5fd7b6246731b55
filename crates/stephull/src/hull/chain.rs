//! Monotone-chain sweep with observable mutations.

use std::cmp::Ordering;

use nalgebra::Vector2;

/// One observable change to the hull-in-progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HullMutation {
    /// A vertex was placed on top of the chain stack.
    Add(Vector2<f64>),
    /// The top vertex of the chain stack was discarded.
    RemoveLast,
}

/// Receives hull mutations in the exact order the sweep applies them.
///
/// The sink runs before the sweep updates its own stack, so a sink that
/// mirrors the stack sees every intermediate sequence. Returning `false`
/// aborts the sweep with no further mutations.
pub trait StepSink {
    fn on_mutation(&mut self, m: HullMutation) -> bool;
}

impl<F: FnMut(HullMutation) -> bool> StepSink for F {
    #[inline]
    fn on_mutation(&mut self, m: HullMutation) -> bool {
        self(m)
    }
}

/// Signed parallelogram area spanned by o→a and o→b.
/// Positive when o→a→b turns counterclockwise, negative when clockwise, zero
/// when collinear.
#[inline]
pub fn cross(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Total order for the sweep: x ascending, ties by y ascending.
#[inline]
fn cmp_xy(a: &Vector2<f64>, b: &Vector2<f64>) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Andrew's monotone chain with per-mutation events.
///
/// Sorts a working copy (the caller's cloud is untouched), then runs the two
/// passes over one shared stack: left to right, then right to left from the
/// second-to-last point, where the second pass pops only down to a floor that
/// keeps the first pass's end vertices anchored. The `<= 0` turn test pops on
/// clockwise *and* collinear triples, so collinear boundary points are
/// stripped and only strictly turning vertices survive.
///
/// Each pop and each placement is reported to `sink` before it is applied.
/// Returns `None` if the sink aborted, otherwise the hull in counterclockwise
/// traversal order with the closing duplicate dropped. Clouds of size 0 or 1
/// come back unchanged; input duplicates are not filtered beforehand.
/// Non-finite coordinates are not checked and give unspecified results.
pub fn chain_hull_steps<S: StepSink>(
    cloud: &[Vector2<f64>],
    sink: &mut S,
) -> Option<Vec<Vector2<f64>>> {
    let mut pts = cloud.to_vec();
    pts.sort_by(cmp_xy);

    let n = pts.len();
    let mut hull: Vec<Vector2<f64>> = Vec::with_capacity(2 * n);

    // First chain, left to right.
    for i in 0..n {
        if !sweep_point(&mut hull, pts[i], 2, sink) {
            return None;
        }
    }

    // Second chain, right to left. The floor keeps the first chain's
    // endpoints on the stack.
    let floor = hull.len() + 1;
    for i in (0..n.saturating_sub(1)).rev() {
        if !sweep_point(&mut hull, pts[i], floor, sink) {
            return None;
        }
    }

    // The stack closes back on its first vertex; drop the duplicate.
    if hull.len() > 1 {
        hull.pop();
    }
    Some(hull)
}

/// Pop non-left turns down to `floor`, then place `p`. False if the sink aborted.
fn sweep_point<S: StepSink>(
    hull: &mut Vec<Vector2<f64>>,
    p: Vector2<f64>,
    floor: usize,
    sink: &mut S,
) -> bool {
    while hull.len() >= floor && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
        if !sink.on_mutation(HullMutation::RemoveLast) {
            return false;
        }
        hull.pop();
    }
    if !sink.on_mutation(HullMutation::Add(p)) {
        return false;
    }
    hull.push(p);
    true
}

/// Convex hull without pacing: the same sweep with a sink that never pauses.
pub fn chain_hull(cloud: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    // The sink never aborts, so the sweep always completes.
    chain_hull_steps(cloud, &mut |_: HullMutation| true).unwrap_or_default()
}
