//! Steppable 2D convex hulls (Andrew's monotone chain).
//!
//! Purpose
//! - `hull`: the sweep itself. Sort, orientation test, two-pass chain over a
//!   single stack, closing-duplicate trim. Every vertex add/remove is emitted
//!   as an abstract mutation event; the sweep has no notion of pacing.
//! - `step`: the pacing side. A single-slot advance gate plus a run
//!   coordinator that owns the shared live sequence, so an observer can
//!   advance the sweep one mutation at a time (or free-run it) and snapshot
//!   the sequence at any moment without ever seeing a half-applied mutation.
//!
//! The split keeps the geometry reusable on its own: `hull::chain_hull` is
//! the plain, ungated entry point.

pub mod hull;
pub mod step;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hull::rand::{draw_cloud_uniform, Bounds2, CloudCfg, CloudCount, ReplayToken};
    pub use crate::hull::{chain_hull, chain_hull_steps, cross, HullMutation, StepSink};
    pub use crate::step::{Pacing, RunError, RunState, StartError, StepGate, StepRunner};
    pub use nalgebra::Vector2 as Vec2;
}
