//! 2D convex hull construction (monotone chain, event-emitting).
//!
//! Purpose
//! - Provide a single implementation of the sweep that serves both the plain
//!   "give me the hull" caller and the steppable runner: the sweep reports
//!   each vertex add/remove through a [`StepSink`] and keeps its own stack.
//!
//! Why this design
//! - Renderer-specific duplicates of the algorithm (vertex markers vs line
//!   segments) collapse into one event stream; consumers interpret events in
//!   their own terms.
//!
//! Code cross-refs: `chain::{chain_hull_steps, chain_hull, cross}`,
//! `rand::draw_cloud_uniform`, `crate::step::StepRunner`.

mod chain;
pub mod rand;

pub use chain::{chain_hull, chain_hull_steps, cross, HullMutation, StepSink};
