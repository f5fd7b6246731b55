//! Random point clouds (uniform in a rectangle + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for demo and test clouds. The
//!   sampler is parameterized by explicit bounds instead of any display
//!   surface, and reproducible through a replay token.
//!
//! Model
//! - Draw `count` points uniformly inside an axis-aligned rectangle.
//!   Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `crate::hull::chain_hull`, `crate::step::StepRunner`.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cloud size distribution.
#[derive(Clone, Copy, Debug)]
pub enum CloudCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl CloudCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            CloudCount::Fixed(n) => n,
            CloudCount::Uniform { min, max } => {
                let hi = max.max(min);
                rng.gen_range(min..=hi)
            }
        }
    }
}

/// Axis-aligned sampling rectangle.
#[derive(Clone, Copy, Debug)]
pub struct Bounds2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}
impl Default for Bounds2 {
    fn default() -> Self {
        Self {
            min: Vector2::new(0.0, 0.0),
            max: Vector2::new(1.0, 1.0),
        }
    }
}

/// Uniform cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    pub count: CloudCount,
    pub bounds: Bounds2,
}
impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: CloudCount::Fixed(15),
            bounds: Bounds2::default(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random point cloud, uniform over `cfg.bounds`.
///
/// Degenerate bounds (min >= max on an axis) collapse that axis to the `min`
/// coordinate; the draw still succeeds.
pub fn draw_cloud_uniform(cfg: CloudCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.sample(&mut rng);
    let lo = cfg.bounds.min;
    let hi = cfg.bounds.max;
    (0..n)
        .map(|_| {
            let x = sample_axis(&mut rng, lo.x, hi.x);
            let y = sample_axis(&mut rng, lo.y, hi.y);
            Vector2::new(x, y)
        })
        .collect()
}

#[inline]
fn sample_axis<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
