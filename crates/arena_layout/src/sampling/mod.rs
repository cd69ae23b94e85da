//! Sampling strategies for drawing candidate positions inside the arena.
//!
//! The generator draws every candidate layout through a [`PositionSampling`]
//! strategy, which keeps the draw independent from the accept/reject loop.
use mint::Vector2;
use rand::Rng;

use crate::geometry::Bounds;

pub mod uniform_random;

pub use uniform_random::UniformRandomSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, bounds: &Bounds, rng: &mut dyn Rng) -> Vec<Vector2<f64>>;
}

/// Generate a random float in the range [0, 1) with 53 bits of precision.
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}
