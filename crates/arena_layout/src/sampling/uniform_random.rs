//! Uniform random position sampling strategy.
use mint::Vector2;
use rand::Rng;

use crate::geometry::Bounds;
use crate::sampling::{rand01, PositionSampling};

/// Uniform i.i.d. random sampling over a closed rectangle.
///
/// All x coordinates are drawn before all y coordinates, so a draw of `count`
/// points consumes `2 * count` values from the RNG.
#[derive(Debug, Clone)]
pub struct UniformRandomSampling {
    /// Number of points to generate.
    pub count: usize,
}

impl UniformRandomSampling {
    /// Create a new uniform random sampler that generates `count` points.
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl PositionSampling for UniformRandomSampling {
    fn generate(&self, bounds: &Bounds, rng: &mut dyn Rng) -> Vec<Vector2<f64>> {
        if self.count == 0 || !bounds.x.is_well_formed() || !bounds.y.is_well_formed() {
            return Vec::new();
        }

        let xs: Vec<f64> = (0..self.count).map(|_| bounds.x.lerp(rand01(rng))).collect();
        let ys: Vec<f64> = (0..self.count).map(|_| bounds.y.lerp(rand01(rng))).collect();

        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Vector2 { x, y })
            .collect()
    }
}
