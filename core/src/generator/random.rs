use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform random placement over every cell but the first revealed one.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R = SmallRng> {
    rng: R,
}

impl RandomPlacer<SmallRng> {
    /// Reproducible placement for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Placement seeded from the operating system, different on every run.
    pub fn from_entropy() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }
}

impl<R: Rng> RandomPlacer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomPlacer<SmallRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> MinePlacer for RandomPlacer<R> {
    fn place(&mut self, grid: &mut Grid, exclude: Coord2) {
        grid.place_mines(exclude, &mut self.rng);
    }
}
