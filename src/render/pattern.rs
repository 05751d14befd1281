use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const GRID_SIZE: usize = 4;

/// Decorative 4×4 "code" shown at the bottom of a pass. Carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePattern {
    cells: [bool; GRID_SIZE * GRID_SIZE],
}

impl CodePattern {
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = [false; GRID_SIZE * GRID_SIZE];
        for cell in cells.iter_mut() {
            *cell = rng.gen_bool(0.5);
        }
        Self { cells }
    }

    pub fn random() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn for_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::random, Self::seeded)
    }

    /// A lit cell is drawn light on the dark grid.
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE && self.cells[row * GRID_SIZE + col]
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|lit| **lit).count()
    }
}
