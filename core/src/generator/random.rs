use alloc::vec;
use ndarray::Array2;
use rand::Rng;
use rand::prelude::*;

use super::*;

/// Random placement driven by a seeded [`SmallRng`], successive layouts continue the same stream.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        shuffle_mines(config, &mut self.rng)
    }
}

/// Places `config.mines` mines with a partial Fisher-Yates shuffle.
///
/// Starts from all the mines packed at the front of a row-major list and swaps each of them with a random slot at or
/// after its own position. The pick for slot `i` is drawn from `i..len - 1`, so the last slot only ever holds a mine
/// on a completely full board.
pub fn shuffle_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> MineLayout {
    let side = usize::from(config.size);
    let total_cells = side * side;
    let mines = usize::from(config.mines);

    if mines > total_cells {
        log::warn!(
            "Minefield already full, generated anyway, requested {} but only fits {}",
            mines,
            total_cells
        );
    }
    let mines = mines.min(total_cells);

    let mut flags = vec![false; total_cells];
    flags[..mines].fill(true);

    for i in 0..mines {
        // keep the range non-empty when the board is full
        let upper = (total_cells - 1).max(i + 1);
        let to = rng.random_range(i..upper);
        flags.swap(i, to);
    }

    MineLayout::from_mine_mask(Array2::from_shape_fn((side, side), |(row, col)| {
        flags[row * side + col]
    }))
}
