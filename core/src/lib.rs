#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use turn::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod turn;
mod types;

/// Dimensions of a square board and how many mines to hide in it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Self {
        let clamped_size = size.clamp(1, Coord::MAX);
        let clamped_mines = mines.min(mult(clamped_size, clamped_size));
        if (clamped_size, clamped_mines) != (size, mines) {
            log::warn!(
                "Clamped game config, requested {size}x{size} with {mines} mines, using {clamped_size}x{clamped_size} with {clamped_mines}"
            );
        }
        Self::new_unchecked(clamped_size, clamped_mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

/// Where the mines are, fixed for the lifetime of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutData")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Unchecked wire form of [`MineLayout`].
#[derive(Deserialize)]
struct MineLayoutData {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutData> for MineLayout {
    type Error = GameError;

    fn try_from(data: MineLayoutData) -> Result<Self> {
        let (rows, cols) = data.mine_mask.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = Self::from_mine_mask(data.mine_mask);
        if layout.mine_count != data.mine_count {
            return Err(GameError::InconsistentCounts);
        }
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from a row-major list of `size * size` mine flags.
    pub fn from_mine_flags(size: Coord, mine_flags: &[bool]) -> Result<Self> {
        let side = usize::from(size);
        let expected = side * side;
        if mine_flags.len() != expected {
            return Err(GameError::InvalidLayoutLength {
                expected,
                actual: mine_flags.len(),
            });
        }

        let mine_mask = Array2::from_shape_fn((side, side), |(row, col)| {
            mine_flags[row * side + col]
        });
        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord {
        self.mine_mask.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, always fits
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn config_clamps_mines_to_board_area() {
        let config = GameConfig::new(3, 20);
        assert_eq!(config.size, 3);
        assert_eq!(config.mines, 9);
    }

    #[test]
    fn config_clamps_zero_size() {
        let config = GameConfig::new(0, 0);
        assert_eq!(config, GameConfig::new_unchecked(1, 0));
        assert_eq!(config.total_cells(), 1);
    }

    #[test]
    fn mine_flags_are_row_major() {
        let mut flags = vec![false; 6 * 6];
        flags[1] = true;
        flags[6 * 4 + 2] = true;

        let layout = MineLayout::from_mine_flags(6, &flags).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((0, 1)));
        assert!(layout.contains_mine((4, 2)));
        assert!(!layout.contains_mine((1, 0)));
    }

    #[test]
    fn mine_flags_must_cover_board() {
        let err = MineLayout::from_mine_flags(3, &[false; 8]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidLayoutLength {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn mine_coords_outside_board_are_rejected() {
        assert_eq!(
            MineLayout::from_mine_coords(2, &[(0, 2)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn adjacent_mine_count_matches_neighbors() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(3, 2));
    }

    #[test]
    fn layout_serde_round_trip() {
        let layout = MineLayout::from_mine_coords(4, &[(0, 3), (2, 1)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(serde_json::from_str::<MineLayout>(&json).unwrap(), layout);
    }

    #[test]
    fn layout_serde_rejects_bad_shape_and_count() {
        let layout = MineLayout::from_mine_coords(3, &[(1, 1)]).unwrap();

        let mut value = serde_json::to_value(&layout).unwrap();
        value["mine_mask"]["dim"] = serde_json::json!([3, 2]);
        value["mine_mask"]["data"].as_array_mut().unwrap().truncate(6);
        assert!(serde_json::from_value::<MineLayout>(value).is_err());

        let mut value = serde_json::to_value(&layout).unwrap();
        value["mine_count"] = 4.into();
        let err = serde_json::from_value::<MineLayout>(value).unwrap_err();
        assert!(err.to_string().contains("Stored counts do not match the cells"));
    }
}
