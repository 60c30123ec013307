use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells with the mines already placed.
///
/// All mutation goes through [`Board::resolve`]; the renderer side only reads through [`Board::cell`] and the
/// counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    grid: Array2<Cell>,
    mine_count: CellCount,
    flagged_count: CellCount,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct BoardData {
    grid: Array2<Cell>,
    mine_count: CellCount,
    flagged_count: CellCount,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    /// Rejects grids that are not square, and counters or adjacency counts that disagree with the cells.
    fn try_from(data: BoardData) -> Result<Self> {
        let (rows, cols) = data.grid.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }

        let mines = data.grid.iter().filter(|cell| cell.is_mine).count();
        let flags = data.grid.iter().filter(|cell| cell.flagged).count();
        if mines != usize::from(data.mine_count) || flags != usize::from(data.flagged_count) {
            return Err(GameError::InconsistentCounts);
        }

        for ((row, col), cell) in data.grid.indexed_iter() {
            let adjacent = data
                .grid
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|&pos| data.grid[pos.to_nd_index()].is_mine)
                .count();
            if usize::from(cell.adjacent_mine_count) != adjacent {
                return Err(GameError::InconsistentCounts);
            }
        }

        Ok(Self {
            grid: data.grid,
            mine_count: data.mine_count,
            flagged_count: data.flagged_count,
        })
    }
}

impl Board {
    pub fn new(config: GameConfig, generator: &mut impl LayoutGenerator) -> Self {
        Self::from_layout(&generator.generate(config))
    }

    /// Builds the grid and computes every adjacency count, which never changes afterwards.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let side = usize::from(layout.size());
        let grid = Array2::from_shape_fn((side, side), |(row, col)| {
            // side fits in a Coord
            let coords = (row as Coord, col as Coord);
            Cell {
                is_mine: layout.contains_mine(coords),
                adjacent_mine_count: layout.adjacent_mine_count(coords),
                ..Default::default()
            }
        });
        log::debug!(
            "Board built, {}x{} with {} mines",
            side,
            side,
            layout.mine_count()
        );

        Self {
            grid,
            mine_count: layout.mine_count(),
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord {
        self.grid.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn exposed_count(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|cell| cell.exposed)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Mines minus flags placed, regardless of whether the flags are right. Goes negative when over-flagged.
    pub fn unflagged_mine_count_remaining(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    /// The cell at `(row, col)`, or `None` when that lies outside the board.
    pub fn cell(&self, row: RequestCoord, col: RequestCoord) -> Option<&Cell> {
        self.locate(row, col)
            .map(|coords| &self.grid[coords.to_nd_index()])
    }

    /// Row-major iteration over all cells.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.grid
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// All safe cells are exposed.
    pub fn is_won(&self) -> bool {
        self.grid.iter().all(|cell| !cell.is_pending_safe())
    }

    pub fn resolve(&mut self, request: TurnRequest) -> TurnOutcome {
        let result = self.resolve_result(request);
        log::trace!(
            "Resolved {:?} at ({}, {}) as {:?}",
            request.op,
            request.row,
            request.col,
            result
        );
        TurnOutcome::new(result, request)
    }

    fn resolve_result(&mut self, request: TurnRequest) -> TurnResult {
        use TurnResult::*;

        let Some(coords) = self.locate(request.row, request.col) else {
            return InvalidCellSelected;
        };
        let cell = &mut self.grid[coords.to_nd_index()];

        match request.op {
            TurnOp::Unflag => {
                if !cell.flagged {
                    return CellIsNotFlagged;
                }
                cell.flagged = false;
                self.flagged_count -= 1;
                CellUnflagged
            }
            TurnOp::Flag => {
                if cell.exposed {
                    return CellIsAlreadyExposed;
                }
                if cell.flagged {
                    return CellIsAlreadyFlagged;
                }
                cell.flagged = true;
                self.flagged_count += 1;
                CellFlagged
            }
            // flagged cells are not protected from exposing
            TurnOp::Expose => {
                if cell.exposed {
                    return CellIsAlreadyExposed;
                }
                if cell.is_mine {
                    cell.exposed = true;
                    log::debug!("Mine hit at {:?}", coords);
                    return PlayerLoses;
                }

                self.expose_region(coords);

                if self.is_won() {
                    self.expose_all();
                    log::debug!("All safe cells exposed");
                    PlayerWins
                } else {
                    CellExposed
                }
            }
            TurnOp::Quit | TurnOp::Unknown => UnknownError,
        }
    }

    /// Exposes `start` and, through cells with no adjacent mines, the whole connected region around it.
    ///
    /// Uses a work list instead of recursion; a cell is marked exposed before its neighbors are queued, so each cell
    /// is processed once. Mines are never exposed here.
    fn expose_region(&mut self, start: Coord2) -> usize {
        let mut exposed = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.grid[coords.to_nd_index()];
            if cell.exposed || cell.is_mine {
                continue;
            }
            cell.exposed = true;
            exposed += 1;

            if cell.adjacent_mine_count == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    grid.iter_neighbors(coords)
                        .filter(|&pos| !grid[pos.to_nd_index()].exposed),
                );
            }
        }

        log::trace!("Exposed {} cells from {:?}", exposed, start);
        exposed
    }

    fn expose_all(&mut self) {
        for cell in self.grid.iter_mut() {
            cell.exposed = true;
        }
    }

    fn locate(&self, row: RequestCoord, col: RequestCoord) -> Option<Coord2> {
        checked_coords(row, col, self.size())
    }
}
