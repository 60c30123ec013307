use serde::{Deserialize, Serialize};

/// State of a single board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub exposed: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub adjacent_mine_count: u8,
}

impl Cell {
    /// A safe cell that has not been exposed yet, the player needs to expose all of them to win.
    pub const fn is_pending_safe(&self) -> bool {
        !self.exposed && !self.is_mine
    }
}
