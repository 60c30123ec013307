use serde::{Deserialize, Serialize};

use crate::*;

/// What the player wants to do this turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOp {
    /// Never resolved, aborts the game.
    #[default]
    Unknown,
    Quit,
    Expose,
    Flag,
    Unflag,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub op: TurnOp,
    pub row: RequestCoord,
    pub col: RequestCoord,
}

impl TurnRequest {
    pub const fn new(op: TurnOp, row: RequestCoord, col: RequestCoord) -> Self {
        Self { op, row, col }
    }

    pub const fn expose(row: RequestCoord, col: RequestCoord) -> Self {
        Self::new(TurnOp::Expose, row, col)
    }

    pub const fn flag(row: RequestCoord, col: RequestCoord) -> Self {
        Self::new(TurnOp::Flag, row, col)
    }

    pub const fn unflag(row: RequestCoord, col: RequestCoord) -> Self {
        Self::new(TurnOp::Unflag, row, col)
    }

    pub const fn quit() -> Self {
        Self::new(TurnOp::Quit, 0, 0)
    }
}

/// Classified result of resolving one turn against the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResult {
    InvalidCellSelected,
    UnknownError,
    CellIsAlreadyExposed,
    CellIsAlreadyFlagged,
    CellIsNotFlagged,
    CellExposed,
    CellFlagged,
    CellUnflagged,
    PlayerWins,
    PlayerLoses,
}

impl TurnResult {
    /// Whether the game ends with this result.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PlayerWins | Self::PlayerLoses)
    }
}

/// A [`TurnResult`] together with the cell the request targeted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub result: TurnResult,
    pub row: RequestCoord,
    pub col: RequestCoord,
}

impl TurnOutcome {
    pub const fn new(result: TurnResult, request: TurnRequest) -> Self {
        Self {
            result,
            row: request.row,
            col: request.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_unknown() {
        assert_eq!(TurnRequest::default().op, TurnOp::Unknown);
    }

    #[test]
    fn only_win_and_loss_are_terminal() {
        assert!(TurnResult::PlayerWins.is_terminal());
        assert!(TurnResult::PlayerLoses.is_terminal());
        assert!(!TurnResult::CellExposed.is_terminal());
        assert!(!TurnResult::InvalidCellSelected.is_terminal());
    }

    #[test]
    fn request_json_shape() {
        let request: TurnRequest =
            serde_json::from_str(r#"{"op":"Flag","row":2,"col":-1}"#).unwrap();
        assert_eq!(request, TurnRequest::flag(2, -1));

        let outcome = TurnOutcome::new(TurnResult::CellFlagged, request);
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"result":"CellFlagged","row":2,"col":-1}"#);
    }
}
