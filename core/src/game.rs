use alloc::boxed::Box;
use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    PlayerWins,
    PlayerLoses,
    PlayerQuits,
    GameAborted,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Initializing,
    AwaitingTurnRequest,
    ResolvingTurn(TurnRequest),
    Finished(GameResult),
}

/// Receives lifecycle notifications, the board is passed along for rendering.
pub trait GameObserver {
    fn on_board_changed(&mut self, _board: &Board) {}

    fn on_turn_completed(&mut self, _outcome: &TurnOutcome) {}
}

impl GameObserver for () {}

/// Supplies the player's next move. Called synchronously, the game waits for the answer.
pub trait TurnSource {
    fn request_turn(&mut self, board: &Board) -> TurnRequest;
}

impl<F> TurnSource for F
where
    F: FnMut(&Board) -> TurnRequest,
{
    fn request_turn(&mut self, board: &Board) -> TurnRequest {
        self(board)
    }
}

/// Replays a fixed list of requests, then quits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedTurns {
    requests: VecDeque<TurnRequest>,
}

impl ScriptedTurns {
    pub fn new(requests: impl IntoIterator<Item = TurnRequest>) -> Self {
        Self {
            requests: requests.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.requests.len()
    }
}

impl TurnSource for ScriptedTurns {
    fn request_turn(&mut self, _board: &Board) -> TurnRequest {
        self.requests.pop_front().unwrap_or_else(TurnRequest::quit)
    }
}

/// One playable session: builds a board, then alternates between asking for a turn and resolving it.
pub struct Game {
    config: GameConfig,
    generator: Box<dyn LayoutGenerator>,
    board: Option<Board>,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig, generator: impl LayoutGenerator + 'static) -> Self {
        Self {
            config,
            generator: Box::new(generator),
            board: None,
            state: GameState::default(),
        }
    }

    /// Mines placed at random from `seed`; every [`Game::play`] draws a new layout.
    pub fn random(size: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        if mines > mult(size, size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new(
            GameConfig::new_unchecked(size, mines),
            RandomLayoutGenerator::new(seed),
        ))
    }

    /// Mines placed from a row-major list of `size * size` flags, the mine count is how many are set.
    pub fn from_mine_flags(size: Coord, mine_flags: &[bool]) -> Result<Self> {
        Ok(Self::from_layout(MineLayout::from_mine_flags(
            size, mine_flags,
        )?))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        Self::new(layout.game_config(), layout)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The board of the current or last session, `None` before the first [`Game::play`].
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn cell(&self, row: RequestCoord, col: RequestCoord) -> Option<&Cell> {
        self.board.as_ref()?.cell(row, col)
    }

    pub fn unflagged_mine_count_remaining(&self) -> isize {
        match &self.board {
            Some(board) => board.unflagged_mine_count_remaining(),
            None => self.config.mines as isize,
        }
    }

    /// Runs one session to completion.
    ///
    /// Without a turn source the game aborts right after the first board notification. A [`TurnOp::Quit`] request
    /// ends the session as [`GameResult::PlayerQuits`], an [`TurnOp::Unknown`] one as [`GameResult::GameAborted`].
    pub fn play(
        &mut self,
        observer: &mut dyn GameObserver,
        mut turns: Option<&mut dyn TurnSource>,
    ) -> GameResult {
        use GameState::*;

        self.state = Initializing;
        let board = self
            .board
            .insert(Board::from_layout(&self.generator.generate(self.config)));
        self.state = AwaitingTurnRequest;

        loop {
            self.state = match self.state {
                Initializing | AwaitingTurnRequest => {
                    observer.on_board_changed(board);

                    match turns.as_deref_mut() {
                        None => {
                            log::warn!("No turn source, aborting game");
                            Finished(GameResult::GameAborted)
                        }
                        Some(source) => {
                            let request = source.request_turn(board);
                            match request.op {
                                TurnOp::Quit => Finished(GameResult::PlayerQuits),
                                TurnOp::Unknown => Finished(GameResult::GameAborted),
                                TurnOp::Expose | TurnOp::Flag | TurnOp::Unflag => {
                                    ResolvingTurn(request)
                                }
                            }
                        }
                    }
                }
                ResolvingTurn(request) => {
                    let outcome = board.resolve(request);

                    // final reveal gets rendered before the outcome is announced
                    if outcome.result.is_terminal() {
                        observer.on_board_changed(board);
                    }
                    observer.on_turn_completed(&outcome);

                    match outcome.result {
                        TurnResult::PlayerWins => Finished(GameResult::PlayerWins),
                        TurnResult::PlayerLoses => Finished(GameResult::PlayerLoses),
                        _ => AwaitingTurnRequest,
                    }
                }
                Finished(result) => {
                    log::debug!("Game finished: {:?}", result);
                    return result;
                }
            };
        }
    }
}
