use crate::{
    core::{Board, Direction, Snake, Tetramino},
    engine::snake_spawner::{SnakeSpawner, WalkSeed},
};

/// The piece currently under simulation. At most one exists at a time:
/// either the crawling snake or the tetramino it froze into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ActivePiece {
    Snake(Snake),
    Tetramino(Tetramino),
}

/// Outcome of a tetramino settling into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleReport {
    /// Full rows compacted by this settlement.
    pub cleared_rows: usize,
    /// Settled blocks reached the live zone. The field clears its active
    /// piece and leaves the board intact; the session decides whether this
    /// is a game over or a silent menu reset.
    pub overflow: bool,
}

/// Board, active piece, and spawner — the single-turn simulation state.
///
/// The field executes ticks and piece commands but has no notion of menu or
/// game over; that interpretation belongs to
/// [`GameSession`](super::GameSession). Commands addressed to a piece that
/// is not active are no-ops, never failures.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    active: Option<ActivePiece>,
    spawner: SnakeSpawner,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::from_spawner(SnakeSpawner::new())
    }

    /// Like [`Self::new`], but with a deterministic spawner seed.
    #[must_use]
    pub fn with_seed(seed: WalkSeed) -> Self {
        Self::from_spawner(SnakeSpawner::with_seed(seed))
    }

    fn from_spawner(mut spawner: SnakeSpawner) -> Self {
        let active = Some(ActivePiece::Snake(spawner.spawn()));
        Self {
            board: Board::EMPTY,
            active,
            spawner,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn snake(&self) -> Option<&Snake> {
        match &self.active {
            Some(ActivePiece::Snake(snake)) => Some(snake),
            _ => None,
        }
    }

    #[must_use]
    pub fn tetramino(&self) -> Option<&Tetramino> {
        match &self.active {
            Some(ActivePiece::Tetramino(tetramino)) => Some(tetramino),
            _ => None,
        }
    }

    /// Clears the board and spawns a fresh snake, keeping the spawner RNG.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.active = Some(ActivePiece::Snake(self.spawner.spawn()));
    }

    /// Steers the active snake. Returns whether the direction changed;
    /// `false` when no snake is active or the steer was the forbidden
    /// reversal.
    pub fn try_steer(&mut self, direction: Direction) -> bool {
        match &mut self.active {
            Some(ActivePiece::Snake(snake)) => snake.steer(direction),
            _ => false,
        }
    }

    /// Player-issued conversion of the active snake into a tetramino — the
    /// same transition as crawling out of the live zone.
    pub fn convert_snake(&mut self) {
        if let Some(ActivePiece::Snake(snake)) = self.active {
            self.active = Some(ActivePiece::Tetramino(snake.into_tetramino()));
        }
    }

    /// Shifts the active tetramino one column. Returns whether it moved.
    pub fn try_shift(&mut self, direction: Direction) -> bool {
        let Some(ActivePiece::Tetramino(tetramino)) = self.active else {
            return false;
        };
        match tetramino.shifted(direction, &self.board) {
            Some(moved) => {
                self.active = Some(ActivePiece::Tetramino(moved));
                true
            }
            None => false,
        }
    }

    /// One simulation tick: the snake phase first, then the tetramino phase.
    ///
    /// A snake whose head leaves the live zone converts and immediately
    /// falls one row within the same tick; a snake spawned by a settlement
    /// waits for the next tick. Returns the settle report when the
    /// tetramino froze into the board this tick.
    pub fn advance(&mut self) -> Option<SettleReport> {
        if let Some(ActivePiece::Snake(snake)) = self.active {
            self.active = Some(match snake.crawled() {
                Some(moved) => ActivePiece::Snake(moved),
                None => ActivePiece::Tetramino(snake.into_tetramino()),
            });
        }
        if let Some(ActivePiece::Tetramino(tetramino)) = self.active {
            return self.fall_step(tetramino);
        }
        None
    }

    /// Hard drop: the active tetramino falls until it settles, in one call.
    pub fn hard_drop(&mut self) -> Option<SettleReport> {
        let Some(ActivePiece::Tetramino(mut tetramino)) = self.active else {
            return None;
        };
        loop {
            match tetramino.fallen(&self.board) {
                Some(moved) => tetramino = moved,
                None => return Some(self.settle(tetramino)),
            }
        }
    }

    fn fall_step(&mut self, tetramino: Tetramino) -> Option<SettleReport> {
        match tetramino.fallen(&self.board) {
            Some(moved) => {
                self.active = Some(ActivePiece::Tetramino(moved));
                None
            }
            None => Some(self.settle(tetramino)),
        }
    }

    fn settle(&mut self, tetramino: Tetramino) -> SettleReport {
        self.board.fill_cells(tetramino.cells().iter().copied());
        let cleared_rows = self.board.clear_full_rows();
        let overflow = self.board.live_zone_occupied();
        self.active = if overflow {
            None
        } else {
            Some(ActivePiece::Snake(self.spawner.spawn()))
        };
        SettleReport {
            cleared_rows,
            overflow,
        }
    }
}

#[cfg(test)]
impl GameField {
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub(crate) fn set_active(&mut self, active: Option<ActivePiece>) {
        self.active = active;
    }
}
