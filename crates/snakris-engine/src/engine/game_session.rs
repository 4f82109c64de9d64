use crate::{
    core::{Board, Direction, Snake, Tetramino},
    engine::{GameField, WalkSeed},
};

/// Top-level session posture.
///
/// `Menu` and `GameOver` accept only the start trigger; `Playing` routes
/// piece commands. The field keeps simulating while the menu is shown — the
/// unattended snake crawls, converts, and settles behind the overlay as a
/// little demo, exactly like play but without input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Menu,
    Playing,
    GameOver,
}

/// The whole game: field plus the menu/playing/game-over state machine.
///
/// All mutation goes through the tick and the input handlers; rendering
/// only reads the accessors, at whatever rate it likes, including when no
/// piece is active.
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_field(GameField::new())
    }

    /// Like [`Self::new`], but with a deterministic spawner seed.
    #[must_use]
    pub fn with_seed(seed: WalkSeed) -> Self {
        Self::from_field(GameField::with_seed(seed))
    }

    fn from_field(field: GameField) -> Self {
        Self {
            field,
            state: SessionState::Menu,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn snake(&self) -> Option<&Snake> {
        self.field.snake()
    }

    #[must_use]
    pub fn tetramino(&self) -> Option<&Tetramino> {
        self.field.tetramino()
    }

    /// One simulation tick.
    ///
    /// Runs in `Menu` too, to keep the demo alive. In `GameOver` there is
    /// no active piece, so the tick is a no-op rather than an error.
    pub fn tick(&mut self) {
        if let Some(report) = self.field.advance()
            && report.overflow
        {
            self.apply_overflow();
        }
    }

    /// The start/restart trigger. Resets the field and enters `Playing`
    /// from `Menu` or `GameOver`; ignored while already playing.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Menu | SessionState::GameOver => {
                self.field.reset();
                self.state = SessionState::Playing;
            }
            SessionState::Playing => {}
        }
    }

    /// A directional command, routed to whichever piece is active: all four
    /// directions steer the snake; Left/Right shift the tetramino and Down
    /// hard-drops it (Up does nothing to a tetramino). Ignored outside
    /// `Playing`.
    pub fn handle_direction(&mut self, direction: Direction) {
        if !self.state.is_playing() {
            return;
        }
        if self.field.snake().is_some() {
            self.field.try_steer(direction);
            return;
        }
        match direction {
            Direction::Left | Direction::Right => {
                self.field.try_shift(direction);
            }
            Direction::Down => {
                if let Some(report) = self.field.hard_drop()
                    && report.overflow
                {
                    self.apply_overflow();
                }
            }
            Direction::Up => {}
        }
    }

    /// The convert/start command. While playing it freezes the active snake
    /// into a tetramino (nothing if the tetramino is already falling);
    /// otherwise it starts or restarts the game.
    pub fn handle_primary(&mut self) {
        match self.state {
            SessionState::Playing => self.field.convert_snake(),
            SessionState::Menu | SessionState::GameOver => self.start(),
        }
    }

    fn apply_overflow(&mut self) {
        match self.state {
            // The demo piles blocks into the live zone eventually; quietly
            // start the demo over rather than surfacing a game over.
            SessionState::Menu => self.field.reset(),
            SessionState::Playing => self.state = SessionState::GameOver,
            SessionState::GameOver => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{CellPos, HEIGHT},
        engine::ActivePiece,
    };

    fn session() -> GameSession {
        GameSession::with_seed("00000000000000000000000000000001".parse().unwrap())
    }

    /// Puts the field one settle away from overflowing the live zone: a
    /// tall stack under the tetramino so it settles with a cell in row 3.
    fn arm_overflow(session: &mut GameSession) {
        let mut board = Board::EMPTY;
        board.fill_cells((6..HEIGHT).map(|y| CellPos::new(4, y as u8)));
        session.field.set_board(board);
        session.field.set_active(Some(ActivePiece::Tetramino(
            Tetramino::new([
                CellPos::new(4, 2),
                CellPos::new(4, 3),
                CellPos::new(4, 4),
                CellPos::new(4, 5),
            ]),
        )));
    }

    #[test]
    fn test_new_session_is_in_menu_with_demo_running() {
        let session = session();
        assert!(session.state().is_menu());
        assert!(session.snake().is_some());
    }

    #[test]
    fn test_start_enters_playing_with_fresh_field() {
        let mut session = session();
        session.start();
        assert!(session.state().is_playing());
        assert_eq!(session.board(), &Board::EMPTY);
        assert!(session.snake().is_some());
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut session = session();
        session.start();
        let snake = *session.snake().unwrap();
        session.start();
        assert_eq!(session.snake(), Some(&snake));
    }

    #[test]
    fn test_overflow_while_playing_is_game_over() {
        let mut session = session();
        session.start();
        arm_overflow(&mut session);

        session.tick();

        assert!(session.state().is_game_over());
        assert!(session.snake().is_none());
        assert!(session.tetramino().is_none());
        // The final board stays visible behind the overlay.
        assert!(session.board().live_zone_occupied());
    }

    #[test]
    fn test_overflow_in_menu_resets_silently() {
        let mut session = session();
        arm_overflow(&mut session);

        session.tick();

        assert!(session.state().is_menu());
        assert_eq!(session.board(), &Board::EMPTY);
        assert!(session.snake().is_some());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = session();
        session.start();
        arm_overflow(&mut session);
        session.tick();
        assert!(session.state().is_game_over());

        session.handle_primary();

        assert!(session.state().is_playing());
        assert_eq!(session.board(), &Board::EMPTY);
        assert!(session.snake().is_some());
    }

    #[test]
    fn test_ticks_in_game_over_are_noops() {
        let mut session = session();
        session.start();
        arm_overflow(&mut session);
        session.tick();

        let board = session.board().clone();
        session.tick();
        session.tick();
        assert!(session.state().is_game_over());
        assert_eq!(session.board(), &board);
    }

    #[test]
    fn test_directions_ignored_outside_playing() {
        let mut session = session();
        let snake = *session.snake().unwrap();

        session.handle_direction(Direction::Up);
        session.handle_direction(Direction::Left);

        // The menu demo snake is not steerable.
        assert_eq!(session.snake(), Some(&snake));
    }

    #[test]
    fn test_primary_converts_snake_while_playing() {
        let mut session = session();
        session.start();
        let cells = *session.snake().unwrap().cells();

        session.handle_primary();

        assert!(session.snake().is_none());
        assert_eq!(session.tetramino().unwrap().cells(), &cells);

        // A second primary while the tetramino falls does nothing.
        session.handle_primary();
        assert_eq!(session.tetramino().unwrap().cells(), &cells);
    }

    #[test]
    fn test_direction_routing_per_active_piece() {
        let mut session = session();
        session.start();

        // Snake active: directions steer. Pick one that does not point at
        // the second segment, so the steer is guaranteed to be accepted.
        let snake = session.snake().unwrap();
        let (head, second) = (snake.head(), snake.cells()[1]);
        let allowed = Direction::ALL
            .into_iter()
            .find(|&dir| head.stepped(dir) != Some(second))
            .unwrap();
        session.handle_direction(allowed);
        assert_eq!(session.snake().unwrap().direction(), allowed);

        // Tetramino active: Down hard-drops to settlement.
        session.handle_primary();
        session.handle_direction(Direction::Down);
        assert!(session.tetramino().is_none());
        assert!(session.snake().is_some(), "settling spawns the next snake");
    }

    #[test]
    fn test_hard_drop_overflow_ends_game() {
        let mut session = session();
        session.start();
        arm_overflow(&mut session);

        session.handle_direction(Direction::Down);

        assert!(session.state().is_game_over());
        assert!(session.tetramino().is_none());
    }

    #[test]
    fn test_menu_demo_advances_on_ticks() {
        let mut session = session();
        let before = session.snake().map(|s| *s.cells());

        session.tick();

        let after = session.snake().map(|s| *s.cells());
        // Either the snake crawled or it converted; both count as progress.
        assert!(session.snake().is_some() || session.tetramino().is_some());
        if let (Some(before), Some(after)) = (before, after) {
            assert_ne!(before, after);
        }
    }
}
