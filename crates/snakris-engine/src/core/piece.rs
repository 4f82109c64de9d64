use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::board::{Board, HEIGHT, LIMIT_Y, WIDTH};

/// Number of cells in every snake and tetramino.
pub const PIECE_LEN: usize = 4;

/// One of the four cardinal travel directions. No diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in a fixed order, used by deterministic fallbacks.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.random_range(0..4) {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }
}

/// Position of a single cell on the board.
///
/// Coordinates are stored as `u8` for compactness and are always inside
/// `[0, WIDTH) × [0, HEIGHT)`; movement off the board is expressed as
/// `None` from [`Self::stepped`], never as an out-of-range position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    x: u8,
    y: u8,
}

impl CellPos {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!((x as usize) < WIDTH);
        assert!((y as usize) < HEIGHT);
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Returns the neighboring cell in the given direction, or `None` when
    /// the step would leave the board.
    #[must_use]
    pub const fn stepped(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => {
                if self.y == 0 {
                    None
                } else {
                    Some(Self::new(self.x, self.y - 1))
                }
            }
            Direction::Right => {
                if self.x as usize >= WIDTH - 1 {
                    None
                } else {
                    Some(Self::new(self.x + 1, self.y))
                }
            }
            Direction::Down => {
                if self.y as usize >= HEIGHT - 1 {
                    None
                } else {
                    Some(Self::new(self.x, self.y + 1))
                }
            }
            Direction::Left => {
                if self.x == 0 {
                    None
                } else {
                    Some(Self::new(self.x - 1, self.y))
                }
            }
        }
    }

    /// Checks if the cell lies inside the live zone (rows `0..LIMIT_Y`).
    #[must_use]
    pub const fn in_live_zone(self) -> bool {
        (self.y as usize) < LIMIT_Y
    }
}

/// The player-steered crawling piece.
///
/// Cells are ordered head first; consecutive cells are orthogonal
/// neighbors and no cell repeats. The snake lives inside the live zone and
/// retires into a [`Tetramino`] the moment its head would leave it.
///
/// Snakes are immutable apart from [`Self::steer`]; movement returns a new
/// `Snake` so a rejected move never leaves a half-updated shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snake {
    cells: [CellPos; PIECE_LEN],
    direction: Direction,
}

impl Snake {
    /// Builds a snake from explicit cells (head first) and a travel
    /// direction. Callers are responsible for the connectivity invariant.
    #[must_use]
    pub fn new(cells: [CellPos; PIECE_LEN], direction: Direction) -> Self {
        debug_assert!(cells.windows(2).all(|pair| {
            Direction::ALL
                .into_iter()
                .any(|dir| pair[0].stepped(dir) == Some(pair[1]))
        }));
        debug_assert!((1..cells.len()).all(|i| !cells[..i].contains(&cells[i])));
        Self { cells, direction }
    }

    #[must_use]
    pub fn cells(&self) -> &[CellPos; PIECE_LEN] {
        &self.cells
    }

    #[must_use]
    pub fn head(&self) -> CellPos {
        self.cells[0]
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes the travel direction.
    ///
    /// The only rejected direction is the one pointing straight back at the
    /// second segment; everything else, including the current direction, is
    /// accepted. Returns whether the direction changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.head().stepped(direction) == Some(self.cells[1]) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// One crawl step along the current direction.
    ///
    /// Returns `None` when the head would leave the live zone — the caller
    /// converts the snake into a tetramino at its current cells. Otherwise
    /// each trailing segment takes the position of the segment ahead of it
    /// and the head advances one cell. The body is not checked against the
    /// head's new position: steering already forbids the one reversal that
    /// could cause an overlap.
    #[must_use]
    pub fn crawled(&self) -> Option<Self> {
        let head = self.head().stepped(self.direction)?;
        if !head.in_live_zone() {
            return None;
        }
        let mut cells = self.cells;
        cells.copy_within(0..PIECE_LEN - 1, 1);
        cells[0] = head;
        Some(Self {
            cells,
            direction: self.direction,
        })
    }

    /// Freezes the snake's shape in place. Cell positions carry over
    /// unchanged; the travel direction is discarded.
    #[must_use]
    pub fn into_tetramino(self) -> Tetramino {
        Tetramino { cells: self.cells }
    }
}

/// A frozen snake shape falling through the full grid height.
///
/// The cells have no ordering or direction; the shape is whatever the walk
/// produced and never rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetramino {
    cells: [CellPos; PIECE_LEN],
}

impl Tetramino {
    /// Builds a tetramino from explicit cells.
    #[must_use]
    pub fn new(cells: [CellPos; PIECE_LEN]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[CellPos; PIECE_LEN] {
        &self.cells
    }

    /// Horizontal translation by one column.
    ///
    /// All-or-nothing: succeeds only if every cell's target column is on
    /// the board and unoccupied, checked before any cell moves. Returns the
    /// translated shape, or `None` when any cell is blocked.
    #[must_use]
    pub fn shifted(&self, direction: Direction, board: &Board) -> Option<Self> {
        debug_assert!(matches!(direction, Direction::Left | Direction::Right));
        let mut cells = self.cells;
        for cell in &mut cells {
            let moved = cell.stepped(direction)?;
            if board.is_occupied(moved) {
                return None;
            }
            *cell = moved;
        }
        Some(Self { cells })
    }

    /// One gravity step.
    ///
    /// Returns `None` when any cell rests on the floor or on a settled
    /// block — the whole shape settles at its current cells, before any
    /// movement. Otherwise every cell moves down one row.
    #[must_use]
    pub fn fallen(&self, board: &Board) -> Option<Self> {
        let mut cells = self.cells;
        for cell in &mut cells {
            let below = cell.stepped(Direction::Down)?;
            if board.is_occupied(below) {
                return None;
            }
            *cell = below;
        }
        Some(Self { cells })
    }
}
