use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Clear, Widget},
};
use snakris_engine::{Board, GameSession, SessionState};

use crate::ui::widgets::{Tile, TileKind, style};

/// Renders the whole playfield: settled blocks, the active piece, the
/// red rule marking the live-zone boundary, and — in menu or game-over —
/// a dimmed field with the start/restart button on top.
#[derive(Debug)]
pub struct PlayfieldDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> PlayfieldDisplay<'a> {
    /// Total widget width including the border.
    pub const WIDTH: u16 = Board::WIDTH as u16 * 2 + 2;
    /// Total widget height: the grid, one line for the boundary rule, and
    /// the border.
    pub const HEIGHT: u16 = Board::HEIGHT as u16 + 3;

    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    /// The overlay button's rectangle within the widget's area.
    ///
    /// The mouse handler tests click positions against this same rectangle,
    /// so the hit target always matches what is drawn.
    #[must_use]
    pub fn button_rect(area: Rect) -> Rect {
        let [rect] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas::<1>(area);
        let [rect] = Layout::horizontal([Constraint::Length(13)])
            .flex(Flex::Center)
            .areas::<1>(rect);
        rect
    }

    /// Flattens board, tetramino, and snake into one cell grid. The snake
    /// paints last so its head is never hidden by anything else.
    fn tile_grid(&self) -> [[TileKind; Board::WIDTH]; Board::HEIGHT] {
        let mut grid = [[TileKind::Empty; Board::WIDTH]; Board::HEIGHT];
        for (y, row) in self.session.board().rows().enumerate() {
            for (x, occupied) in row.iter_cells().enumerate() {
                if occupied {
                    grid[y][x] = TileKind::Settled;
                }
            }
        }
        if let Some(tetramino) = self.session.tetramino() {
            for cell in tetramino.cells() {
                grid[cell.y()][cell.x()] = TileKind::Tetramino;
            }
        }
        if let Some(snake) = self.session.snake() {
            for cell in &snake.cells()[1..] {
                grid[cell.y()][cell.x()] = TileKind::SnakeBody;
            }
            let head = snake.head();
            grid[head.y()][head.x()] = TileKind::SnakeHead;
        }
        grid
    }
}

impl Widget for PlayfieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PlayfieldDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay = !self.session.state().is_playing();

        let block = BlockWidget::bordered()
            .title(" snakris ")
            .style(style::DEFAULT);
        let inner = block.inner(area);
        (&block).render(area, buf);

        for (y, row) in self.tile_grid().iter().enumerate() {
            // Rows below the live zone sit one line lower to make room for
            // the boundary rule.
            let line_y = inner.y + y as u16 + u16::from(y >= Board::LIMIT_Y);
            if line_y >= inner.bottom() {
                break;
            }
            for (x, kind) in row.iter().enumerate() {
                let line_x = inner.x + x as u16 * Tile::width();
                if line_x + Tile::width() > inner.right() {
                    break;
                }
                Tile::from_kind(*kind, overlay).render_at(line_x, line_y, buf);
            }
        }

        let rule_y = inner.y + Board::LIMIT_Y as u16;
        if rule_y < inner.bottom() {
            let rule = "─".repeat(inner.width as usize);
            let rule_style = if overlay {
                style::dimmed(style::LIMIT)
            } else {
                style::LIMIT
            };
            buf.set_string(inner.x, rule_y, rule, rule_style);
        }

        if overlay {
            let label = match self.session.state() {
                SessionState::Menu => "▶ PLAY",
                SessionState::GameOver => "↻ RESTART",
                SessionState::Playing => unreachable!(),
            };
            let button = PlayfieldDisplay::button_rect(area);
            Clear.render(button, buf);
            let frame = BlockWidget::bordered().style(style::DEFAULT);
            let label_area = frame.inner(button);
            (&frame).render(button, buf);
            Line::from(label)
                .style(style::DEFAULT)
                .centered()
                .render(label_area, buf);
        }
    }
}
