use ratatui::{buffer::Buffer, style::Style};

use crate::ui::widgets::style;

/// What occupies a cell, from the renderer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Empty,
    SnakeHead,
    SnakeBody,
    Tetramino,
    Settled,
}

/// A single cell rendered as a fixed-size tile (two columns, one row).
#[derive(Debug)]
pub struct Tile {
    style: Style,
    symbol: &'static str,
}

impl Tile {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// Tile width in terminal columns.
    #[must_use]
    pub fn width() -> u16 {
        2
    }

    #[must_use]
    pub fn from_kind(kind: TileKind, dimmed: bool) -> Self {
        let tile = match kind {
            TileKind::Empty => Self::new(style::EMPTY_DOT, " ."),
            TileKind::SnakeHead => Self::new(style::SNAKE_HEAD, "  "),
            TileKind::SnakeBody => Self::new(style::SNAKE_BODY, "  "),
            TileKind::Tetramino => Self::new(style::TETRAMINO, "  "),
            TileKind::Settled => Self::new(style::SETTLED, "  "),
        };
        if dimmed {
            Self::new(style::dimmed(tile.style), tile.symbol)
        } else {
            tile
        }
    }

    pub fn render_at(&self, x: u16, y: u16, buf: &mut Buffer) {
        buf.set_string(x, y, self.symbol, self.style);
    }
}
