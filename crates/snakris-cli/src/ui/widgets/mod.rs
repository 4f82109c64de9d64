pub use self::{playfield::*, tile::*};

mod playfield;
mod tile;

mod color {
    use ratatui::style::Color;

    // Game palette: two greens for the snake, yellow for the falling
    // shape, blue for the settled stack, a red limit line.
    pub const SNAKE_HEAD: Color = Color::Rgb(15, 120, 4);
    pub const SNAKE_BODY: Color = Color::Rgb(20, 204, 0);
    pub const TETRAMINO: Color = Color::Rgb(255, 255, 5);
    pub const SETTLED: Color = Color::Rgb(27, 23, 255);
    pub const LIMIT: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const SNAKE_HEAD: Style = bg_only(color::SNAKE_HEAD);
    pub const SNAKE_BODY: Style = bg_only(color::SNAKE_BODY);
    pub const TETRAMINO: Style = bg_only(color::TETRAMINO);
    pub const SETTLED: Style = bg_only(color::SETTLED);
    pub const LIMIT: Style = fg_bg(color::LIMIT, color::BLACK);

    /// While an overlay is shown the playfield renders at a third of its
    /// brightness.
    #[must_use]
    pub fn dimmed(style: Style) -> Style {
        Style {
            fg: style.fg.map(dim),
            bg: style.bg.map(dim),
            ..style
        }
    }

    fn dim(color: Color) -> Color {
        match color {
            Color::Rgb(r, g, b) => Color::Rgb(r / 3, g / 3, b / 3),
            other => other,
        }
    }
}
