use std::time::Duration;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Style},
    text::Text,
};
use snakris_engine::{Direction, GameSession, SessionState};

use crate::{
    tui::{App, RenderMode, Tui},
    ui::widgets::PlayfieldDisplay,
};

const RENDER_RATE: f64 = 60.0;

/// The play screen: wires terminal events and ticks into the session and
/// draws it.
#[derive(Debug)]
pub struct GameApp {
    session: GameSession,
    tick_interval: Duration,
    is_exiting: bool,
}

impl GameApp {
    pub fn new(session: GameSession, tick_interval: Duration) -> Self {
        Self {
            session,
            tick_interval,
            is_exiting: false,
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.session.handle_direction(Direction::Up),
            KeyCode::Down => self.session.handle_direction(Direction::Down),
            KeyCode::Left => self.session.handle_direction(Direction::Left),
            KeyCode::Right => self.session.handle_direction(Direction::Right),
            KeyCode::Char(' ') => self.session.handle_primary(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    /// The pointer only ever targets the overlay button. The button's
    /// rectangle is recomputed from the terminal size with the same layout
    /// the renderer uses, so the hit target matches what is on screen.
    fn handle_click(&mut self, mouse: &MouseEvent) {
        if self.session.state().is_playing() {
            return;
        }
        let Ok((width, height)) = crossterm::terminal::size() else {
            return;
        };
        let [playfield_area, _] = layout(Rect::new(0, 0, width, height));
        let button = PlayfieldDisplay::button_rect(playfield_area);
        if button.contains(Position::new(mouse.column, mouse.row)) {
            self.session.handle_primary();
        }
    }
}

fn layout(area: Rect) -> [Rect; 2] {
    let [main_area, help_area] = Layout::vertical([
        Constraint::Length(PlayfieldDisplay::HEIGHT),
        Constraint::Length(1),
    ])
    .areas::<2>(area);
    let [main_area] = Layout::horizontal([Constraint::Length(PlayfieldDisplay::WIDTH)])
        .flex(Flex::Center)
        .areas::<1>(main_area);
    [main_area, help_area]
}

impl App for GameApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.tick_interval));
        tui.set_render_mode(RenderMode::throttled_from_rate(RENDER_RATE));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Event::Mouse(mouse) = &event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            self.handle_click(mouse);
            return;
        }
        if let Some(key) = event.as_key_event() {
            self.handle_key(key.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [playfield_area, help_area] = layout(frame.area());
        frame.render_widget(PlayfieldDisplay::new(&self.session), playfield_area);

        let help_text = match self.session.state() {
            SessionState::Menu => "Space / Click (Play) | Q (Quit)",
            SessionState::Playing => {
                "← → ↑ ↓ (Steer) | ← → (Shift) | ↓ (Drop) | Space (Freeze) | Q (Quit)"
            }
            SessionState::GameOver => "Space / Click (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.tick();
    }
}
