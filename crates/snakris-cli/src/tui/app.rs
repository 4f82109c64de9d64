use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for applications driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Use this to configure the tick
    /// interval and render mode.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, mouse, resize, ...), applied
    /// synchronously between ticks.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen. Called on each render event; must only read state.
    fn draw(&self, frame: &mut Frame);

    /// Advances the simulation by one tick.
    fn update(&mut self, tui: &mut Tui);
}
