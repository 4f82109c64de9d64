use std::{io, time::Duration};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use ratatui::DefaultTerminal;

use crate::tui::{
    App, RenderMode,
    event_loop::{EventLoop, LoopEvent},
};

/// TUI application runtime.
///
/// Owns the event loop and drives applications implementing [`App`]:
/// tick events call `update`, render events call `draw`, terminal events
/// call `handle_event`. Mouse capture is enabled for the duration of the
/// run so click positions reach the application.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick interval. `None` disables ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application until [`App::should_exit`] returns true.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            execute!(io::stdout(), EnableMouseCapture)?;
            let result = self.drive(terminal, app);
            execute!(io::stdout(), DisableMouseCapture)?;
            result
        })
    }

    fn drive<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                LoopEvent::Tick => app.update(self),
                LoopEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                LoopEvent::Input(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
