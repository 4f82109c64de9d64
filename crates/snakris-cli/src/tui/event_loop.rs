use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render at fixed intervals, whether or not anything changed.
    Interval(Duration),
    /// Render after every state change (tick or terminal event).
    #[default]
    OnDirty,
    /// Render after state changes, but never more often than the interval.
    /// Changes arriving faster are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Events delivered to the application loop.
#[derive(Debug, Clone)]
pub(super) enum LoopEvent {
    /// Simulation step timing, based on the tick interval.
    Tick,
    /// Screen render timing, based on the render mode.
    Render,
    /// Terminal event: key input, mouse, resize.
    Input(Event),
}

/// Multiplexes tick, render, and terminal events on a single thread.
///
/// `next()` blocks until whichever deadline comes first, so ticks are fully
/// serialized with input handling and rendering — there is exactly one
/// logical thread of control, and no event type can re-enter another.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        let now = Instant::now();
        let long_ago = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: long_ago,
            last_render: long_ago,
            // The first frame must always be drawn.
            dirty: true,
        }
    }
}

impl EventLoop {
    /// Sets the tick interval. `None` disables tick events entirely.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event, blocking until a tick or render deadline is
    /// reached or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            let render_due = match self.render_mode {
                RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if render_due {
                self.last_render = now;
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            if let Some(timeout) = self.next_deadline_in(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(LoopEvent::Input(event::read()?));
        }
    }

    /// Time until the earliest pending deadline, or `None` when only
    /// terminal events can wake the loop.
    fn next_deadline_in(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let deadline = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}
