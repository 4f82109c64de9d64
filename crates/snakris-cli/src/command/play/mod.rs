use std::time::Duration;

use snakris_engine::{GameSession, WalkSeed};

use crate::{command::play::app::GameApp, tui::Tui};

mod app;

const DEFAULT_TICK_MS: u64 = 700;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Simulation tick period in milliseconds
    #[clap(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Spawner seed as 32 hex characters, for reproducible runs
    #[clap(long)]
    seed: Option<WalkSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { tick_ms, seed } = arg;

    let session = match seed {
        Some(seed) => GameSession::with_seed(*seed),
        None => GameSession::new(),
    };
    let mut app = GameApp::new(session, Duration::from_millis(*tick_ms));

    Tui::new().run(&mut app)
}
