//! Game logic and state management.
//!
//! This module layers the turn machinery on top of the core data types:
//!
//! - [`SnakeSpawner`] - random-walk piece generation inside the live zone
//! - [`GameField`] - board, active piece, and the tick/command surface
//! - [`GameSession`] - menu/playing/game-over orchestration
//! - [`WalkSeed`] - seed for deterministic spawning
//!
//! # Turn Flow
//!
//! 1. A snake spawns in the live zone and crawls once per tick
//! 2. It converts into a tetramino on leaving the zone or on command
//! 3. The tetramino falls, shifts, or hard-drops until it settles
//! 4. Full rows clear; a fresh snake spawns — unless the stack has grown
//!    into the live zone, which the session turns into a game over (or a
//!    silent reset while the menu demo is running)

pub use self::{game_field::*, game_session::*, snake_spawner::*};

mod game_field;
mod game_session;
mod snake_spawner;
