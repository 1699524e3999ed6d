//! Bomb Buster: dodge bouncing bombs, shoot them down for score.
//!
//! Core modules:
//! - `geometry`: integer vectors, rects and viewport bounds checks
//! - `entities`: player, hazards, projectiles, effects and the game state
//! - `compute`: per-frame simulation step and collision sweep
//! - `scene`: what to draw each frame, independent of any renderer
//! - `input`: terminal key events → per-frame input snapshots
//! - `config` / `assets`: tunables and sprite sheet loading

pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod scene;

pub use compute::{init_state, tick, FrameInput};
pub use config::GameConfig;
pub use entities::{GameState, GameStatus};
