//! Road Rush - a top-down arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `config`: Immutable game tuning, validated at startup
//! - `session`: Orchestrator owning the state and the high-score store
//! - `highscores`: Persisted best-score store
//! - `audio`: Music commands derived from simulation events (no playback here)

pub mod audio;
pub mod config;
pub mod highscores;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::{HighScoreStore, JsonHighScores};
pub use session::Session;

/// Game timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Reference tick rate; entity speeds are tuned in pixels per 60 Hz tick
    pub const TICK_RATE: f32 = 60.0;
    /// How long the "LEVEL UP" banner stays on screen
    pub const BANNER_MS: f32 = 2000.0;
    /// Explosion growth time from min to max radius
    pub const EXPLOSION_MS: f32 = 1000.0;
    /// Explosion starting radius
    pub const EXPLOSION_MIN_RADIUS: f32 = 5.0;
}
