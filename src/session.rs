//! Session orchestrator
//!
//! Owns the game state and the high-score store. Drives the tick, handles
//! the restart command from a terminal state, and persists the best score
//! exactly when a run ends with an improvement.

use crate::config::{ConfigError, GameConfig};
use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
}

impl<S: HighScoreStore> Session<S> {
    /// Validate the config, load the persisted best once, start a fresh run.
    pub fn new(config: GameConfig, seed: u64, mut store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = store.load();
        log::info!("session started (seed {seed}, high score {high_score})");
        Ok(Self {
            state: GameState::new(config, seed, high_score),
            store,
        })
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance one frame. Returns the events of this tick for the
    /// renderer/audio collaborators; persistence happens here, never inside
    /// the tick itself.
    pub fn advance(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        if input.restart && self.state.phase.is_terminal() {
            self.restart();
            return Vec::new();
        }

        tick(&mut self.state, input, dt);
        let events = self.state.take_events();
        for event in &events {
            if let GameEvent::NewHighScore { score } = event {
                self.store.save(*score);
            }
        }
        events
    }

    /// Discard the run and start over: fresh player, empty collections,
    /// timers at zero, score zeroed, level 1. The loaded high score (and
    /// anything committed since) carries over; the RNG stream is reseeded
    /// so runs differ.
    fn restart(&mut self) {
        let config = self.state.config.clone();
        let seed = self.state.seed.wrapping_add(1);
        let high_score = self.state.high_score;
        log::info!("restarting session (next seed {seed})");
        self.state = GameState::new(config, seed, high_score);
    }
}
