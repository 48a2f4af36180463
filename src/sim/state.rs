//! Game state and session lifecycle types
//!
//! One `GameState` per run, exclusively owned and mutated by the tick loop.
//! The renderer reads it as an immutable snapshot between ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Bullet, CpuCar, Explosion, Meteor, Player, PowerUp};
use crate::config::GameConfig;

/// Current phase of a run. `update` is a guarded no-op outside `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (the level-up banner is a flag, not a phase)
    Running,
    /// Run ended by a lethal collision. Terminal.
    GameOver,
    /// Run survived through the final level. Terminal.
    Win,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Something the outside world may want to react to. Drained once per tick
/// by the session; the audio collaborator keys off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new level started
    LevelUp { level: u32 },
    /// Run ended by collision
    GameOver,
    /// Run ended by surviving the final level
    Win,
    /// Score beat the persisted best at a terminal transition
    NewHighScore { score: u64 },
    /// Player picked up the shooting power-up
    PowerUpCollected,
}

/// Complete per-run simulation state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub seed: u64,
    pub rng: Pcg32,

    pub phase: GamePhase,
    /// Current level, 1-based
    pub level: u32,
    pub score: u64,
    /// Best score seen this process lifetime (seeded from the store)
    pub high_score: u64,

    /// Simulated time since session start
    pub time_ms: f32,
    /// Simulated time at which the current level began
    pub level_start_ms: f32,
    /// Remaining display time of the "LEVEL UP" banner (0 = hidden)
    pub banner_ms_left: f32,
    /// Road stripe scroll offset, wraps modulo the pattern length
    pub road_offset: f32,

    pub player: Player,
    pub cpu_cars: Vec<CpuCar>,
    pub bullets: Vec<Bullet>,
    pub meteors: Vec<Meteor>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,

    pub last_cpu_spawn_ms: f32,
    pub last_meteor_spawn_ms: f32,
    pub last_powerup_spawn_ms: f32,

    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state at level 1, score 0, timers at zero. `high_score` comes
    /// from the persisted store, loaded once by the session.
    pub fn new(config: GameConfig, seed: u64, high_score: u64) -> Self {
        let player = Player::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            level: 1,
            score: 0,
            high_score,
            time_ms: 0.0,
            level_start_ms: 0.0,
            banner_ms_left: 0.0,
            road_offset: 0.0,
            player,
            cpu_cars: Vec::new(),
            bullets: Vec::new(),
            meteors: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            last_cpu_spawn_ms: 0.0,
            last_meteor_spawn_ms: 0.0,
            last_powerup_spawn_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Elapsed simulated time within the current level
    pub fn elapsed_level_ms(&self) -> f32 {
        self.time_ms - self.level_start_ms
    }

    /// End the run. Commits the high score exactly when the final score
    /// strictly beats the loaded one, emitting `NewHighScore` for the
    /// session to persist. Idempotent from the caller's view: the phase
    /// guard in `tick` prevents a second call.
    pub fn finish(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.push_event(match phase {
            GamePhase::GameOver => GameEvent::GameOver,
            _ => GameEvent::Win,
        });
        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("new high score: {}", self.score);
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
