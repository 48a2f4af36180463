//! Spawner and difficulty policy
//!
//! Time-gated creation of CPU cars, meteors and power-ups. Gates compare
//! "time since last spawn >= interval" so a late tick never produces more
//! than one spawn per check.

use super::entity::{CpuCar, Meteor, PowerUp};
use super::state::GameState;
use crate::config::GameConfig;

/// CPU car speed at spawn time: the level multiplier compounds with a
/// ratchet that adds 0.5 every difficulty step within the level.
pub fn cpu_speed(config: &GameConfig, level: u32, elapsed_level_ms: f32) -> f32 {
    let ratchet = (elapsed_level_ms / config.difficulty_step_ms).floor() * 0.5;
    config.base_cpu_speed * config.world_scale(level) + ratchet
}

/// Run all spawn gates for this tick, then enforce the unlock-level
/// invariants.
pub fn run(state: &mut GameState) {
    let now = state.time_ms;

    if now - state.last_cpu_spawn_ms >= state.config.cpu_spawn_interval_ms {
        let speed = cpu_speed(&state.config, state.level, state.elapsed_level_ms());
        state
            .cpu_cars
            .push(CpuCar::spawn(&mut state.rng, &state.config, speed));
        state.last_cpu_spawn_ms = now;
        log::debug!("spawned cpu car at speed {speed:.2} (level {})", state.level);
    }

    if state.level >= state.config.meteor_unlock_level
        && now - state.last_meteor_spawn_ms >= state.config.meteor_spawn_interval_ms
    {
        state
            .meteors
            .push(Meteor::spawn(&mut state.rng, &state.config));
        state.last_meteor_spawn_ms = now;
    }

    // At most one power-up in play: the gate stays closed while the player
    // holds the ability or a pickup is still falling.
    if state.level >= state.config.powerup_unlock_level
        && !state.player.powered_up
        && state.power_ups.is_empty()
        && now - state.last_powerup_spawn_ms >= state.config.powerup_spawn_interval_ms
    {
        state
            .power_ups
            .push(PowerUp::spawn(&mut state.rng, &state.config));
        state.last_powerup_spawn_ms = now;
    }

    // Below the unlock level nothing power-up-related may exist, not even
    // leftovers carried across a level reset.
    if state.level < state.config.powerup_unlock_level {
        state.bullets.clear();
        state.power_ups.clear();
        state.player.powered_up = false;
    }
}
