//! Fixed timestep simulation tick
//!
//! One call advances the whole world by one frame in a fixed order:
//! input -> level timer -> player -> spawner -> movement -> collisions ->
//! explosion aging -> road scroll. Determinism: same state, same input,
//! same dt, same result.

use super::collision;
use super::entity::Bullet;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{BANNER_MS, TICK_RATE};

/// Input snapshot for a single tick. Direction flags are held keys; `fire`
/// and `restart` are discrete events (true on the tick they happened).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Consumed by the session, not by `tick` (only valid once terminal)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep. A guarded no-op whenever
/// the run is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    let dt_ms = dt * 1000.0;
    state.time_ms += dt_ms;
    if state.banner_ms_left > 0.0 {
        state.banner_ms_left = (state.banner_ms_left - dt_ms).max(0.0);
    }

    // Level timer. The transition tick does nothing else: no spawning, no
    // movement, no collision processing.
    if state.elapsed_level_ms() >= state.config.level_duration_ms {
        if state.level >= state.config.max_level {
            log::info!("survived level {}, run won at score {}", state.level, state.score);
            state.finish(GamePhase::Win);
        } else {
            advance_level(state);
        }
        return;
    }

    if state.player.powered_up && state.time_ms >= state.player.powerup_until_ms {
        state.player.powered_up = false;
    }

    // One bullet per discrete fire event; shooting requires the power-up
    if input.fire && state.player.powered_up {
        state
            .bullets
            .push(Bullet::new(state.player.muzzle(), &state.config));
    }

    state.player.apply_input(input, &state.config, dt);

    spawn::run(state);

    for car in &mut state.cpu_cars {
        car.advance(dt);
    }
    for bullet in &mut state.bullets {
        bullet.advance(dt);
    }
    let now = state.time_ms;
    for meteor in &mut state.meteors {
        meteor.advance(dt);
        meteor.note_road_contact(now, &state.config);
    }
    for pickup in &mut state.power_ups {
        pickup.advance(dt);
    }

    collision::sweep_off_screen(state);
    collision::resolve(state);

    for explosion in &mut state.explosions {
        explosion.age(dt);
    }
    state.explosions.retain(|e| !e.expired());

    let scroll = state.config.road_speed * state.config.world_scale(state.level) * dt * TICK_RATE;
    state.road_offset = (state.road_offset + scroll) % state.config.road_pattern_len;
}

/// Start the next level: fresh timer, empty traffic, rescaled player speed,
/// banner overlay for two seconds.
fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.level_start_ms = state.time_ms;
    state.banner_ms_left = BANNER_MS;
    state.cpu_cars.clear();
    state.player.speed = state.config.player_speed_at(state.level);
    log::info!("level up -> {}", state.level);
    state.push_event(GameEvent::LevelUp { level: state.level });
}
