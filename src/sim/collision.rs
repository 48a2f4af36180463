//! Collision and resolution engine
//!
//! Runs once per tick in a fixed order. Every pass snapshots liveness in a
//! mask and compacts afterwards, so removals never skip or double-process
//! entries; each attacker resolves against at most one victim per tick
//! (first match wins).

use glam::Vec2;

use super::entity::Explosion;
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState};

/// Blast radius when a meteor hits the player
const METEOR_PLAYER_BLAST: f32 = 70.0;
/// Blast radius when a bullet shoots down a meteor
const BULLET_METEOR_BLAST: f32 = 60.0;
/// Blast radius of the delayed ground explosion
const GROUND_BLAST: f32 = 80.0;
/// Side length of the ground explosion's area-of-effect box
const GROUND_AOE: f32 = 160.0;

const SCORE_ESCAPED_CAR: u64 = 1;
const SCORE_CAR_SHOT: u64 = 2;
const SCORE_AOE_CAR: u64 = 30;
const SCORE_METEOR_SHOT: u64 = 100;

/// Remove entities that left the screen. Escaped CPU cars are the survival
/// score; everything else leaves silently. Meteors with an armed fuse are
/// exempt: their ground explosion is already scheduled.
pub fn sweep_off_screen(state: &mut GameState) {
    let before = state.cpu_cars.len();
    state.cpu_cars.retain(|car| !car.is_off_screen(&state.config));
    state.score += (before - state.cpu_cars.len()) as u64 * SCORE_ESCAPED_CAR;

    state.bullets.retain(|b| !b.is_off_screen());
    state
        .meteors
        .retain(|m| m.contact_ms.is_some() || !m.is_off_screen(&state.config));
    state.power_ups.retain(|p| !p.is_off_screen(&state.config));
}

/// Run all resolution passes. Stops as soon as a lethal pass ends the run.
pub fn resolve(state: &mut GameState) {
    bullets_vs_cars(state);
    if player_vs_cars(state) {
        return;
    }
    if meteors_vs_player(state) {
        return;
    }
    bullets_vs_meteors(state);
    if ground_fuses(state) {
        return;
    }
    powerups_vs_player(state);
}

/// Compact a vec against a liveness mask built during iteration
fn compact<T>(items: &mut Vec<T>, alive: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = alive[i];
        i += 1;
        keep
    });
}

fn bullets_vs_cars(state: &mut GameState) {
    if state.bullets.is_empty() || state.cpu_cars.is_empty() {
        return;
    }
    let mut bullet_alive = vec![true; state.bullets.len()];
    let mut car_alive = vec![true; state.cpu_cars.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bounds = bullet.bounds();
        for (ci, car) in state.cpu_cars.iter().enumerate() {
            if !car_alive[ci] {
                continue;
            }
            if bounds.intersects(&car.bounds()) {
                bullet_alive[bi] = false;
                car_alive[ci] = false;
                state
                    .explosions
                    .push(Explosion::fiery(car.bounds().center(), car.size.x.max(car.size.y)));
                state.score += SCORE_CAR_SHOT;
                break;
            }
        }
    }

    compact(&mut state.bullets, &bullet_alive);
    compact(&mut state.cpu_cars, &car_alive);
}

fn player_vs_cars(state: &mut GameState) -> bool {
    let player_bounds = state.player.bounds();
    let hit = state
        .cpu_cars
        .iter()
        .find(|car| player_bounds.intersects(&car.bounds()))
        .map(|car| car.size.x.max(car.size.y));

    if let Some(size) = hit {
        state
            .explosions
            .push(Explosion::fiery(player_bounds.center(), size));
        state.finish(GamePhase::GameOver);
        true
    } else {
        false
    }
}

fn meteors_vs_player(state: &mut GameState) -> bool {
    let player_bounds = state.player.bounds();
    let hit = state
        .meteors
        .iter()
        .find(|m| m.bounds().intersects(&player_bounds))
        .map(|m| m.pos);

    if let Some(pos) = hit {
        state
            .explosions
            .push(Explosion::shock(pos, METEOR_PLAYER_BLAST));
        state.finish(GamePhase::GameOver);
        true
    } else {
        false
    }
}

fn bullets_vs_meteors(state: &mut GameState) {
    if state.bullets.is_empty() || state.meteors.is_empty() {
        return;
    }
    let mut bullet_alive = vec![true; state.bullets.len()];
    let mut meteor_alive = vec![true; state.meteors.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bounds = bullet.bounds();
        for (mi, meteor) in state.meteors.iter().enumerate() {
            if !meteor_alive[mi] {
                continue;
            }
            if bounds.intersects(&meteor.bounds()) {
                bullet_alive[bi] = false;
                meteor_alive[mi] = false;
                state
                    .explosions
                    .push(Explosion::shock(meteor.pos, BULLET_METEOR_BLAST));
                state.score += SCORE_METEOR_SHOT;
                break;
            }
        }
    }

    compact(&mut state.bullets, &bullet_alive);
    compact(&mut state.meteors, &meteor_alive);
}

/// Fire ground explosions for meteors whose road-contact fuse has run out,
/// then apply the area-of-effect: intersecting CPU cars die for score, an
/// intersecting player ends the run.
fn ground_fuses(state: &mut GameState) -> bool {
    let now = state.time_ms;
    let mut meteor_alive = vec![true; state.meteors.len()];
    let mut blasts: Vec<Vec2> = Vec::new();

    for (mi, meteor) in state.meteors.iter_mut().enumerate() {
        if meteor.fuse_elapsed(now) {
            meteor.exploded = true;
            meteor_alive[mi] = false;
            blasts.push(meteor.pos);
        }
    }
    compact(&mut state.meteors, &meteor_alive);

    let mut lethal = false;
    for pos in blasts {
        log::debug!("ground explosion at ({:.0}, {:.0})", pos.x, pos.y);
        state.explosions.push(Explosion::shock(pos, GROUND_BLAST));

        let aoe = Rect::from_center(pos, GROUND_AOE, GROUND_AOE);
        let mut car_alive = vec![true; state.cpu_cars.len()];
        for (ci, car) in state.cpu_cars.iter().enumerate() {
            if aoe.intersects(&car.bounds()) {
                car_alive[ci] = false;
                state.score += SCORE_AOE_CAR;
            }
        }
        compact(&mut state.cpu_cars, &car_alive);

        if aoe.intersects(&state.player.bounds()) {
            lethal = true;
        }
    }

    if lethal {
        state.finish(GamePhase::GameOver);
    }
    lethal
}

fn powerups_vs_player(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let collected = state
        .power_ups
        .iter()
        .position(|p| p.bounds().intersects(&player_bounds));

    if let Some(index) = collected {
        state.power_ups.remove(index);
        state.player.powered_up = true;
        state.player.powerup_until_ms = state.time_ms + state.config.powerup_duration_ms;
        state.push_event(GameEvent::PowerUpCollected);
        log::debug!("power-up collected, armed until {:.0}ms", state.player.powerup_until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entity::{Bullet, CpuCar, ExplosionKind, Meteor, PowerUp};

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 5, 0)
    }

    fn car_at(state: &mut GameState, x: f32, y: f32) {
        let mut car = CpuCar::spawn(&mut state.rng, &state.config, 3.0);
        car.pos = Vec2::new(x, y);
        state.cpu_cars.push(car);
    }

    fn meteor_at(state: &mut GameState, x: f32, y: f32) -> usize {
        let mut meteor = Meteor::spawn(&mut state.rng, &state.config);
        meteor.pos = Vec2::new(x, y);
        meteor.contact_ms = None;
        state.meteors.push(meteor);
        state.meteors.len() - 1
    }

    #[test]
    fn bullet_destroys_one_car_for_two_points() {
        let mut state = state();
        car_at(&mut state, 300.0, 200.0);
        state
            .bullets
            .push(Bullet::new(Vec2::new(310.0, 220.0), &state.config));

        resolve(&mut state);

        assert!(state.bullets.is_empty());
        assert!(state.cpu_cars.is_empty());
        assert_eq!(state.score, 2);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Fiery);
        assert_eq!(state.explosions[0].max_radius, 60.0); // max(car w, car h)
    }

    #[test]
    fn one_bullet_kills_at_most_one_car() {
        let mut state = state();
        // Two overlapping cars under one bullet
        car_at(&mut state, 300.0, 200.0);
        car_at(&mut state, 305.0, 205.0);
        state
            .bullets
            .push(Bullet::new(Vec2::new(310.0, 220.0), &state.config));

        resolve(&mut state);

        assert_eq!(state.cpu_cars.len(), 1);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn player_collision_ends_the_run() {
        let mut state = state();
        let p = state.player.pos;
        car_at(&mut state, p.x + 10.0, p.y + 10.0);

        resolve(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Fiery);
    }

    #[test]
    fn meteor_hit_on_player_is_instant_kill() {
        let mut state = state();
        let center = state.player.bounds().center();
        meteor_at(&mut state, center.x, center.y);

        resolve(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.explosions[0].kind, ExplosionKind::Shock);
        assert_eq!(state.explosions[0].max_radius, METEOR_PLAYER_BLAST);
    }

    #[test]
    fn bullet_downs_meteor_for_hundred_points() {
        let mut state = state();
        meteor_at(&mut state, 400.0, 200.0);
        state
            .bullets
            .push(Bullet::new(Vec2::new(405.0, 210.0), &state.config));

        resolve(&mut state);

        assert!(state.bullets.is_empty());
        assert!(state.meteors.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.explosions[0].max_radius, BULLET_METEOR_BLAST);
    }

    #[test]
    fn ground_fuse_blast_clears_nearby_cars() {
        let mut state = state();
        state.time_ms = 10_000.0;
        let mi = meteor_at(&mut state, 400.0, 520.0);
        state.meteors[mi].contact_ms = Some(8_000.0);
        state.meteors[mi].fuse_ms = 1_500.0; // elapsed at t=9500 < 10000
        // One car inside the 160x160 box, one outside
        car_at(&mut state, 420.0, 480.0);
        car_at(&mut state, 300.0, 100.0);
        // Player far away
        state.player.pos = Vec2::new(260.0, 100.0);

        resolve(&mut state);

        assert!(state.meteors.is_empty());
        assert_eq!(state.cpu_cars.len(), 1);
        assert_eq!(state.score, 30);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].max_radius, GROUND_BLAST);
    }

    #[test]
    fn ground_fuse_blast_kills_player_in_box() {
        let mut state = state();
        state.time_ms = 10_000.0;
        let px = state.player.bounds().center();
        // Close enough for the blast box, no direct contact
        let mi = meteor_at(&mut state, px.x + 60.0, px.y - 60.0);
        state.meteors[mi].contact_ms = Some(7_000.0);
        state.meteors[mi].fuse_ms = 1_000.0;

        resolve(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn unarmed_fuse_does_not_fire() {
        let mut state = state();
        state.time_ms = 10_000.0;
        let mi = meteor_at(&mut state, 300.0, 520.0);
        state.meteors[mi].contact_ms = Some(9_500.0);
        state.meteors[mi].fuse_ms = 1_000.0;

        resolve(&mut state);

        assert_eq!(state.meteors.len(), 1);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn powerup_pickup_arms_the_player() {
        let mut state = state();
        state.time_ms = 3_000.0;
        let center = state.player.bounds().center();
        let mut pickup = PowerUp::spawn(&mut state.rng, &state.config);
        pickup.pos = center;
        state.power_ups.push(pickup);

        resolve(&mut state);

        assert!(state.power_ups.is_empty());
        assert!(state.player.powered_up);
        assert_eq!(
            state.player.powerup_until_ms,
            3_000.0 + state.config.powerup_duration_ms
        );
        assert_eq!(state.take_events(), vec![GameEvent::PowerUpCollected]);
    }

    #[test]
    fn escaped_car_scores_one() {
        let mut state = state();
        car_at(&mut state, 300.0, 601.0);
        sweep_off_screen(&mut state);
        assert!(state.cpu_cars.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn armed_meteor_survives_off_screen_sweep() {
        let mut state = state();
        let mi = meteor_at(&mut state, 400.0, 700.0);
        state.meteors[mi].contact_ms = Some(100.0);
        sweep_off_screen(&mut state);
        assert_eq!(state.meteors.len(), 1);

        state.meteors[0].contact_ms = None;
        sweep_off_screen(&mut state);
        assert!(state.meteors.is_empty());
    }

    #[test]
    fn determinism_check() {
        // Same seed, same setup, same outcome
        let build = || {
            let mut s = GameState::new(GameConfig::default(), 777, 0);
            for _ in 0..5 {
                let speed = 3.0;
                let car = CpuCar::spawn(&mut s.rng, &s.config, speed);
                s.cpu_cars.push(car);
            }
            s
        };
        let a = build();
        let b = build();
        for (x, y) in a.cpu_cars.iter().zip(&b.cpu_cars) {
            assert_eq!(x.pos, y.pos);
        }
    }
}
