//! Entity models
//!
//! Self-contained movement and lifecycle logic for everything that lives on
//! the road. Entities know how to advance themselves, report their bounding
//! rectangle, and say when they have left the screen; everything else
//! (spawning, collisions, scoring) is decided by the engine.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::tick::TickInput;
use crate::config::GameConfig;
use crate::consts::{EXPLOSION_MIN_RADIUS, EXPLOSION_MS, TICK_RATE};

/// The player's car. One instance per session, constrained to the road.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Shooting ability granted by a power-up pickup
    pub powered_up: bool,
    /// Simulated time at which the power-up wears off
    pub powerup_until_ms: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.window_width - config.car_width) / 2.0,
                config.window_height - config.car_height - 20.0,
            ),
            size: Vec2::new(config.car_width, config.car_height),
            speed: config.player_speed,
            powered_up: false,
            powerup_until_ms: 0.0,
        }
    }

    /// Apply held movement keys. Each axis is checked independently and
    /// clamped to the road/screen; diagonal movement runs at full axial
    /// speed on both axes (inherited quirk, kept on purpose).
    pub fn apply_input(&mut self, input: &TickInput, config: &GameConfig, dt: f32) {
        let step = self.speed * dt * TICK_RATE;

        if input.up {
            self.pos.y = (self.pos.y - step).max(0.0);
        }
        if input.down {
            self.pos.y = (self.pos.y + step).min(config.window_height - self.size.y);
        }
        if input.left {
            self.pos.x = (self.pos.x - step).max(config.road_left());
        }
        if input.right {
            self.pos.x = (self.pos.x + step).min(config.road_right() - self.size.x);
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Muzzle position for newly fired bullets (top-center of the car)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

/// An oncoming CPU-controlled car. Speed is fixed at spawn time from the
/// current difficulty and never changes afterwards.
#[derive(Debug, Clone)]
pub struct CpuCar {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl CpuCar {
    pub fn spawn(rng: &mut Pcg32, config: &GameConfig, speed: f32) -> Self {
        let size = Vec2::new(config.car_width, config.car_height);
        let x = rng.random_range(config.road_left()..config.road_right() - size.x);
        Self {
            pos: Vec2::new(x, -size.y),
            size,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt * TICK_RATE;
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.pos.y > config.window_height
    }
}

/// A bullet fired by the player while powered up. Travels straight up.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            radius: config.bullet_radius,
            speed: config.bullet_speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y -= self.speed * dt * TICK_RATE;
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y < -self.radius
    }
}

/// A meteor falling diagonally across the road (level 5+). Once it reaches
/// the lower road band it arms a fuse; the engine fires the delayed ground
/// explosion when the fuse runs out.
#[derive(Debug, Clone)]
pub struct Meteor {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal drift, signed, fixed per instance at spawn
    pub drift: f32,
    pub fall_speed: f32,
    /// Simulated time when the meteor first touched the road band
    pub contact_ms: Option<f32>,
    /// Delay between road contact and the ground explosion
    pub fuse_ms: f32,
    /// The ground explosion fires at most once
    pub exploded: bool,
}

impl Meteor {
    pub fn spawn(rng: &mut Pcg32, config: &GameConfig) -> Self {
        let radius = config.meteor_radius;
        let from_left = rng.random_bool(0.5);
        let drift_mag = rng.random_range(config.meteor_drift_min..=config.meteor_drift_max);
        let (x, drift) = if from_left {
            (config.road_left() - radius, drift_mag)
        } else {
            (config.road_right() + radius, -drift_mag)
        };
        Self {
            pos: Vec2::new(x, -radius),
            radius,
            drift,
            fall_speed: rng.random_range(config.meteor_min_speed..=config.meteor_max_speed),
            contact_ms: None,
            fuse_ms: rng.random_range(config.meteor_fuse_min_ms..=config.meteor_fuse_max_ms),
            exploded: false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.drift * dt * TICK_RATE;
        self.pos.y += self.fall_speed * dt * TICK_RATE;
    }

    /// Arm the ground fuse the first time the meteor enters the lower road
    /// band. Later ticks keep the original contact time.
    pub fn note_road_contact(&mut self, now_ms: f32, config: &GameConfig) {
        if self.contact_ms.is_some() {
            return;
        }
        let over_road = self.pos.x >= config.road_left() && self.pos.x <= config.road_right();
        if over_road && self.pos.y >= config.window_height - config.meteor_ground_band {
            self.contact_ms = Some(now_ms);
        }
    }

    /// Whether the armed fuse has run out
    pub fn fuse_elapsed(&self, now_ms: f32) -> bool {
        match self.contact_ms {
            Some(t0) => !self.exploded && now_ms - t0 >= self.fuse_ms,
            None => false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.pos.y > config.window_height + self.radius * 2.0
            || self.pos.x < -self.radius * 2.0
            || self.pos.x > config.window_width + self.radius * 2.0
    }
}

/// A falling pickup granting temporary shooting ability (level 3+).
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl PowerUp {
    pub fn spawn(rng: &mut Pcg32, config: &GameConfig) -> Self {
        let radius = config.powerup_radius;
        let x = rng.random_range(config.road_left() + radius..config.road_right() - radius);
        Self {
            pos: Vec2::new(x, -radius),
            radius,
            speed: config.powerup_speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt * TICK_RATE;
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.pos.y > config.window_height
    }
}

/// Which color ramp an explosion renders with. Growth and lifetime are
/// shared; only the palette differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionKind {
    /// Yellow-orange-red fireball (car crashes)
    Fiery,
    /// White-to-blue shockwave (meteor blasts)
    Shock,
}

/// A purely visual timed entity: grows from a minimum radius to its target
/// radius over a fixed duration, then disappears. No gameplay effect.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub kind: ExplosionKind,
    pub min_radius: f32,
    pub max_radius: f32,
    pub age_ms: f32,
}

impl Explosion {
    pub fn fiery(pos: Vec2, max_radius: f32) -> Self {
        Self::new(pos, ExplosionKind::Fiery, max_radius)
    }

    pub fn shock(pos: Vec2, max_radius: f32) -> Self {
        Self::new(pos, ExplosionKind::Shock, max_radius)
    }

    fn new(pos: Vec2, kind: ExplosionKind, max_radius: f32) -> Self {
        Self {
            pos,
            kind,
            min_radius: EXPLOSION_MIN_RADIUS,
            max_radius: max_radius.max(EXPLOSION_MIN_RADIUS),
            age_ms: 0.0,
        }
    }

    pub fn age(&mut self, dt: f32) {
        self.age_ms += dt * 1000.0;
    }

    pub fn expired(&self) -> bool {
        self.age_ms >= EXPLOSION_MS
    }

    /// Growth progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.age_ms / EXPLOSION_MS).clamp(0.0, 1.0)
    }

    pub fn radius(&self) -> f32 {
        self.min_radius + (self.max_radius - self.min_radius) * self.progress()
    }

    /// Current RGB color along the kind's ramp, for the renderer
    pub fn color(&self) -> [u8; 3] {
        let p = self.progress();
        match self.kind {
            ExplosionKind::Fiery => {
                if p < 0.5 {
                    // Yellow to orange
                    [255, (255.0 - p * 2.0 * 165.0) as u8, 0]
                } else {
                    // Orange to red
                    [255, (90.0 - (p - 0.5) * 2.0 * 90.0) as u8, 0]
                }
            }
            ExplosionKind::Shock => {
                if p < 0.3 {
                    let q = p * 3.33;
                    [(255.0 - q * 75.0) as u8, (255.0 - q * 55.0) as u8, 255]
                } else if p < 0.6 {
                    let q = (p - 0.3) * 3.33;
                    [(180.0 - q * 100.0) as u8, (200.0 - q * 100.0) as u8, 255]
                } else {
                    let q = (p - 0.6) * 2.5;
                    [
                        (80.0 - q * 50.0) as u8,
                        (100.0 - q * 70.0) as u8,
                        (255.0 - q * 55.0) as u8,
                    ]
                }
            }
        }
    }
}
