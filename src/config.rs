//! Game configuration
//!
//! One immutable struct of tuning values, loaded once (defaults or a JSON
//! file) and validated before the first tick. The simulation never mutates
//! it and never reads tuning from anywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Invalid configuration found at startup. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A dimension, speed, interval or duration that must be positive isn't
    NonPositive(&'static str),
    /// The road cannot be wider than the window
    RoadTooWide,
    /// The road must leave room for the named entity to spawn on it
    RoadTooNarrow(&'static str),
    /// A min/max pair where min exceeds max
    InvertedRange(&'static str),
    /// A level threshold below 1
    BadLevel(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => {
                write!(f, "config field `{field}` must be positive")
            }
            ConfigError::RoadTooWide => {
                write!(f, "road_width must not exceed window_width")
            }
            ConfigError::RoadTooNarrow(field) => {
                write!(f, "road_width leaves no room for `{field}` to spawn")
            }
            ConfigError::InvertedRange(field) => {
                write!(f, "config range `{field}` has min > max")
            }
            ConfigError::BadLevel(field) => {
                write!(f, "config field `{field}` must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// All game tuning. Speeds are pixels per 60 Hz tick; times are milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Play field
    pub window_width: f32,
    pub window_height: f32,
    pub road_width: f32,
    /// Road scroll offset wraps modulo this (lane-stripe pattern length)
    pub road_pattern_len: f32,

    // Cars
    pub car_width: f32,
    pub car_height: f32,
    pub player_speed: f32,
    pub base_cpu_speed: f32,
    pub road_speed: f32,

    // Level progression
    pub level_duration_ms: f32,
    /// Per-level scaling for road scroll and CPU car speed
    pub world_speed_multiplier: f32,
    /// Per-level scaling for the player car
    pub player_speed_multiplier: f32,
    /// Completing this level ends the run with a win
    pub max_level: u32,

    // Spawning
    pub cpu_spawn_interval_ms: f32,
    /// CPU speed ratchets up by 0.5 every this many ms within a level
    pub difficulty_step_ms: f32,
    pub meteor_spawn_interval_ms: f32,
    pub powerup_spawn_interval_ms: f32,
    pub powerup_unlock_level: u32,
    pub meteor_unlock_level: u32,

    // Power-ups and bullets
    pub powerup_duration_ms: f32,
    pub powerup_radius: f32,
    pub powerup_speed: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,

    // Meteors
    pub meteor_radius: f32,
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    pub meteor_drift_min: f32,
    pub meteor_drift_max: f32,
    /// Height of the road band (above the bottom edge) that arms the fuse
    pub meteor_ground_band: f32,
    pub meteor_fuse_min_ms: f32,
    pub meteor_fuse_max_ms: f32,

    // Audio collaborator
    /// Highest music track index the level number maps onto
    pub max_music_track: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            road_width: 300.0,
            road_pattern_len: 60.0,

            car_width: 40.0,
            car_height: 60.0,
            player_speed: 5.0,
            base_cpu_speed: 3.0,
            road_speed: 5.0,

            level_duration_ms: 10_000.0,
            world_speed_multiplier: 1.3,
            player_speed_multiplier: 1.1,
            max_level: 10,

            cpu_spawn_interval_ms: 2_000.0,
            difficulty_step_ms: 5_000.0,
            meteor_spawn_interval_ms: 3_000.0,
            powerup_spawn_interval_ms: 10_000.0,
            powerup_unlock_level: 3,
            meteor_unlock_level: 5,

            powerup_duration_ms: 5_000.0,
            powerup_radius: 15.0,
            powerup_speed: 3.0,
            bullet_speed: 7.0,
            bullet_radius: 5.0,

            meteor_radius: 20.0,
            meteor_min_speed: 2.0,
            meteor_max_speed: 4.0,
            meteor_drift_min: 1.0,
            meteor_drift_max: 2.0,
            meteor_ground_band: 100.0,
            meteor_fuse_min_ms: 1_000.0,
            meteor_fuse_max_ms: 2_000.0,

            max_music_track: 5,
        }
    }
}

impl GameConfig {
    /// Validate the configuration. Any failure is a startup-fatal condition;
    /// the simulation assumes validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f32); 25] = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("road_width", self.road_width),
            ("road_pattern_len", self.road_pattern_len),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("player_speed", self.player_speed),
            ("base_cpu_speed", self.base_cpu_speed),
            ("road_speed", self.road_speed),
            ("level_duration_ms", self.level_duration_ms),
            ("cpu_spawn_interval_ms", self.cpu_spawn_interval_ms),
            ("difficulty_step_ms", self.difficulty_step_ms),
            ("meteor_spawn_interval_ms", self.meteor_spawn_interval_ms),
            ("powerup_spawn_interval_ms", self.powerup_spawn_interval_ms),
            ("powerup_duration_ms", self.powerup_duration_ms),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("powerup_radius", self.powerup_radius),
            ("powerup_speed", self.powerup_speed),
            ("meteor_radius", self.meteor_radius),
            ("meteor_min_speed", self.meteor_min_speed),
            ("meteor_drift_min", self.meteor_drift_min),
            ("meteor_fuse_min_ms", self.meteor_fuse_min_ms),
            ("world_speed_multiplier", self.world_speed_multiplier),
            ("player_speed_multiplier", self.player_speed_multiplier),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.road_width > self.window_width {
            return Err(ConfigError::RoadTooWide);
        }
        // Spawn x-ranges must be non-empty or the spawner would panic
        if self.road_width <= self.car_width {
            return Err(ConfigError::RoadTooNarrow("car_width"));
        }
        if self.road_width <= self.powerup_radius * 2.0 {
            return Err(ConfigError::RoadTooNarrow("powerup_radius"));
        }
        if self.meteor_min_speed > self.meteor_max_speed {
            return Err(ConfigError::InvertedRange("meteor speed"));
        }
        if self.meteor_drift_min > self.meteor_drift_max {
            return Err(ConfigError::InvertedRange("meteor drift"));
        }
        if self.meteor_fuse_min_ms > self.meteor_fuse_max_ms {
            return Err(ConfigError::InvertedRange("meteor fuse"));
        }
        if self.powerup_unlock_level < 1 {
            return Err(ConfigError::BadLevel("powerup_unlock_level"));
        }
        if self.meteor_unlock_level < 1 {
            return Err(ConfigError::BadLevel("meteor_unlock_level"));
        }
        if self.max_level < 1 {
            return Err(ConfigError::BadLevel("max_level"));
        }
        Ok(())
    }

    /// Left edge of the road band
    pub fn road_left(&self) -> f32 {
        (self.window_width - self.road_width) / 2.0
    }

    /// Right edge of the road band
    pub fn road_right(&self) -> f32 {
        self.road_left() + self.road_width
    }

    /// World speed scale for a level (applied to road scroll and CPU cars)
    pub fn world_scale(&self, level: u32) -> f32 {
        self.world_speed_multiplier.powi(level as i32 - 1)
    }

    /// Player speed for a level
    pub fn player_speed_at(&self, level: u32) -> f32 {
        self.player_speed * self.player_speed_multiplier.powi(level as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_spawn_interval_rejected() {
        let config = GameConfig {
            cpu_spawn_interval_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("cpu_spawn_interval_ms"))
        );
    }

    #[test]
    fn negative_speed_rejected() {
        let config = GameConfig {
            base_cpu_speed: -3.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn road_wider_than_window_rejected() {
        let config = GameConfig {
            road_width: 900.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RoadTooWide));
    }

    #[test]
    fn road_narrower_than_car_rejected() {
        // A road the width of a car leaves an empty spawn range
        let config = GameConfig {
            road_width: 40.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RoadTooNarrow("car_width")));
    }

    #[test]
    fn road_too_narrow_for_powerup_rejected() {
        let config = GameConfig {
            car_width: 10.0,
            road_width: 28.0,
            powerup_radius: 15.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RoadTooNarrow("powerup_radius"))
        );
    }

    #[test]
    fn zero_entity_dimensions_rejected() {
        let config = GameConfig {
            meteor_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("meteor_radius"))
        );

        let config = GameConfig {
            powerup_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("powerup_speed"))
        );

        let config = GameConfig {
            player_speed_multiplier: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("player_speed_multiplier"))
        );
    }

    #[test]
    fn validated_config_has_room_to_spawn() {
        // Any config that passes validation yields non-empty spawn ranges
        let config = GameConfig::default();
        config.validate().unwrap();
        assert!(config.road_right() - config.car_width > config.road_left());
        assert!(
            config.road_right() - config.powerup_radius
                > config.road_left() + config.powerup_radius
        );
    }

    #[test]
    fn road_band_centered() {
        let config = GameConfig::default();
        assert_eq!(config.road_left(), 250.0);
        assert_eq!(config.road_right(), 550.0);
    }

    #[test]
    fn speed_scaling_is_monotonic() {
        let config = GameConfig::default();
        for level in 1..10 {
            assert!(config.world_scale(level + 1) > config.world_scale(level));
            assert!(config.player_speed_at(level + 1) > config.player_speed_at(level));
        }
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level_duration_ms, config.level_duration_ms);
        assert_eq!(back.max_level, config.max_level);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"max_level": 3}"#).unwrap();
        assert_eq!(config.max_level, 3);
        assert_eq!(config.window_width, 800.0);
    }
}
