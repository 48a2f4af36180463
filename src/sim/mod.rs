//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No wall clock: time is accumulated simulated milliseconds
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod entity;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entity::{Bullet, CpuCar, Explosion, ExplosionKind, Meteor, Player, PowerUp};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
