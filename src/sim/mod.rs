//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No rendering, DOM, audio or storage access
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s for the platform shell

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Square, overlaps};
pub use input::{TickInput, clamp_joystick, integrate_player};
pub use spawn::{SpawnTimers, advance_spawners, spawn_bottom_obstacle, spawn_powerup, spawn_top_obstacle};
pub use state::{
    EffectTimer, Effects, GameEvent, GamePhase, GameState, Obstacle, Particle, Player, PowerUp,
    PowerUpKind, SoundCue,
};
pub use tick::tick;
