//! Don't Touch The Line - an arcade dodging game
//!
//! Core modules:
//! - `sim`: Pure simulation (movement, spawning, collisions, effects, lifecycle)
//! - `renderer`: WebGPU rendering pipeline
//! - `highscores`: Persisted max score
//! - `settings`: User preferences
//! - `audio`: Procedural sound cues (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::MaxScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in CSS pixels, speeds in pixels per simulation step.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the per-step speeds are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest wall-clock gap fed into one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player square
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 6.0;

    /// Virtual joystick: displacement radius and how much of it reaches the player
    pub const JOYSTICK_RADIUS: f32 = 40.0;
    pub const JOYSTICK_DAMPING: f32 = 0.15;

    /// Obstacles
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_SPEED: f32 = 4.0;
    /// Obstacle speed multiplier while slow is active
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Spawn periods (milliseconds)
    pub const TOP_SPAWN_MS: f64 = 800.0;
    pub const BOTTOM_SPAWN_MS: f64 = 900.0;
    pub const POWERUP_SPAWN_MS: f64 = 7000.0;

    /// Power-ups
    pub const MAX_POWERUPS: usize = 3;
    pub const POWERUP_TTL: u32 = 600;
    pub const POWERUP_HITBOX: f32 = 40.0;
    /// Power-ups spawn in `[offset, offset + fraction * height)`
    pub const POWERUP_Y_FRACTION: f32 = 0.7;
    pub const POWERUP_Y_OFFSET: f32 = 80.0;

    /// Effect durations (steps)
    pub const SHIELD_DURATION: u32 = 360;
    pub const SLOW_DURATION: u32 = 300;

    /// Blast visuals
    pub const BLAST_PARTICLES: usize = 50;
    /// Particle velocity components are drawn from `(-spread/2, spread/2)`
    pub const BLAST_SPREAD: f32 = 14.0;
    pub const PARTICLE_LIFE: u32 = 40;
    pub const PARTICLE_SIZE: f32 = 4.0;
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    pub const FLASH_DURATION: u32 = 12;
}
