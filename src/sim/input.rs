//! Player input and movement integration

use glam::Vec2;

use super::state::Player;
use crate::consts::{JOYSTICK_DAMPING, JOYSTICK_RADIUS};

/// Input intent for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Joystick displacement while a touch is held, already clamped to `JOYSTICK_RADIUS`
    pub joystick: Option<Vec2>,
}

impl TickInput {
    /// Key state change for an arrow key. Returns false for keys we don't handle.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" => self.left = pressed,
            "ArrowRight" => self.right = pressed,
            "ArrowUp" => self.up = pressed,
            "ArrowDown" => self.down = pressed,
            _ => return false,
        }
        true
    }
}

/// Limit a raw joystick offset to the joystick radius, keeping its direction
pub fn clamp_joystick(offset: Vec2) -> Vec2 {
    let dist = offset.length();
    if dist > JOYSTICK_RADIUS {
        offset * (JOYSTICK_RADIUS / dist)
    } else {
        offset
    }
}

/// Apply one step of input to the player and clamp it to the playfield
pub fn integrate_player(player: &mut Player, input: &TickInput, width: f32, height: f32) {
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= player.speed;
    }
    if input.right {
        delta.x += player.speed;
    }
    if input.up {
        delta.y -= player.speed;
    }
    if input.down {
        delta.y += player.speed;
    }
    if let Some(stick) = input.joystick {
        delta += stick * JOYSTICK_DAMPING;
    }

    let max = Vec2::new(width - player.size, height - player.size).max(Vec2::ZERO);
    player.pos = (player.pos + delta).clamp(Vec2::ZERO, max);
}
