//! Shape generation for 2D primitives
//!
//! Everything is emitted in playfield pixels (origin top-left, y down);
//! `RenderState` maps to clip space when uploading.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{PARTICLE_LIFE, PARTICLE_SIZE, POWERUP_HITBOX};
use crate::settings::Settings;
use crate::sim::{GameState, PowerUp, PowerUpKind};

/// Power-ups blink for their last this-many steps
const POWERUP_BLINK_TICKS: u32 = 120;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Append a filled axis-aligned rectangle
pub fn push_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Append a filled circle
pub fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append a ring (hollow circle)
pub fn push_ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (
            Vec2::new(theta1.cos(), theta1.sin()),
            Vec2::new(theta2.cos(), theta2.sin()),
        );

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        out.push(Vertex::new(inner1.x, inner1.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(inner2.x, inner2.y, color));

        out.push(Vertex::new(inner2.x, inner2.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(outer2.x, outer2.y, color));
    }
}

/// Power-up glyph drawn inside its pickup box
fn push_powerup(out: &mut Vec<Vertex>, powerup: &PowerUp, time_ticks: u64) {
    let alpha = if powerup.ttl < POWERUP_BLINK_TICKS && (time_ticks / 8) % 2 == 0 {
        0.35
    } else {
        1.0
    };
    let center = powerup.pos + Vec2::splat(POWERUP_HITBOX / 2.0);
    let radius = POWERUP_HITBOX * 0.4;

    match powerup.kind {
        PowerUpKind::Shield => {
            push_circle(out, center, radius, with_alpha(colors::POWERUP_SHIELD, alpha), 20);
            push_ring(out, center, radius * 0.45, radius * 0.65, with_alpha(colors::POWERUP_CORE, alpha), 20);
        }
        PowerUpKind::Slow => {
            push_circle(out, center, radius, with_alpha(colors::POWERUP_SLOW, alpha), 20);
            push_circle(out, center, radius * 0.35, with_alpha(colors::POWERUP_CORE, alpha), 12);
        }
        PowerUpKind::Bomb => {
            push_circle(out, center, radius, with_alpha(colors::POWERUP_BOMB, alpha), 20);
            let fuse = Vec2::new(3.0, radius * 0.6);
            push_rect(
                out,
                center + Vec2::new(-fuse.x / 2.0, -radius - fuse.y * 0.5),
                fuse,
                with_alpha(colors::BOMB_FUSE, alpha),
            );
        }
    }
}

/// Build the whole frame in draw order
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        (state.obstacle_count() + 4) * 6 + state.powerups.len() * 160 + state.particles.len() * 6,
    );

    for powerup in &state.powerups {
        push_powerup(&mut out, powerup, state.time_ticks);
    }

    for obstacle in &state.top_obstacles {
        push_rect(&mut out, obstacle.pos, Vec2::splat(obstacle.size), colors::OBSTACLE_TOP);
    }
    for obstacle in &state.bottom_obstacles {
        push_rect(&mut out, obstacle.pos, Vec2::splat(obstacle.size), colors::OBSTACLE_BOTTOM);
    }

    let player = &state.player;
    push_rect(&mut out, player.pos, Vec2::splat(player.size), colors::PLAYER);
    if state.effects.shield.active {
        let r = player.size * 0.75;
        push_ring(&mut out, player.center(), r, r + 4.0, colors::SHIELD_RING, 32);
    }

    if settings.particles {
        for particle in &state.particles {
            let fade = particle.life as f32 / PARTICLE_LIFE as f32;
            push_rect(
                &mut out,
                particle.pos,
                Vec2::splat(PARTICLE_SIZE),
                with_alpha(colors::PARTICLE, fade),
            );
        }
    }

    if settings.screen_flash && state.flash_ticks > 0 {
        push_rect(
            &mut out,
            Vec2::ZERO,
            Vec2::new(state.width, state.height),
            colors::FLASH,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        push_rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(5.0, 6.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 26.0);
    }

    #[test]
    fn test_scene_contains_player_and_obstacles() {
        let mut state = GameState::new(800.0, 600.0, 1, 0);
        state.top_obstacles.push(Obstacle::new(Vec2::new(0.0, 0.0)));
        state.bottom_obstacles.push(Obstacle::new(Vec2::new(0.0, 500.0)));

        let scene = build_scene(&state, &Settings::default());
        assert_eq!(scene.len(), 18);
        assert!(scene.iter().any(|v| v.color == colors::PLAYER));
        assert!(scene.iter().any(|v| v.color == colors::OBSTACLE_TOP));
        assert!(scene.iter().any(|v| v.color == colors::OBSTACLE_BOTTOM));
    }

    #[test]
    fn test_effect_toggles_hide_particles_and_flash() {
        let mut state = GameState::new(800.0, 600.0, 1, 0);
        state.spawn_blast(Vec2::new(100.0, 100.0));

        let full = build_scene(&state, &Settings::default());
        let settings = Settings {
            particles: false,
            screen_flash: false,
            ..Settings::default()
        };
        let reduced = build_scene(&state, &settings);
        assert_eq!(reduced.len(), 6);
        assert!(full.len() > reduced.len());
    }
}
