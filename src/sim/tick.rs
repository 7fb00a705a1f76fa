//! Fixed-step simulation tick
//!
//! One call advances the session by one step: movement, obstacles, hits,
//! power-ups, effect timers, particles and score.

use super::collision::overlaps;
use super::input::{TickInput, integrate_player};
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::consts::PARTICLE_GRAVITY;

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        // Gameplay is frozen; only let the blast play out
        advance_visuals(state);
        return;
    }

    state.time_ticks += 1;

    let (width, height) = (state.width, state.height);
    integrate_player(&mut state.player, input, width, height);

    advance_obstacles(state);
    if !resolve_obstacle_hits(state) {
        return;
    }
    cull_obstacles(state);

    collect_powerups(state);

    if state.effects.shield.step() {
        state.emit(GameEvent::EffectExpired(PowerUpKind::Shield));
    }
    if state.effects.slow.step() {
        state.emit(GameEvent::EffectExpired(PowerUpKind::Slow));
    }

    advance_visuals(state);

    state.score += 1;
}

/// Top obstacles fall, bottom obstacles rise
fn advance_obstacles(state: &mut GameState) {
    let factor = state.effects.speed_factor();
    for obstacle in &mut state.top_obstacles {
        obstacle.pos.y += obstacle.speed * factor;
    }
    for obstacle in &mut state.bottom_obstacles {
        obstacle.pos.y -= obstacle.speed * factor;
    }
}

/// Each overlapping obstacle costs the shield or the run.
/// Returns false once the game is over.
fn resolve_obstacle_hits(state: &mut GameState) -> bool {
    let player_box = state.player.hitbox();
    let hits = state
        .top_obstacles
        .iter()
        .chain(state.bottom_obstacles.iter())
        .filter(|o| overlaps(&player_box, &o.hitbox()))
        .count();

    for _ in 0..hits {
        if state.effects.shield.active {
            state.effects.shield.consume();
            state.emit(GameEvent::ShieldAbsorbed);
        } else {
            state.end_game();
            return false;
        }
    }
    true
}

/// Drop obstacles that have fully left the playfield
fn cull_obstacles(state: &mut GameState) {
    let height = state.height;
    state.top_obstacles.retain(|o| o.pos.y < height);
    state.bottom_obstacles.retain(|o| o.pos.y + o.size > 0.0);
}

/// Pick up touched power-ups, age the rest
fn collect_powerups(state: &mut GameState) {
    let player_box = state.player.hitbox();
    let mut collected = Vec::new();
    state.powerups.retain_mut(|p| {
        if overlaps(&player_box, &p.hitbox()) {
            collected.push(p.kind);
            return false;
        }
        p.ttl = p.ttl.saturating_sub(1);
        p.ttl > 0
    });

    for kind in collected {
        apply_powerup(state, kind);
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    state.emit(GameEvent::PowerUpCollected(kind));
    match kind {
        PowerUpKind::Shield => state.effects.shield.activate(kind.duration()),
        PowerUpKind::Slow => state.effects.slow.activate(kind.duration()),
        PowerUpKind::Bomb => {
            let at = state.player.center();
            state.spawn_blast(at);
            state.top_obstacles.clear();
            state.bottom_obstacles.clear();
        }
    }
}

/// Flash countdown and particle physics
fn advance_visuals(state: &mut GameState) {
    state.flash_ticks = state.flash_ticks.saturating_sub(1);
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}
