//! Periodic spawning of obstacles and power-ups
//!
//! The three spawn clocks run on wall-clock milliseconds, independent of the
//! fixed simulation step. They are suspended while the game is over and are
//! rewound by `GameState::restart`.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, PowerUp, PowerUpKind};
use crate::consts::*;

/// Accumulated milliseconds per spawn clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub top_ms: f64,
    pub bottom_ms: f64,
    pub powerup_ms: f64,
}

/// Fire every spawn whose period elapsed during `elapsed_ms`
pub fn advance_spawners(state: &mut GameState, elapsed_ms: f64) {
    if state.is_over() || elapsed_ms <= 0.0 {
        return;
    }

    state.spawn.top_ms += elapsed_ms;
    while state.spawn.top_ms >= TOP_SPAWN_MS {
        state.spawn.top_ms -= TOP_SPAWN_MS;
        spawn_top_obstacle(state);
    }

    state.spawn.bottom_ms += elapsed_ms;
    while state.spawn.bottom_ms >= BOTTOM_SPAWN_MS {
        state.spawn.bottom_ms -= BOTTOM_SPAWN_MS;
        spawn_bottom_obstacle(state);
    }

    state.spawn.powerup_ms += elapsed_ms;
    while state.spawn.powerup_ms >= POWERUP_SPAWN_MS {
        state.spawn.powerup_ms -= POWERUP_SPAWN_MS;
        spawn_powerup(state);
    }
}

/// Uniform x in `[0, width)`
fn random_x(state: &mut GameState) -> f32 {
    state.rng.random_range(0.0..state.width.max(1.0))
}

/// New obstacle just above the top edge
pub fn spawn_top_obstacle(state: &mut GameState) {
    let x = random_x(state);
    state
        .top_obstacles
        .push(Obstacle::new(Vec2::new(x, -OBSTACLE_SIZE)));
}

/// New obstacle just below the bottom edge
pub fn spawn_bottom_obstacle(state: &mut GameState) {
    let x = random_x(state);
    let y = state.height + OBSTACLE_SIZE;
    state.bottom_obstacles.push(Obstacle::new(Vec2::new(x, y)));
}

/// New power-up of a random kind, unless the cap is reached.
/// Returns the spawned kind.
pub fn spawn_powerup(state: &mut GameState) -> Option<PowerUpKind> {
    if state.powerups.len() >= MAX_POWERUPS {
        return None;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let x = random_x(state);
    let y = state.rng.random::<f32>() * state.height * POWERUP_Y_FRACTION + POWERUP_Y_OFFSET;
    state.powerups.push(PowerUp::new(Vec2::new(x, y), kind));
    log::debug!("Spawned {} power-up at ({:.0}, {:.0})", kind.as_str(), x, y);
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacles_spawn_at_edges() {
        let mut state = GameState::new(800.0, 600.0, 3, 0);
        spawn_top_obstacle(&mut state);
        spawn_bottom_obstacle(&mut state);

        let top = &state.top_obstacles[0];
        assert_eq!(top.pos.y, -OBSTACLE_SIZE);
        assert!(top.pos.x >= 0.0 && top.pos.x < 800.0);
        assert_eq!(top.speed, OBSTACLE_SPEED);

        let bottom = &state.bottom_obstacles[0];
        assert_eq!(bottom.pos.y, 600.0 + OBSTACLE_SIZE);
        assert!(bottom.pos.x >= 0.0 && bottom.pos.x < 800.0);
    }

    #[test]
    fn test_timers_fire_on_their_periods() {
        let mut state = GameState::new(800.0, 600.0, 3, 0);

        advance_spawners(&mut state, 799.0);
        assert_eq!(state.obstacle_count(), 0);

        advance_spawners(&mut state, 1.0);
        assert_eq!(state.top_obstacles.len(), 1);
        assert!(state.bottom_obstacles.is_empty());

        advance_spawners(&mut state, 100.0);
        assert_eq!(state.bottom_obstacles.len(), 1);

        // 7200 ms total
        advance_spawners(&mut state, 6300.0);
        assert_eq!(state.top_obstacles.len(), 9);
        assert_eq!(state.bottom_obstacles.len(), 8);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_powerup_cap() {
        let mut state = GameState::new(800.0, 600.0, 3, 0);
        for _ in 0..MAX_POWERUPS {
            assert!(spawn_powerup(&mut state).is_some());
        }
        assert_eq!(spawn_powerup(&mut state), None);
        assert_eq!(state.powerups.len(), MAX_POWERUPS);
    }

    #[test]
    fn test_powerup_position_range() {
        let mut state = GameState::new(800.0, 600.0, 11, 0);
        for _ in 0..200 {
            state.powerups.clear();
            spawn_powerup(&mut state);
            let p = &state.powerups[0];
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= POWERUP_Y_OFFSET);
            assert!(p.pos.y <= POWERUP_Y_OFFSET + 600.0 * POWERUP_Y_FRACTION);
            assert_eq!(p.ttl, POWERUP_TTL);
        }
    }

    #[test]
    fn test_all_kinds_eventually_spawn() {
        let mut state = GameState::new(800.0, 600.0, 5, 0);
        let mut seen = Vec::new();
        for _ in 0..300 {
            state.powerups.clear();
            if let Some(kind) = spawn_powerup(&mut state) {
                if !seen.contains(&kind) {
                    seen.push(kind);
                }
            }
        }
        assert_eq!(seen.len(), PowerUpKind::ALL.len());
    }

    #[test]
    fn test_spawning_suspended_after_game_over() {
        let mut state = GameState::new(800.0, 600.0, 3, 0);
        state.end_game();
        advance_spawners(&mut state, 10_000.0);
        assert_eq!(state.obstacle_count(), 0);
        assert!(state.powerups.is_empty());
        assert_eq!(state.spawn, SpawnTimers::default());
    }

    #[test]
    fn test_restart_rewinds_clocks() {
        let mut state = GameState::new(800.0, 600.0, 3, 0);
        advance_spawners(&mut state, 750.0);
        state.restart();
        advance_spawners(&mut state, 100.0);
        assert!(state.top_obstacles.is_empty());
    }
}
