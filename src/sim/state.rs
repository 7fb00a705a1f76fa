//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Square;
use super::spawn::SpawnTimers;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player touched an obstacle without a shield
    GameOver,
}

/// The player's square
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Keyboard movement per step
    pub speed: f32,
}

impl Player {
    /// Player centered in a `width` x `height` field
    pub fn centered(width: f32, height: f32) -> Self {
        let size = PLAYER_SIZE;
        Self {
            pos: Vec2::new(
                ((width - size) / 2.0).max(0.0),
                ((height - size) / 2.0).max(0.0),
            ),
            size,
            speed: PLAYER_SPEED,
        }
    }

    pub fn hitbox(&self) -> Square {
        Square::new(self.pos, self.size)
    }

    /// Center point (blast origin)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A falling (top) or rising (bottom) obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per step before the slow effect is applied
    pub speed: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: OBSTACLE_SIZE,
            speed: OBSTACLE_SPEED,
        }
    }

    pub fn hitbox(&self) -> Square {
        Square::new(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Absorbs one collision
    Shield,
    /// Halves obstacle speed for a while
    Slow,
    /// Clears every obstacle on screen
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Slow, PowerUpKind::Bomb];

    /// Effect duration in steps (bomb is instantaneous)
    pub fn duration(&self) -> u32 {
        match self {
            PowerUpKind::Shield => SHIELD_DURATION,
            PowerUpKind::Slow => SLOW_DURATION,
            PowerUpKind::Bomb => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Slow => "slow",
            PowerUpKind::Bomb => "bomb",
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Steps until it disappears on its own
    pub ttl: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            ttl: POWERUP_TTL,
        }
    }

    pub fn hitbox(&self) -> Square {
        Square::new(self.pos, POWERUP_HITBOX)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining steps
    pub life: u32,
}

/// A timed effect: a flag plus its countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectTimer {
    pub active: bool,
    pub remaining: u32,
}

impl EffectTimer {
    /// Turn on (or refresh) for `duration` steps
    pub fn activate(&mut self, duration: u32) {
        self.active = true;
        self.remaining = duration;
    }

    /// Turn off immediately
    pub fn consume(&mut self) {
        self.active = false;
        self.remaining = 0;
    }

    /// Count down one step. Returns true on the step the effect expires.
    pub fn step(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub shield: EffectTimer,
    pub slow: EffectTimer,
}

impl Effects {
    /// Obstacle speed multiplier
    pub fn speed_factor(&self) -> f32 {
        if self.slow.active { SLOW_FACTOR } else { 1.0 }
    }
}

/// Sound cues the platform shell knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Run ended without a new record
    Hit,
    /// Record blast
    Blast,
    /// Power-up collected
    PowerUp,
    /// New max score
    HighScore,
}

/// Things that happened during a step, for the platform shell to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PowerUpCollected(PowerUpKind),
    /// The shield soaked up a hit
    ShieldAbsorbed,
    /// A timed effect ran out
    EffectExpired(PowerUpKind),
    /// Particle burst + screen flash centered at `at`
    Blast { at: Vec2 },
    /// Run ended; `new_high_score` means `max_score` was just raised to `score`
    GameOver { score: u64, new_high_score: bool },
    Restarted,
}

impl GameEvent {
    /// Sound cues for this event, in play order. `Blast` events are silent;
    /// a record plays the blast cue ahead of the fanfare.
    pub fn sounds(&self) -> &'static [SoundCue] {
        match self {
            GameEvent::PowerUpCollected(_) => &[SoundCue::PowerUp],
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => &[SoundCue::Blast, SoundCue::HighScore],
            GameEvent::GameOver { .. } => &[SoundCue::Hit],
            GameEvent::Blast { .. }
            | GameEvent::ShieldAbsorbed
            | GameEvent::EffectExpired(_)
            | GameEvent::Restarted => &[],
        }
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Playfield size (CSS pixels)
    pub width: f32,
    pub height: f32,
    pub player: Player,
    /// Obstacles entering from the top edge, moving down
    pub top_obstacles: Vec<Obstacle>,
    /// Obstacles entering from the bottom edge, moving up
    pub bottom_obstacles: Vec<Obstacle>,
    /// Alive power-ups (never more than `MAX_POWERUPS`)
    pub powerups: Vec<PowerUp>,
    pub effects: Effects,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Remaining full-screen flash steps
    pub flash_ticks: u32,
    /// Steps survived this run
    pub score: u64,
    /// Best score across runs
    pub max_score: u64,
    /// Simulation step counter for this run
    pub time_ticks: u64,
    /// Spawn clocks
    pub spawn: SpawnTimers,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session on a `width` x `height` field
    pub fn new(width: f32, height: f32, seed: u64, max_score: u64) -> Self {
        Self {
            phase: GamePhase::Running,
            width,
            height,
            player: Player::centered(width, height),
            top_obstacles: Vec::new(),
            bottom_obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: Effects::default(),
            particles: Vec::new(),
            flash_ticks: 0,
            score: 0,
            max_score,
            time_ticks: 0,
            spawn: SpawnTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Playfield was resized; keep the player on screen
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let max = Vec2::new(width - self.player.size, height - self.player.size).max(Vec2::ZERO);
        self.player.pos = self.player.pos.clamp(Vec2::ZERO, max);
    }

    /// Total obstacles on screen
    pub fn obstacle_count(&self) -> usize {
        self.top_obstacles.len() + self.bottom_obstacles.len()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Particle burst and screen flash at `at`
    pub fn spawn_blast(&mut self, at: Vec2) {
        self.flash_ticks = FLASH_DURATION;
        let half = BLAST_SPREAD / 2.0;
        for _ in 0..BLAST_PARTICLES {
            let vel = Vec2::new(
                self.rng.random_range(-half..half),
                self.rng.random_range(-half..half),
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                life: PARTICLE_LIFE,
            });
        }
        self.emit(GameEvent::Blast { at });
    }

    /// Terminal collision: freeze gameplay and settle the max score
    pub fn end_game(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;

        let new_high_score = self.score > self.max_score;
        if new_high_score {
            self.max_score = self.score;
            let at = self.player.center();
            self.spawn_blast(at);
            log::info!("New max score: {}", self.score);
        } else {
            log::info!("Game over with score {} (max {})", self.score, self.max_score);
        }
        self.emit(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    /// Start a fresh run, keeping the max score, player position and RNG stream
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.time_ticks = 0;
        self.top_obstacles.clear();
        self.bottom_obstacles.clear();
        self.powerups.clear();
        self.particles.clear();
        self.flash_ticks = 0;
        self.effects = Effects::default();
        self.spawn = SpawnTimers::default();
        self.events.clear();
        self.emit(GameEvent::Restarted);
        log::info!("Game restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_timer_counts_down_and_expires_once() {
        let mut timer = EffectTimer::default();
        assert!(!timer.step());

        timer.activate(3);
        assert!(!timer.step());
        assert!(!timer.step());
        assert!(timer.step());
        assert!(!timer.active);
        assert!(!timer.step());
    }

    #[test]
    fn test_effect_timer_refresh() {
        let mut timer = EffectTimer::default();
        timer.activate(2);
        timer.step();
        timer.activate(5);
        assert_eq!(timer.remaining, 5);
        assert!(timer.active);
    }

    #[test]
    fn test_high_score_success_path() {
        let mut state = GameState::new(800.0, 600.0, 1, 100);
        state.score = 150;
        state.end_game();

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.max_score, 150);
        assert_eq!(state.particles.len(), BLAST_PARTICLES);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 150,
            new_high_score: true
        }));
        let sounds: Vec<_> = events.iter().flat_map(GameEvent::sounds).copied().collect();
        assert_eq!(sounds, vec![SoundCue::Blast, SoundCue::HighScore]);
    }

    #[test]
    fn test_high_score_failure_path() {
        let mut state = GameState::new(800.0, 600.0, 1, 100);
        state.score = 50;
        state.end_game();

        assert_eq!(state.max_score, 100);
        assert!(state.particles.is_empty());
        let sounds: Vec<_> = state
            .drain_events()
            .iter()
            .flat_map(GameEvent::sounds)
            .copied()
            .collect();
        assert_eq!(sounds, vec![SoundCue::Hit]);
    }

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut state = GameState::new(800.0, 600.0, 1, 100);
        state.score = 100;
        state.end_game();
        assert_eq!(state.max_score, 100);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 100,
            new_high_score: false
        }));
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut state = GameState::new(800.0, 600.0, 1, 0);
        state.score = 10;
        state.end_game();
        state.end_game();
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(800.0, 600.0, 7, 0);
        state.score = 999;
        state.top_obstacles.push(Obstacle::new(Vec2::new(10.0, 10.0)));
        state.bottom_obstacles.push(Obstacle::new(Vec2::new(10.0, 500.0)));
        state.powerups.push(PowerUp::new(Vec2::new(50.0, 50.0), PowerUpKind::Slow));
        state.effects.shield.activate(SHIELD_DURATION);
        state.effects.slow.activate(SLOW_DURATION);
        state.spawn_blast(Vec2::new(100.0, 100.0));
        state.end_game();

        state.restart();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.max_score, 999);
        assert!(state.top_obstacles.is_empty());
        assert!(state.bottom_obstacles.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.flash_ticks, 0);
        assert!(!state.effects.shield.active);
        assert!(!state.effects.slow.active);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_resize_keeps_player_on_screen() {
        let mut state = GameState::new(800.0, 600.0, 1, 0);
        state.player.pos = Vec2::new(700.0, 500.0);
        state.resize(400.0, 300.0);
        assert_eq!(state.player.pos, Vec2::new(360.0, 260.0));
    }
}
