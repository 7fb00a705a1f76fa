//! Persisted max score
//!
//! A single number stored as plain text in LocalStorage.

use crate::sim::GameEvent;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxScore(pub u64);

impl MaxScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "maxScore";

    /// Parse a stored value. Anything that isn't a non-negative number reads as zero.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(score) = raw.parse::<u64>() {
            return Self(score);
        }
        match raw.parse::<f64>() {
            Ok(score) if score.is_finite() && score >= 0.0 => Self(score.floor() as u64),
            _ => Self(0),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Raise to `score` if it beats the current value. Returns true if it did.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.0 {
            self.0 = score;
            return true;
        }
        false
    }

    /// Fold a simulation event into the stored max. Returns true when it
    /// changed and needs saving.
    pub fn observe(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::GameOver {
                score,
                new_high_score: true,
            } => self.submit(*score),
            _ => false,
        }
    }

    /// Load max score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let max = Self::parse(&raw);
                log::info!("Loaded max score {}", max.0);
                return max;
            }
        }

        log::info!("No max score found, starting fresh");
        Self::default()
    }

    /// Save max score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.0.to_string())
                .is_ok()
            {
                log::info!("Max score saved ({})", self.0);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    /// Play a run out to `score` against a stored max and return what would be persisted
    fn settle_run(stored: u64, score: u64) -> (MaxScore, bool) {
        let mut max = MaxScore(stored);
        let mut state = GameState::new(800.0, 600.0, 9, max.value());
        state.score = score;
        state.end_game();

        let mut needs_save = false;
        for event in state.drain_events() {
            needs_save |= max.observe(&event);
        }
        (max, needs_save)
    }

    #[test]
    fn test_record_run_updates_persisted_max() {
        let (max, needs_save) = settle_run(100, 150);
        assert!(needs_save);
        assert_eq!(max.value(), 150);
    }

    #[test]
    fn test_short_run_leaves_persisted_max() {
        let (max, needs_save) = settle_run(100, 50);
        assert!(!needs_save);
        assert_eq!(max.value(), 100);
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut max = MaxScore(10);
        assert!(!max.observe(&GameEvent::Restarted));
        assert!(!max.observe(&GameEvent::GameOver {
            score: 500,
            new_high_score: false
        }));
        assert_eq!(max.value(), 10);
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(MaxScore::parse("0"), MaxScore(0));
        assert_eq!(MaxScore::parse("1234"), MaxScore(1234));
        assert_eq!(MaxScore::parse(" 42\n"), MaxScore(42));
    }

    #[test]
    fn test_parse_decimal_floors() {
        assert_eq!(MaxScore::parse("99.9"), MaxScore(99));
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(MaxScore::parse(""), MaxScore(0));
        assert_eq!(MaxScore::parse("abc"), MaxScore(0));
        assert_eq!(MaxScore::parse("-5"), MaxScore(0));
        assert_eq!(MaxScore::parse("NaN"), MaxScore(0));
        assert_eq!(MaxScore::parse("inf"), MaxScore(0));
    }

    #[test]
    fn test_submit() {
        let mut max = MaxScore(100);
        assert!(max.submit(150));
        assert_eq!(max.value(), 150);
        assert!(!max.submit(50));
        assert!(!max.submit(150));
        assert_eq!(max.value(), 150);
    }
}
