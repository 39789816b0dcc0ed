//! Mutable per-run session state

use super::Difficulty;
use serde::{Deserialize, Serialize};

/// Starting system health.
pub const BASE_HEALTH: u32 = 100;

/// Sticky flags recording that a particular action was ever chosen.
///
/// Set regardless of correctness, cleared only on full restart. No game
/// rule consults them; they are tracked state surfaced read-only in the
/// HUD, pending product clarification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffs {
    pub training: bool,
    pub updates: bool,
    pub two_fa: bool,
}

impl Buffs {
    /// Record a chosen action, if it maps to a buff.
    pub fn record(&mut self, action_id: &str) {
        match action_id {
            "staffTraining" => self.training = true,
            "updateSoftware" => self.updates = true,
            "enable2fa" => self.two_fa = true,
            _ => {}
        }
    }
}

/// One run of the game: health, score, wave progress, streak, buffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// System health; 100 down to a floor of 0.
    pub health: u32,
    /// Accumulates upward only.
    pub score: u32,
    /// Current wave, starting at 1.
    pub wave: u32,
    /// Consecutive correct answers; reset on any miss.
    pub streak: u32,
    pub difficulty: Difficulty,
    /// Id of the active threat, when a round is in progress.
    pub current_threat: Option<String>,
    pub buffs: Buffs,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session at baseline values.
    pub fn new() -> Self {
        Self {
            health: BASE_HEALTH,
            score: 0,
            wave: 1,
            streak: 0,
            difficulty: Difficulty::default(),
            current_threat: None,
            buffs: Buffs::default(),
        }
    }

    /// Restore baseline, clearing buffs and reverting difficulty.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Subtract damage, clamping health at 0.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut session = Session::new();
        session.health = 10;
        session.apply_damage(20);
        assert_eq!(session.health, 0);
        session.apply_damage(15);
        assert_eq!(session.health, 0);
    }

    #[test]
    fn buffs_record_only_known_actions() {
        let mut buffs = Buffs::default();
        buffs.record("restoreBackup");
        assert_eq!(buffs, Buffs::default());
        buffs.record("enable2fa");
        assert!(buffs.two_fa);
        buffs.record("staffTraining");
        buffs.record("updateSoftware");
        assert!(buffs.training && buffs.updates && buffs.two_fa);
    }

    #[test]
    fn reset_restores_baseline() {
        let mut session = Session::new();
        session.health = 5;
        session.score = 80;
        session.wave = 6;
        session.streak = 3;
        session.difficulty = Difficulty::Standard;
        session.current_threat = Some("botnet".to_string());
        session.buffs.record("enable2fa");

        session.reset();
        assert_eq!(session.health, BASE_HEALTH);
        assert_eq!(session.score, 0);
        assert_eq!(session.wave, 1);
        assert_eq!(session.streak, 0);
        assert_eq!(session.difficulty, Difficulty::Easy);
        assert!(session.current_threat.is_none());
        assert_eq!(session.buffs, Buffs::default());
    }
}
