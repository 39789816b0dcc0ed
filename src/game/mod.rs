//! Core game logic: the wave controller state machine
//!
//! The controller owns the session and the catalog, consumes
//! [`PlayerEvent`]s, and emits plain render descriptors. It never touches
//! the terminal; pacing delays and window drawing belong to the adapter.

pub mod events;

pub use events::*;

use crate::data::{Catalog, Difficulty, Session};
use crate::GameError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The game ends in victory after this many resolved waves.
pub const WAVE_CAP: u32 = 6;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Controller phases. Every operation is valid in some phases and a
/// rejected no-op in the rest; no input can corrupt the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round active; waiting for the next wave to start.
    AwaitingThreat,
    /// A threat is on screen, awaiting the player's action.
    ThreatActive,
    /// The player answered; feedback is up, waiting to advance.
    RoundResolved,
    GameOver(Outcome),
}

/// Drives the session through waves: pick a threat, judge the answer,
/// update score and health, decide win/loss/continue.
#[derive(Debug, Clone)]
pub struct WaveController {
    catalog: Catalog,
    session: Session,
    phase: Phase,
}

impl WaveController {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: Session::new(),
            phase: Phase::AwaitingThreat,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Dispatch a single input event. The adapter's whole write access to
    /// the game goes through here.
    pub fn apply(
        &mut self,
        event: PlayerEvent,
        rng: &mut impl Rng,
    ) -> Result<ControllerOutput, GameError> {
        match event {
            PlayerEvent::StartGame => self.start_wave(rng).map(ControllerOutput::WaveStarted),
            PlayerEvent::SetDifficulty(level) => {
                self.set_difficulty(level);
                Ok(ControllerOutput::DifficultySet(level))
            }
            PlayerEvent::SubmitAction(action_id) => self
                .submit_action(&action_id)
                .map(ControllerOutput::RoundResult),
            PlayerEvent::AdvanceWave => self.advance_wave().map(ControllerOutput::WaveAdvance),
            PlayerEvent::Reset => {
                self.reset();
                Ok(ControllerOutput::WasReset)
            }
        }
    }

    /// Start the next wave with a uniform independent draw from the threat
    /// deck. Repeats across waves are allowed.
    pub fn start_wave(&mut self, rng: &mut impl Rng) -> Result<WaveStarted, GameError> {
        if !matches!(self.phase, Phase::AwaitingThreat | Phase::RoundResolved) {
            return Err(GameError::InvalidState(
                "cannot start a wave now".to_string(),
            ));
        }
        let index = rng.gen_range(0..self.catalog.threats().len());
        let threat_id = self.catalog.threats()[index].id.clone();
        self.begin_round(&threat_id)
    }

    /// Start a round against a specific threat. `start_wave` lands here
    /// after its random draw; tests use it directly.
    pub fn begin_round(&mut self, threat_id: &str) -> Result<WaveStarted, GameError> {
        if !matches!(self.phase, Phase::AwaitingThreat | Phase::RoundResolved) {
            return Err(GameError::InvalidState(
                "cannot start a wave now".to_string(),
            ));
        }
        let threat = self
            .catalog
            .find_threat(threat_id)
            .ok_or_else(|| GameError::UnknownThreat(threat_id.to_string()))?;

        let started = WaveStarted {
            threat_id: threat.id.clone(),
            threat_name: threat.name.clone(),
            panel: threat.panel,
            hint: threat.hint(self.session.difficulty).to_string(),
        };
        self.session.current_threat = Some(threat.id.clone());
        self.phase = Phase::ThreatActive;
        Ok(started)
    }

    /// Judge the player's chosen defence against the active threat.
    ///
    /// Unknown action ids are not rejected; they simply match nothing and
    /// count as an incorrect answer.
    pub fn submit_action(&mut self, action_id: &str) -> Result<RoundResult, GameError> {
        if self.phase != Phase::ThreatActive {
            return Err(GameError::InvalidState("no active round".to_string()));
        }
        let threat_id = self
            .session
            .current_threat
            .clone()
            .ok_or_else(|| GameError::InvalidState("no active round".to_string()))?;
        let threat = self
            .catalog
            .find_threat(&threat_id)
            .ok_or_else(|| GameError::UnknownThreat(threat_id))?
            .clone();

        let was_correct = threat.is_correct(action_id);
        let mut streak_bonus = false;
        let status = if was_correct {
            self.session.score += 10;
            self.session.streak += 1;
            if self.session.streak >= 2 {
                self.session.score += 5;
                streak_bonus = true;
            }
            RoundStatus::Contained
        } else {
            let damage = self.session.difficulty.damage_per_miss();
            self.session.apply_damage(damage);
            self.session.streak = 0;
            RoundStatus::Worsened
        };

        // Sticky regardless of correctness.
        self.session.buffs.record(action_id);

        let correct_action_labels = threat
            .correct_actions
            .iter()
            .map(|id| self.catalog.action_label(id))
            .collect();

        self.phase = Phase::RoundResolved;
        Ok(RoundResult {
            threat_name: threat.name,
            correct_action_labels,
            was_correct,
            streak_bonus,
            explanation: threat.explanation,
            tip: threat.tip,
            status,
        })
    }

    /// Move past a resolved round: bump the wave counter and decide
    /// loss, win, or continue — in that order. A loss at zero health
    /// outranks hitting the wave cap on the same call.
    pub fn advance_wave(&mut self) -> Result<WaveAdvance, GameError> {
        if self.phase != Phase::RoundResolved {
            return Err(GameError::InvalidState(
                "no resolved round to advance from".to_string(),
            ));
        }
        self.session.wave += 1;

        if self.session.health == 0 {
            return Ok(self.end_game(Outcome::Lost));
        }
        if self.session.wave > WAVE_CAP {
            return Ok(self.end_game(Outcome::Won));
        }
        self.phase = Phase::AwaitingThreat;
        Ok(WaveAdvance::Continue {
            wave: self.session.wave,
        })
    }

    fn end_game(&mut self, outcome: Outcome) -> WaveAdvance {
        self.phase = Phase::GameOver(outcome);
        WaveAdvance::Ended(GameEnded {
            won: outcome == Outcome::Won,
            final_score: self.session.score,
            rank: compute_rank(self.session.score),
        })
    }

    /// Restore the session to baseline. Valid from any phase.
    pub fn reset(&mut self) {
        self.session.reset();
        self.phase = Phase::AwaitingThreat;
    }

    /// Takes effect on the next wave or evaluation, never retroactively.
    pub fn set_difficulty(&mut self, level: Difficulty) {
        self.session.difficulty = level;
    }
}

/// Detective rank for a final score. Boundaries are inclusive at the
/// lower edge.
pub fn compute_rank(score: u32) -> &'static str {
    if score >= 90 {
        "Chief Analyst"
    } else if score >= 70 {
        "Incident Responder"
    } else if score >= 50 {
        "Junior Analyst"
    } else {
        "Trainee Technician"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> WaveController {
        WaveController::new(Catalog::builtin().unwrap())
    }

    fn play_round(ctl: &mut WaveController, threat: &str, action: &str) -> RoundResult {
        ctl.begin_round(threat).unwrap();
        ctl.submit_action(action).unwrap()
    }

    #[test]
    fn start_wave_draws_from_the_catalog() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(7);
        let started = ctl.start_wave(&mut rng).unwrap();
        assert!(ctl.catalog().find_threat(&started.threat_id).is_some());
        assert_eq!(ctl.phase(), Phase::ThreatActive);
        assert_eq!(
            ctl.session().current_threat.as_deref(),
            Some(started.threat_id.as_str())
        );
    }

    #[test]
    fn hint_follows_difficulty() {
        let mut ctl = controller();
        let easy = ctl.begin_round("phishing").unwrap();
        assert_eq!(
            easy.hint,
            "Look for a fake message asking you to click urgently."
        );

        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        let standard = ctl.begin_round("phishing").unwrap();
        assert_eq!(standard.hint, "An urgent request appears in your inbox.");
    }

    #[test]
    fn correct_answer_scores_ten_and_builds_streak() {
        let mut ctl = controller();
        let result = play_round(&mut ctl, "ransomware", "restoreBackup");
        assert!(result.was_correct);
        assert!(!result.streak_bonus);
        assert_eq!(result.status, RoundStatus::Contained);
        assert_eq!(ctl.session().score, 10);
        assert_eq!(ctl.session().streak, 1);
        assert_eq!(ctl.session().health, 100);
    }

    #[test]
    fn streak_bonus_pays_every_round_at_two_or_more() {
        let mut ctl = controller();
        play_round(&mut ctl, "ransomware", "restoreBackup");
        ctl.advance_wave().unwrap();
        let second = play_round(&mut ctl, "bruteforce", "changePassword");
        assert!(second.streak_bonus);
        assert_eq!(ctl.session().score, 25);
        ctl.advance_wave().unwrap();
        let third = play_round(&mut ctl, "botnet", "firewallRule");
        assert!(third.streak_bonus);
        assert_eq!(ctl.session().score, 40);
    }

    #[test]
    fn miss_resets_streak_and_damages_by_difficulty() {
        let mut ctl = controller();
        play_round(&mut ctl, "ransomware", "restoreBackup");
        ctl.advance_wave().unwrap();
        let result = play_round(&mut ctl, "phishing", "antiMalware");
        assert!(!result.was_correct);
        assert_eq!(result.status, RoundStatus::Worsened);
        assert_eq!(ctl.session().health, 85); // easy: 15
        assert_eq!(ctl.session().streak, 0);
        assert_eq!(ctl.session().score, 10);

        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        play_round(&mut ctl, "phishing", "antiMalware");
        assert_eq!(ctl.session().health, 80); // standard: 20
    }

    #[test]
    fn unknown_action_counts_as_a_miss() {
        let mut ctl = controller();
        let result = play_round(&mut ctl, "adware", "unplugTheInternet");
        assert!(!result.was_correct);
        assert_eq!(ctl.session().health, 85);
        assert_eq!(ctl.session().streak, 0);
    }

    #[test]
    fn health_never_goes_below_zero() {
        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        for _ in 0..6 {
            play_round(&mut ctl, "phishing", "firewallRule");
            if ctl.session().health == 0 {
                break;
            }
            ctl.advance_wave().unwrap();
        }
        assert_eq!(ctl.session().health, 0);
    }

    #[test]
    fn buffs_stick_even_on_wrong_answers() {
        let mut ctl = controller();
        // enable2fa is wrong for ransomware, buff records anyway
        play_round(&mut ctl, "ransomware", "enable2fa");
        assert!(ctl.session().buffs.two_fa);
        assert!(!ctl.session().buffs.training);
    }

    #[test]
    fn loss_ends_the_run_before_the_cap() {
        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        // Five misses at 20 damage drain 100 health by wave 5.
        for wave in 1..=5 {
            play_round(&mut ctl, "phishing", "firewallRule");
            if wave < 5 {
                ctl.advance_wave().unwrap();
            }
        }
        assert_eq!(ctl.session().health, 0);
        match ctl.advance_wave().unwrap() {
            WaveAdvance::Ended(ended) => assert!(!ended.won),
            other => panic!("expected game over, got {other:?}"),
        }
        assert_eq!(ctl.phase(), Phase::GameOver(Outcome::Lost));
        assert!(ctl.begin_round("adware").is_err());
    }

    #[test]
    fn loss_takes_priority_over_wave_cap() {
        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        // Misses on waves 1-4 (health 20), a correct pick on wave 5, and a
        // final miss on wave 6: health hits 0 on the same advance that
        // crosses the cap.
        for wave in 1..=WAVE_CAP {
            let action = if wave == 5 { "reportDelete" } else { "firewallRule" };
            play_round(&mut ctl, "phishing", action);
            if wave < WAVE_CAP {
                ctl.advance_wave().unwrap();
            }
        }
        assert_eq!(ctl.session().health, 0);
        assert_eq!(ctl.session().wave, WAVE_CAP);
        match ctl.advance_wave().unwrap() {
            WaveAdvance::Ended(ended) => assert!(!ended.won, "loss outranks the cap"),
            other => panic!("expected game over, got {other:?}"),
        }
        assert_eq!(ctl.phase(), Phase::GameOver(Outcome::Lost));
    }

    #[test]
    fn surviving_the_wave_cap_wins() {
        let mut ctl = controller();
        for wave in 1..=WAVE_CAP {
            play_round(&mut ctl, "botnet", "disconnectNetwork");
            let advance = ctl.advance_wave().unwrap();
            if wave < WAVE_CAP {
                assert_eq!(advance, WaveAdvance::Continue { wave: wave + 1 });
            } else {
                match advance {
                    WaveAdvance::Ended(ended) => {
                        assert!(ended.won);
                        // 10 + 5*15 = 85
                        assert_eq!(ended.final_score, 85);
                        assert_eq!(ended.rank, "Incident Responder");
                    }
                    other => panic!("expected game over, got {other:?}"),
                }
            }
        }
        assert_eq!(ctl.phase(), Phase::GameOver(Outcome::Won));
    }

    #[test]
    fn wrong_state_calls_are_rejected_without_corruption() {
        let mut ctl = controller();
        assert!(ctl.submit_action("reportDelete").is_err());
        assert!(ctl.advance_wave().is_err());
        assert_eq!(ctl.session().score, 0);
        assert_eq!(ctl.phase(), Phase::AwaitingThreat);

        ctl.begin_round("phishing").unwrap();
        assert!(ctl.begin_round("adware").is_err());
        assert!(ctl.advance_wave().is_err());
        assert_eq!(ctl.phase(), Phase::ThreatActive);

        ctl.submit_action("reportDelete").unwrap();
        assert!(ctl.submit_action("reportDelete").is_err());
        assert_eq!(ctl.session().score, 10);
    }

    #[test]
    fn reset_recovers_from_game_over() {
        let mut ctl = controller();
        ctl.set_difficulty(Difficulty::Standard);
        for _ in 0..5 {
            play_round(&mut ctl, "phishing", "enable2fa");
            if let Ok(WaveAdvance::Ended(_)) = ctl.advance_wave() {
                break;
            }
        }
        assert!(matches!(ctl.phase(), Phase::GameOver(Outcome::Lost)));

        ctl.reset();
        assert_eq!(ctl.phase(), Phase::AwaitingThreat);
        assert_eq!(ctl.session().health, 100);
        assert_eq!(ctl.session().score, 0);
        assert_eq!(ctl.session().wave, 1);
        assert_eq!(ctl.session().streak, 0);
        assert!(!ctl.session().buffs.two_fa);
        assert!(ctl.begin_round("phishing").is_ok());
    }

    #[test]
    fn rank_boundaries_are_inclusive() {
        assert_eq!(compute_rank(90), "Chief Analyst");
        assert_eq!(compute_rank(95), "Chief Analyst");
        assert_eq!(compute_rank(89), "Incident Responder");
        assert_eq!(compute_rank(70), "Incident Responder");
        assert_eq!(compute_rank(69), "Junior Analyst");
        assert_eq!(compute_rank(50), "Junior Analyst");
        assert_eq!(compute_rank(49), "Trainee Technician");
        assert_eq!(compute_rank(0), "Trainee Technician");
    }

    #[test]
    fn difficulty_change_applies_to_the_next_evaluation() {
        let mut ctl = controller();
        ctl.begin_round("phishing").unwrap();
        // Active threat keeps its easy hint, but damage is evaluated at
        // submit time with the new setting.
        ctl.set_difficulty(Difficulty::Standard);
        ctl.submit_action("firewallRule").unwrap();
        assert_eq!(ctl.session().health, 80);
    }
}
