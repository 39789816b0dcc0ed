//! The event contract between the controller and the presentation adapter
//!
//! Inbound [`PlayerEvent`]s come from user input; outbound descriptors are
//! plain data records the adapter renders. No UI logic on either side.

use crate::data::{Difficulty, Panel};
use serde::{Deserialize, Serialize};

/// Input events the controller accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    StartGame,
    SetDifficulty(Difficulty),
    SubmitAction(String),
    AdvanceWave,
    Reset,
}

/// A new threat is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveStarted {
    pub threat_id: String,
    pub threat_name: String,
    /// Which desktop window to open.
    pub panel: Panel,
    /// Difficulty-appropriate hint, toast material.
    pub hint: String,
}

/// Whether the chosen defence matched the threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Threat blocked.
    Contained,
    /// Infection worsened.
    Worsened,
}

/// Outcome of one answered round, for the feedback modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub threat_name: String,
    /// Labels of every defence that would have worked.
    pub correct_action_labels: Vec<String>,
    pub was_correct: bool,
    /// True when the streak bonus paid out this round.
    pub streak_bonus: bool,
    pub explanation: String,
    pub tip: String,
    pub status: RoundStatus,
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEnded {
    pub won: bool,
    pub final_score: u32,
    pub rank: &'static str,
}

/// What happened when the session moved past a resolved round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WaveAdvance {
    /// More waves to play; the adapter schedules the next wave start
    /// (pacing delay is the adapter's concern).
    Continue { wave: u32 },
    Ended(GameEnded),
}

/// Everything a [`PlayerEvent`] can produce for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerOutput {
    WaveStarted(WaveStarted),
    RoundResult(RoundResult),
    WaveAdvance(WaveAdvance),
    DifficultySet(Difficulty),
    WasReset,
}
