//! Desktop Defender
//!
//! A cybersecurity awareness mini-game. Each wave, a random threat appears
//! on a simulated desktop (phishing mail, ransomware lock, adware pop-ups,
//! brute force alerts, botnet traffic) and you pick the defensive action
//! that neutralizes it. Correct picks build score and streak bonuses;
//! mismatches drain system health.
//!
//! # Game Mechanics
//!
//! - **Waves**: six rounds, one random threat each
//! - **Streaks**: consecutive correct answers earn bonus points
//! - **Health**: wrong defences damage the system; zero health ends the run
//! - **Difficulty**: easy gives clearer hints and lighter damage
//!
//! # Architecture
//!
//! - `game` - The wave controller state machine and its event contract
//! - `data` - Pure data: the threat/action catalog and the session record
//! - `tui` - Terminal user interface with ratatui

pub mod data;
pub mod game;
pub mod tui;

pub use data::{Action, Catalog, Difficulty, Session, Threat};
pub use game::WaveController;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown threat: {0}")]
    UnknownThreat(String),

    #[error("Invalid game state: {0}")]
    InvalidState(String),
}
