//! Data structures for the game world
//!
//! Defines the threat/action catalog and the mutable session record.

pub mod catalog;
pub mod session;

pub use catalog::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Which desktop window a threat manifests in.
///
/// Pure presentation key: the core never renders, the TUI picks the
/// window content based on this plus the threat id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Email,
    Browser,
    Files,
    Settings,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Email => "Mail",
            Panel::Browser => "Browser",
            Panel::Files => "My Files",
            Panel::Settings => "Account Settings",
        }
    }
}

/// Difficulty setting: affects hint verbosity and damage per miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Standard,
}

impl Difficulty {
    /// Health lost on an incorrect answer.
    pub fn damage_per_miss(&self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Standard => 20,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Standard => "Standard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
