//! The immutable threat and action catalog
//!
//! Threats are pure data: what they look like on screen is the TUI's
//! business, keyed by threat id and [`Panel`]. A threat is neutralized
//! by any one of its `correct_actions`.

use super::Panel;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A threat scenario the player must diagnose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    pub id: String,
    pub name: String,
    /// Hint shown on easy difficulty (more explicit).
    pub hint_easy: String,
    /// Hint shown on standard difficulty.
    pub hint_standard: String,
    /// Desktop window this threat manifests in.
    pub panel: Panel,
    /// Action ids that neutralize this threat; any one suffices. Non-empty.
    pub correct_actions: Vec<String>,
    /// Post-round explanation of why the defence works.
    pub explanation: String,
    /// Takeaway advice for the player.
    pub tip: String,
}

impl Threat {
    /// Hint text for the given difficulty.
    pub fn hint(&self, difficulty: super::Difficulty) -> &str {
        match difficulty {
            super::Difficulty::Easy => &self.hint_easy,
            super::Difficulty::Standard => &self.hint_standard,
        }
    }

    /// Whether the given action id neutralizes this threat.
    pub fn is_correct(&self, action_id: &str) -> bool {
        self.correct_actions.iter().any(|id| id == action_id)
    }
}

/// A defensive action the player may choose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// Ordered, immutable lists of threats and actions.
///
/// Built once at startup; a `correct_actions` id with no matching action
/// is a configuration error and aborts initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    threats: Vec<Threat>,
    actions: Vec<Action>,
}

impl Catalog {
    /// Build a catalog, validating referential integrity.
    pub fn new(threats: Vec<Threat>, actions: Vec<Action>) -> Result<Self, GameError> {
        let mut action_ids = HashSet::new();
        for action in &actions {
            if !action_ids.insert(action.id.as_str()) {
                return Err(GameError::InvalidCatalog(format!(
                    "duplicate action id '{}'",
                    action.id
                )));
            }
        }

        let mut threat_ids = HashSet::new();
        for threat in &threats {
            if !threat_ids.insert(threat.id.as_str()) {
                return Err(GameError::InvalidCatalog(format!(
                    "duplicate threat id '{}'",
                    threat.id
                )));
            }
            if threat.correct_actions.is_empty() {
                return Err(GameError::InvalidCatalog(format!(
                    "threat '{}' has no correct actions",
                    threat.id
                )));
            }
            for action_id in &threat.correct_actions {
                if !action_ids.contains(action_id.as_str()) {
                    return Err(GameError::InvalidCatalog(format!(
                        "threat '{}' references unknown action '{}'",
                        threat.id, action_id
                    )));
                }
            }
        }

        Ok(Self { threats, actions })
    }

    /// The built-in five-threat deck and nine defensive actions.
    pub fn builtin() -> Result<Self, GameError> {
        Self::new(builtin_threats(), builtin_actions())
    }

    /// Threats in catalog order.
    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    /// Actions in catalog order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Look up an action by id. Absent ids are not an error.
    pub fn find_action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Look up a threat by id.
    pub fn find_threat(&self, id: &str) -> Option<&Threat> {
        self.threats.iter().find(|t| t.id == id)
    }

    /// Display label for an action id, falling back to the raw id.
    pub fn action_label(&self, id: &str) -> String {
        self.find_action(id)
            .map(|a| a.label.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

fn builtin_threats() -> Vec<Threat> {
    let threat = |id: &str,
                  name: &str,
                  hint_easy: &str,
                  hint_standard: &str,
                  panel: Panel,
                  correct: &[&str],
                  explanation: &str,
                  tip: &str| Threat {
        id: id.to_string(),
        name: name.to_string(),
        hint_easy: hint_easy.to_string(),
        hint_standard: hint_standard.to_string(),
        panel,
        correct_actions: correct.iter().map(|s| s.to_string()).collect(),
        explanation: explanation.to_string(),
        tip: tip.to_string(),
    };

    vec![
        threat(
            "phishing",
            "Phishing Email",
            "Look for a fake message asking you to click urgently.",
            "An urgent request appears in your inbox.",
            Panel::Email,
            &["reportDelete", "staffTraining"],
            "Phishing relies on urgency and fake links. Report and delete the email so no one clicks it.",
            "Hover over links and check the sender before trusting a message.",
        ),
        threat(
            "adware",
            "Adware Pop-ups",
            "Annoying ads keep appearing and the browser redirects.",
            "Unexpected ads and redirect messages show up.",
            Panel::Browser,
            &["antiMalware", "updateSoftware"],
            "Adware hides in unwanted installs. An anti-malware scan removes it.",
            "Only install trusted software and keep your browser updated.",
        ),
        threat(
            "ransomware",
            "Ransomware Lock",
            "Files are locked and a ransom note appears.",
            "A lock screen appears with payment demands.",
            Panel::Files,
            &["restoreBackup", "disconnectNetwork"],
            "Ransomware encrypts files. Restore from backup and isolate the device.",
            "Back up important work to a safe location regularly.",
        ),
        threat(
            "bruteforce",
            "Brute Force Attack",
            "Multiple failed logins trigger an alert.",
            "Login attempts are spiking.",
            Panel::Settings,
            &["enable2fa", "changePassword", "firewallRule"],
            "Attackers guess passwords. Use 2FA and enforce strong passwords.",
            "Create long passphrases and enable login alerts.",
        ),
        threat(
            "botnet",
            "Botnet / Network Compromise",
            "Network meter spikes with unusual outbound traffic.",
            "Outbound traffic is unusually high.",
            Panel::Browser,
            &["firewallRule", "disconnectNetwork"],
            "Botnets use your device to send traffic. Block with firewall rules or disconnect.",
            "Monitor network activity and block unknown connections.",
        ),
    ]
}

fn builtin_actions() -> Vec<Action> {
    let action = |id: &str, label: &str, description: &str| Action {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
    };

    vec![
        action(
            "reportDelete",
            "Report & Delete suspicious email",
            "Flag the message and remove it from inbox.",
        ),
        action(
            "staffTraining",
            "Staff training refresher",
            "Teach people how to spot phishing.",
        ),
        action(
            "antiMalware",
            "Run anti-malware scan",
            "Find and remove unwanted programs.",
        ),
        action(
            "firewallRule",
            "Enable/configure firewall rule",
            "Block suspicious traffic and log attempts.",
        ),
        action("enable2fa", "Turn on 2FA", "Require a second login code."),
        action(
            "updateSoftware",
            "Update software and browser",
            "Patch known security holes.",
        ),
        action(
            "disconnectNetwork",
            "Disconnect from network",
            "Stop spread while investigating.",
        ),
        action(
            "restoreBackup",
            "Restore from backup",
            "Recover safe versions of files.",
        ),
        action(
            "changePassword",
            "Change password + enforce policy",
            "Reset to a strong passphrase.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.threats().len(), 5);
        assert_eq!(catalog.actions().len(), 9);
    }

    #[test]
    fn every_correct_action_resolves_to_a_label() {
        let catalog = Catalog::builtin().unwrap();
        for threat in catalog.threats() {
            for id in &threat.correct_actions {
                assert!(catalog.find_action(id).is_some(), "missing action {id}");
            }
        }
    }

    #[test]
    fn unknown_correct_action_is_fatal() {
        let mut threats = builtin_threats();
        threats[0].correct_actions.push("patchEverything".to_string());
        let err = Catalog::new(threats, builtin_actions()).unwrap_err();
        assert!(matches!(err, GameError::InvalidCatalog(_)));
    }

    #[test]
    fn duplicate_action_id_is_fatal() {
        let mut actions = builtin_actions();
        let dup = actions[0].clone();
        actions.push(dup);
        let err = Catalog::new(builtin_threats(), actions).unwrap_err();
        assert!(matches!(err, GameError::InvalidCatalog(_)));
    }

    #[test]
    fn find_action_absent_returns_none() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.find_action("wearTinfoilHat").is_none());
        assert_eq!(catalog.action_label("wearTinfoilHat"), "wearTinfoilHat");
    }
}
