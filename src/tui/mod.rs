//! Terminal User Interface
//!
//! Renders the simulated desktop with ratatui: HUD, threat windows,
//! the defence menu, toasts, and the feedback/end modals.

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            info: Color::Blue,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                                                               ║
║   ██████╗ ███████╗███████╗██╗  ██╗████████╗ ██████╗ ██████╗   ║
║   ██╔══██╗██╔════╝██╔════╝██║ ██╔╝╚══██╔══╝██╔═══██╗██╔══██╗  ║
║   ██║  ██║█████╗  ███████╗█████╔╝    ██║   ██║   ██║██████╔╝  ║
║   ██║  ██║██╔══╝  ╚════██║██╔═██╗    ██║   ██║   ██║██╔═══╝   ║
║   ██████╔╝███████╗███████║██║  ██╗   ██║   ╚██████╔╝██║       ║
║   ╚═════╝ ╚══════╝╚══════╝╚═╝  ╚═╝   ╚═╝    ╚═════╝ ╚═╝       ║
║                                                               ║
║   ██████╗ ███████╗███████╗███████╗███╗   ██╗██████╗ ███████╗  ║
║   ██╔══██╗██╔════╝██╔════╝██╔════╝████╗  ██║██╔══██╗██╔════╝  ║
║   ██║  ██║█████╗  █████╗  █████╗  ██╔██╗ ██║██║  ██║█████╗    ║
║   ██║  ██║██╔══╝  ██╔══╝  ██╔══╝  ██║╚██╗██║██║  ██║██╔══╝    ║
║   ██████╔╝███████╗██║     ███████╗██║ ╚████║██████╔╝███████╗  ║
║   ╚═════╝ ╚══════╝╚═╝     ╚══════╝╚═╝  ╚═══╝╚═════╝ ╚══════╝  ║
║                                                               ║
║           Match the right defence to every threat             ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DESKTOP DEFENDER ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓  Choose a defensive action                               ║
║  Enter Deploy the selected defence / Confirm                  ║
║  n     Next wave (from the feedback screen)                   ║
║  d     Toggle difficulty (title screen)                       ║
║  r     Restart after the run ends                             ║
║  ?     Toggle this help                                       ║
║  Esc   Dismiss help / back to title                           ║
║  q     Quit (title or end screen)                             ║
╠═══════════════════════════════════════════════════════════════╣
║                       HOW TO PLAY                             ║
╠═══════════════════════════════════════════════════════════════╣
║  A threat appears in one of the desktop windows each wave.    ║
║  Read the hint toast, then pick the defence that matches.     ║
║  Correct: +10 points, +5 more once your streak reaches 2.     ║
║  Wrong: system health drops (15 easy / 20 standard).          ║
║  Survive six waves to secure the system.                      ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout: header HUD, desktop, toast log
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),   // HUD
            Constraint::Min(12),     // Desktop + actions
            Constraint::Length(6),   // Notifications
        ])
        .split(area)
        .to_vec()
}

/// Create the desktop layout (threat window + security console)
pub fn create_desktop_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),  // Active threat window
            Constraint::Percentage(45),  // Security actions
        ])
        .split(area)
        .to_vec()
}

/// Text recreation of the window a threat opens on the desktop.
///
/// Keyed by threat id so the catalog stays pure data; unknown ids get a
/// calm, empty desktop.
pub fn threat_window_lines(threat_id: &str) -> Vec<String> {
    let lines: &[&str] = match threat_id {
        "phishing" => &[
            "From:    School IT <support@example.com>",
            "Subject: Immediate password reset required",
            "",
            "We noticed suspicious activity. Click the button",
            "below to keep your account active.",
            "",
            "        [ Verify account ]",
            "",
            "Link preview: http://school-support.example.com",
        ],
        "adware" => &[
            "Warning: Your browser was redirected to an ad site.",
            "",
            "  ┌──────────────────────────────────────────┐",
            "  │ \"You are the 1,000,000th visitor!        │",
            "  │  Claim prize now!\"                       │",
            "  └──────────────────────────────────────────┘",
            "  ┌──────────────────────────────────────────┐",
            "  │ \"Download booster pack\" (blocked)        │",
            "  └──────────────────────────────────────────┘",
        ],
        "ransomware" => &[
            "Files: All documents show a lock icon.",
            "",
            "  Homework.docx  (locked)",
            "  Project.pptx   (locked)",
            "  Photos.zip     (locked)",
        ],
        "bruteforce" => &[
            "Security log",
            "",
            "  ALERT: 42 login attempts in 5 minutes.",
            "  Account lock imminent.",
            "",
            "  Last attempt: admin / ********",
        ],
        "botnet" => &[
            "Network Monitor: Outbound traffic is 6x normal.",
            "",
            "  Multiple unknown connections detected.",
            "  ▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲  outbound",
            "  ▲▲▲                       baseline",
        ],
        _ => &["No alerts. The desktop is quiet."],
    };
    lines.iter().map(|l| l.to_string()).collect()
}

/// The ransom note shown over the files window.
pub fn ransom_note_lines() -> Vec<String> {
    vec![
        "Your files have been locked.".to_string(),
        "Pay 3.5 credits to unlock.".to_string(),
        "".to_string(),
        "Countdown: 02:15:09".to_string(),
        "Contact: unlock@payme.example.com".to_string(),
    ]
}
