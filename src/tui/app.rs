//! Main application state and rendering

use crate::data::Difficulty;
use crate::game::{
    ControllerOutput, GameEnded, PlayerEvent, RoundResult, RoundStatus, WaveAdvance,
    WaveController, WaveStarted, WAVE_CAP,
};
use crate::tui::widgets::{DramaticBox, HealthGauge};
use crate::tui::{
    create_desktop_layout, create_main_layout, ransom_note_lines, styled_block,
    threat_window_lines, Theme, HELP_TEXT, LOGO, SMALL_LOGO,
};
use crate::Catalog;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Delay between a resolved round and the next threat's appearance.
const NEXT_WAVE_DELAY: Duration = Duration::from_millis(800);

/// How many toasts stay in the notification log.
const MAX_TOASTS: usize = 24;

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    Feedback,
    GameOver,
}

/// Application state
pub struct App {
    pub controller: WaveController,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub screen: Screen,
    pub action_state: ListState,
    pub toasts: Vec<String>,
    pub status_line: String,
    pub current_wave: Option<WaveStarted>,
    pub last_result: Option<RoundResult>,
    pub ended: Option<GameEnded>,
    next_wave_at: Option<Instant>,
    rng: StdRng,
}

impl App {
    pub fn new() -> crate::Result<Self> {
        let catalog = Catalog::builtin()?;
        let mut action_state = ListState::default();
        action_state.select(Some(0));

        Ok(Self {
            controller: WaveController::new(catalog),
            theme: Theme::default(),
            running: true,
            show_help: false,
            screen: Screen::Title,
            action_state,
            toasts: Vec::new(),
            status_line: "System stable".to_string(),
            current_wave: None,
            last_result: None,
            ended: None,
            next_wave_at: None,
            rng: StdRng::from_entropy(),
        })
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toasts.push(message.into());
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    /// Kick off the next wave and surface its hint as a toast.
    fn start_wave(&mut self) {
        let result = self.controller.apply(PlayerEvent::StartGame, &mut self.rng);
        if let Ok(ControllerOutput::WaveStarted(started)) = result {
            self.status_line = "Threat detected".to_string();
            if let Some(alert) = threat_alert_toast(&started.threat_id) {
                self.toast(alert);
            }
            self.toast(started.hint.clone());
            self.current_wave = Some(started);
            self.action_state.select(Some(0));
        }
        // Wrong-phase starts are rejected by the controller; nothing to do.
        self.next_wave_at = None;
    }

    fn submit_selected(&mut self) {
        let Some(index) = self.action_state.selected() else {
            return;
        };
        let Some(action) = self.controller.catalog().actions().get(index) else {
            return;
        };
        let event = PlayerEvent::SubmitAction(action.id.clone());
        if let Ok(ControllerOutput::RoundResult(result)) =
            self.controller.apply(event, &mut self.rng)
        {
            self.status_line = match result.status {
                RoundStatus::Contained => "Threat contained".to_string(),
                RoundStatus::Worsened => "Infection worsened".to_string(),
            };
            self.last_result = Some(result);
            self.screen = Screen::Feedback;
        }
    }

    fn advance_wave(&mut self) {
        match self.controller.apply(PlayerEvent::AdvanceWave, &mut self.rng) {
            Ok(ControllerOutput::WaveAdvance(WaveAdvance::Continue { .. })) => {
                self.current_wave = None;
                self.last_result = None;
                self.status_line = "Scanning for threats...".to_string();
                self.screen = Screen::Playing;
                self.next_wave_at = Some(Instant::now() + NEXT_WAVE_DELAY);
            }
            Ok(ControllerOutput::WaveAdvance(WaveAdvance::Ended(ended))) => {
                self.current_wave = None;
                self.last_result = None;
                self.ended = Some(ended);
                self.screen = Screen::GameOver;
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        let _ = self.controller.apply(PlayerEvent::Reset, &mut self.rng);
        self.toasts.clear();
        self.ended = None;
        self.last_result = None;
        self.current_wave = None;
        self.status_line = "System stable".to_string();
        self.screen = Screen::Playing;
        self.start_wave();
    }

    fn toggle_difficulty(&mut self) {
        let next = match self.controller.session().difficulty {
            Difficulty::Easy => Difficulty::Standard,
            Difficulty::Standard => Difficulty::Easy,
        };
        let _ = self
            .controller
            .apply(PlayerEvent::SetDifficulty(next), &mut self.rng);
        self.toast(format!("Difficulty set to {next}."));
    }

    /// Handle keyboard input and the wave pacing timer.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if let Some(due) = self.next_wave_at {
            if Instant::now() >= due && self.screen == Screen::Playing {
                self.start_wave();
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                match key.code {
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                        return Ok(true);
                    }
                    KeyCode::Esc if self.show_help => {
                        self.show_help = false;
                        return Ok(true);
                    }
                    _ => {}
                }

                match self.screen {
                    Screen::Title => match key.code {
                        KeyCode::Char('q') => {
                            self.running = false;
                            return Ok(false);
                        }
                        KeyCode::Char('d') | KeyCode::Up | KeyCode::Down => {
                            self.toggle_difficulty();
                        }
                        KeyCode::Enter => {
                            self.screen = Screen::Playing;
                            self.start_wave();
                        }
                        _ => {}
                    },
                    Screen::Playing => match key.code {
                        KeyCode::Up => self.navigate_actions(-1),
                        KeyCode::Down => self.navigate_actions(1),
                        KeyCode::Enter => self.submit_selected(),
                        KeyCode::Esc => {
                            // Abandon the run.
                            let _ = self.controller.apply(PlayerEvent::Reset, &mut self.rng);
                            self.toasts.clear();
                            self.current_wave = None;
                            self.next_wave_at = None;
                            self.status_line = "System stable".to_string();
                            self.screen = Screen::Title;
                        }
                        _ => {}
                    },
                    Screen::Feedback => match key.code {
                        KeyCode::Enter | KeyCode::Char('n') => self.advance_wave(),
                        _ => {}
                    },
                    Screen::GameOver => match key.code {
                        KeyCode::Char('r') => self.restart(),
                        KeyCode::Char('q') => {
                            self.running = false;
                            return Ok(false);
                        }
                        _ => {}
                    },
                }
            }
        }
        Ok(true)
    }

    fn navigate_actions(&mut self, delta: i32) {
        let len = self.controller.catalog().actions().len();
        if len == 0 {
            return;
        }
        let current = self.action_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(len as i32) as usize;
        self.action_state.select(Some(next));
    }

    /// Render the current frame.
    pub fn render(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Title => self.render_title(frame),
            Screen::Playing | Screen::Feedback | Screen::GameOver => {
                self.render_desktop(frame);
                if self.screen == Screen::Feedback {
                    self.render_feedback_modal(frame);
                }
                if self.screen == Screen::GameOver {
                    self.render_end_modal(frame);
                }
            }
        }

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(20),
                Constraint::Length(4),
                Constraint::Min(1),
            ])
            .split(area);

        let logo = Paragraph::new(LOGO)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.accent));
        frame.render_widget(logo, chunks[0]);

        let difficulty = self.controller.session().difficulty;
        let menu = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Difficulty: "),
                Span::styled(
                    difficulty.label(),
                    Style::default()
                        .fg(self.theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  (d to change)"),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: start shift    ?: help    q: quit",
                Style::default().fg(self.theme.fg),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(menu, chunks[1]);
    }

    fn render_desktop(&mut self, frame: &mut Frame) {
        let chunks = create_main_layout(frame.size());
        self.render_hud(frame, chunks[0]);

        let desktop = create_desktop_layout(chunks[1]);
        self.render_threat_window(frame, desktop[0]);
        self.render_actions(frame, desktop[1]);
        self.render_toasts(frame, chunks[2]);
    }

    fn render_hud(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block(SMALL_LOGO, &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(20)])
            .split(inner);

        let session = self.controller.session();
        frame.render_widget(
            HealthGauge::new("System Health", session.health, 100),
            cols[0],
        );

        let clock = chrono::Local::now().format("%H:%M");
        let buffs = session.buffs;
        let buff_span = |on: bool, label: &'static str| {
            if on {
                Span::styled(label, Style::default().fg(self.theme.success))
            } else {
                Span::styled(label, Style::default().fg(self.theme.border))
            }
        };
        let info = Paragraph::new(vec![
            Line::from(format!(
                "Score: {}   Wave: {}/{}   Difficulty: {}   {}",
                session.score, session.wave, WAVE_CAP, session.difficulty, clock
            )),
            Line::from(vec![
                Span::styled(
                    format!("{}  ", self.status_line),
                    Style::default()
                        .fg(self.theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                buff_span(buffs.training, "[training] "),
                buff_span(buffs.updates, "[updates] "),
                buff_span(buffs.two_fa, "[2FA]"),
            ]),
        ]);
        frame.render_widget(info, cols[1]);
    }

    fn render_threat_window(&self, frame: &mut Frame, area: Rect) {
        let (title, lines, is_ransom) = match &self.current_wave {
            Some(wave) => (
                wave.panel.title(),
                threat_window_lines(&wave.threat_id),
                wave.threat_id == "ransomware",
            ),
            None => ("Desktop", threat_window_lines(""), false),
        };

        let block = styled_block(title, &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);

        if is_ransom {
            let note = centered_rect(70, 50, inner);
            frame.render_widget(Clear, note);
            frame.render_widget(
                DramaticBox::new("FILES ENCRYPTED")
                    .content(ransom_note_lines())
                    .border_color(self.theme.alert),
                note,
            );
        }
    }

    fn render_actions(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .controller
            .catalog()
            .actions()
            .iter()
            .map(|action| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        action.label.clone(),
                        Style::default().fg(self.theme.fg),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", action.description),
                        Style::default().fg(self.theme.border),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(styled_block("Security Console", &self.theme))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.action_state);
    }

    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("Notifications", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = inner.height as usize;
        let start = self.toasts.len().saturating_sub(visible);
        let lines: Vec<Line> = self.toasts[start..]
            .iter()
            .map(|t| Line::from(Span::styled(format!("• {t}"), Style::default().fg(self.theme.info))))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_feedback_modal(&self, frame: &mut Frame) {
        let Some(result) = &self.last_result else {
            return;
        };
        let area = centered_rect(64, 60, frame.size());
        frame.render_widget(Clear, area);

        let (outcome, color) = if result.was_correct {
            ("Threat blocked.", self.theme.success)
        } else {
            ("Threat spread further.", self.theme.alert)
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Threat identified: ", Style::default().fg(self.theme.accent)),
                Span::raw(result.threat_name.clone()),
            ]),
            Line::from(vec![
                Span::styled("Best defence: ", Style::default().fg(self.theme.accent)),
                Span::raw(result.correct_action_labels.join(" or ")),
            ]),
            Line::from(vec![
                Span::styled("Outcome: ", Style::default().fg(self.theme.accent)),
                Span::styled(outcome, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Why: ", Style::default().fg(self.theme.accent)),
                Span::raw(result.explanation.clone()),
            ]),
            Line::from(vec![
                Span::styled("In future: ", Style::default().fg(self.theme.accent)),
                Span::raw(result.tip.clone()),
            ]),
        ];
        if result.streak_bonus {
            lines.push(Line::from(Span::styled(
                "Streak bonus +5.",
                Style::default().fg(self.theme.success),
            )));
        }
        if !result.was_correct {
            lines.push(Line::from(Span::styled(
                "That defence did not match the threat.",
                Style::default().fg(self.theme.warning),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Next wave",
            Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD),
        )));

        let modal = Paragraph::new(lines)
            .block(styled_block("Wave Report", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(modal, area);
    }

    fn render_end_modal(&self, frame: &mut Frame) {
        let Some(ended) = &self.ended else {
            return;
        };
        let area = centered_rect(56, 45, frame.size());
        frame.render_widget(Clear, area);

        let (title, message, color) = if ended.won {
            (
                "SYSTEM SECURED",
                "Great work! You matched the right defences to each threat.",
                self.theme.success,
            )
        } else {
            (
                "SYSTEM COMPROMISED",
                "System Health reached zero. Review the feedback and try again.",
                self.theme.alert,
            )
        };

        frame.render_widget(
            DramaticBox::new(title)
                .content(vec![
                    message.to_string(),
                    String::new(),
                    format!("Final score: {}", ended.final_score),
                    format!("Detective Rank: {}", ended.rank),
                    String::new(),
                    "[r] Restart    [q] Quit".to_string(),
                ])
                .border_color(color),
            area,
        );
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, 80, frame.size());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(HELP_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.fg));
        frame.render_widget(help, area);
    }
}

/// The alert toast some threats pop alongside their window.
fn threat_alert_toast(threat_id: &str) -> Option<&'static str> {
    match threat_id {
        "adware" => Some("Adware is opening pop-ups in the browser."),
        "bruteforce" => Some("Alert: 42 login attempts in 5 minutes. Account lock soon."),
        "botnet" => Some("Unusual outbound traffic detected."),
        _ => None,
    }
}

/// A centered sub-rectangle sized as a percentage of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
