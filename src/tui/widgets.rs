//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A gauge for system health, colored by how much is left.
pub struct HealthGauge {
    value: u32,
    max: u32,
    label: String,
    warning_threshold: u32,
    danger_threshold: u32,
}

impl HealthGauge {
    pub fn new(label: &str, value: u32, max: u32) -> Self {
        Self {
            value,
            max,
            label: label.to_string(),
            warning_threshold: 50,
            danger_threshold: 25,
        }
    }

    pub fn warning_threshold(mut self, threshold: u32) -> Self {
        self.warning_threshold = threshold;
        self
    }

    pub fn danger_threshold(mut self, threshold: u32) -> Self {
        self.danger_threshold = threshold;
        self
    }
}

impl Widget for HealthGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        // Low health is the dangerous direction here.
        let color = if self.value <= self.danger_threshold {
            Color::Red
        } else if self.value <= self.warning_threshold {
            Color::Yellow
        } else {
            Color::Green
        };

        let filled = (self.value as u16 * (area.width - 2)) / self.max.max(1) as u16;

        let label = format!("{}: {}%", self.label, self.value);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..(area.width - 2) {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Double-line bordered box for the ransom note and end-of-run banners.
pub struct DramaticBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl DramaticBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for DramaticBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);

        buf.set_string(area.x, area.y, "╔", style);
        for x in 1..area.width - 1 {
            buf.set_string(area.x + x, area.y, "═", style);
        }
        buf.set_string(area.x + area.width - 1, area.y, "╗", style);

        if self.title.len() + 2 < area.width as usize {
            let title_start = (area.width as usize - self.title.len() - 2) / 2;
            buf.set_string(
                area.x + title_start as u16,
                area.y,
                format!(" {} ", self.title),
                style,
            );
        }

        for y in 1..area.height - 1 {
            buf.set_string(area.x, area.y + y, "║", style);
            buf.set_string(area.x + area.width - 1, area.y + y, "║", style);
        }

        buf.set_string(area.x, area.y + area.height - 1, "╚", style);
        for x in 1..area.width - 1 {
            buf.set_string(area.x + x, area.y + area.height - 1, "═", style);
        }
        buf.set_string(area.x + area.width - 1, area.y + area.height - 1, "╝", style);

        for (i, line) in self.content.iter().enumerate() {
            if i as u16 + 1 < area.height - 1 {
                buf.set_string(
                    area.x + 2,
                    area.y + 1 + i as u16,
                    line,
                    Style::default().fg(Color::White),
                );
            }
        }
    }
}
