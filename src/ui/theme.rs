use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::config::ColorsConfig;

/// Display emphasis for a process row. Carries no meaning beyond styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Elevated,
    Critical,
}

impl Severity {
    pub fn for_cpu(cpu_percent: f64) -> Self {
        if cpu_percent >= 50.0 {
            Severity::Critical
        } else if cpu_percent >= 10.0 {
            Severity::Elevated
        } else {
            Severity::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub critical: Style,
    pub elevated: Style,
    pub normal: Style,
    pub status: Style,
    pub prompt: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from_config(&ColorsConfig::default())
    }
}

impl Theme {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        Theme {
            title: bold(Color::Cyan),
            critical: bold(parse_color(&colors.critical, Color::Red)),
            elevated: bold(parse_color(&colors.elevated, Color::Yellow)),
            normal: bold(parse_color(&colors.normal, Color::Green)),
            status: Style::default().add_modifier(Modifier::BOLD),
            prompt: Style::default().fg(Color::Cyan),
        }
    }

    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Critical => self.critical,
            Severity::Elevated => self.elevated,
            Severity::Normal => self.normal,
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value.trim()).unwrap_or(fallback)
}
