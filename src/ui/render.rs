//! Frame formatting. Everything here is a pure function of session state and
//! the latest sample; drawing to the terminal happens in [`super::draw`].

use std::cmp::Ordering;

use ratatui::text::{Line, Span, Text};

use crate::app::{App, SortMode};
use crate::format::{format_mb, pad_right, truncate_unicode};
use crate::system::process::ProcessRow;
use crate::system::snapshot::Sample;
use crate::ui::theme::{Severity, Theme};

pub const NAME_WIDTH: usize = 23;

const TITLE: &str = "================== System Monitor ==================";
const LEGEND: &str = "Commands: q (quit) | k <PID> (kill) | s cpu | s mem | n <N> (top N) | h (help)";
const RULE: &str = "----------------------------------------------------";
const IDLE_HINT: &str = "Type 'h' for help. Commands are non-blocking and processed between refreshes.";

/// Orders rows for display and keeps the first `top_n`.
pub fn rank(processes: &[ProcessRow], sort_mode: SortMode, top_n: usize) -> Vec<&ProcessRow> {
    let mut ranked: Vec<&ProcessRow> = processes.iter().collect();
    ranked.sort_by(|a, b| compare(a, b, sort_mode));
    ranked.truncate(top_n);
    ranked
}

fn compare(a: &ProcessRow, b: &ProcessRow, sort_mode: SortMode) -> Ordering {
    let (primary, secondary) = match sort_mode {
        SortMode::Cpu => (
            b.cpu_percent.total_cmp(&a.cpu_percent),
            b.mem_percent.total_cmp(&a.mem_percent),
        ),
        SortMode::Memory => (
            b.mem_percent.total_cmp(&a.mem_percent),
            b.cpu_percent.total_cmp(&a.cpu_percent),
        ),
    };
    primary.then(secondary)
}

pub fn render(state: &App, sample: &Sample, theme: &Theme) -> Text<'static> {
    let shown = rank(&sample.processes, state.sort_mode, state.top_n);
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(shown.len() + 12);

    lines.push(Line::from(TITLE).style(theme.title));
    lines.push(Line::raw(LEGEND));
    lines.push(Line::raw(format!(
        "Current: sort={} | topN={}",
        state.sort_mode.label(),
        state.top_n
    )));
    lines.push(Line::raw(format!(
        "Time: {}",
        sample.taken_at.format("%Y-%m-%d %H:%M:%S")
    )));
    lines.push(Line::raw(format!(
        "CPU Usage (overall): {:.2}%    Memory Usage: {:.2}% ({} total)",
        sample.cpu_percent,
        sample.memory.used_percent(),
        format_mb(sample.memory.total_kb)
    )));
    lines.push(Line::raw(RULE));
    lines.push(Line::raw(format!(
        "{:<8}{:<25}{:<12}{:<10}{:<12}",
        "PID", "Name", "CPU(%)", "Mem(%)", "RSS(KB)"
    )));
    lines.push(Line::raw(RULE));

    for row in shown {
        lines.push(process_line(row, theme));
    }

    lines.push(Line::raw(RULE));
    lines.push(match &state.status_message {
        Some(msg) => Line::from(format!("-- {msg}")).style(theme.status),
        None => Line::raw(IDLE_HINT),
    });
    lines.push(Line::from(vec![
        Span::styled("> ", theme.prompt),
        Span::raw(state.input_line.clone()),
        Span::styled("\u{2588}", theme.prompt),
    ]));

    Text::from(lines)
}

fn process_line(row: &ProcessRow, theme: &Theme) -> Line<'static> {
    let name = pad_right(&truncate_unicode(&row.name, NAME_WIDTH), 25);
    let text = format!(
        "{:<8}{}{:<12.2}{:<10.2}{:<12}",
        row.pid, name, row.cpu_percent, row.mem_percent, row.rss_kb
    );
    Line::from(text).style(theme.severity(Severity::for_cpu(row.cpu_percent)))
}
