use crate::action::{Command, HELP_TEXT, parse_command};
use crate::config::Config;
use crate::system::kill::Terminator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "MEM",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mem" | "memory" => SortMode::Memory,
            _ => SortMode::Cpu,
        }
    }
}

/// Session state. Only the session loop owns it, and only user commands
/// change it.
#[derive(Debug, Clone)]
pub struct App {
    pub running: bool,
    pub sort_mode: SortMode,
    pub top_n: usize,
    pub status_message: Option<String>,
    /// Partially typed command line, echoed under the table.
    pub input_line: String,
}

impl Default for App {
    fn default() -> Self {
        App {
            running: true,
            sort_mode: SortMode::Cpu,
            top_n: 10,
            status_message: None,
            input_line: String::new(),
        }
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            top_n: config.general.top_n.max(1),
            ..App::default()
        }
    }

    /// Parses and applies one line. Empty lines change nothing.
    pub fn interpret(&mut self, line: &str, terminator: &mut dyn Terminator) {
        match parse_command(line) {
            None => {}
            Some(Ok(command)) => self.apply(command, terminator),
            Some(Err(err)) => {
                tracing::debug!(line = line.trim(), %err, "rejected command");
                self.status_message = Some(err.to_string());
            }
        }
    }

    pub fn apply(&mut self, command: Command, terminator: &mut dyn Terminator) {
        tracing::info!(?command, "applying command");
        match command {
            Command::Quit => {
                self.running = false;
            }
            Command::Kill(pid) => {
                let result = terminator.terminate(pid);
                self.status_message = Some(result.status_message());
            }
            Command::Sort(mode) => {
                self.sort_mode = mode;
                let label = match mode {
                    SortMode::Cpu => "CPU",
                    SortMode::Memory => "Memory",
                };
                self.status_message = Some(format!("Sorting by {label}"));
            }
            Command::SetRows(n) => {
                self.top_n = n.max(1);
                self.status_message = Some(format!("topN set to {}", self.top_n));
            }
            Command::Help => {
                self.status_message = Some(HELP_TEXT.to_string());
            }
        }
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
