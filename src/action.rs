use std::fmt;

use crate::app::SortMode;

pub const HELP_TEXT: &str = "Commands: q (quit) | k <PID> (SIGTERM) | s cpu|mem (sort) | n <N> (rows) | h (help)";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Kill(u32),
    Sort(SortMode),
    SetRows(usize),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Usage(&'static str),
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => f.write_str(usage),
            CommandError::Unknown(token) => write!(f, "Unknown command: {token}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses one input line. `None` means nothing was typed.
pub fn parse_command(line: &str) -> Option<Result<Command, CommandError>> {
    let mut tokens = line.split_whitespace();
    let token = tokens.next()?;
    let arg = tokens.next();

    let parsed = match token {
        "q" => Ok(Command::Quit),
        "k" => arg
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&pid| pid > 0)
            .map(Command::Kill)
            .ok_or(CommandError::Usage("Usage: k <PID>")),
        "s" => match arg {
            Some("cpu") => Ok(Command::Sort(SortMode::Cpu)),
            Some("mem") => Ok(Command::Sort(SortMode::Memory)),
            _ => Err(CommandError::Usage("Usage: s cpu|mem")),
        },
        "n" => arg
            .and_then(|s| s.parse::<i32>().ok())
            .filter(|&n| n > 0)
            .map(|n| Command::SetRows(n as usize))
            .ok_or(CommandError::Usage("Usage: n <N>")),
        "h" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    };
    Some(parsed)
}
