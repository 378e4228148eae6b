use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

/// Installs a file-backed subscriber. The terminal is owned by the
/// dashboard, so with no file configured nothing is installed and every
/// event is discarded.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    if config.file.as_os_str().is_empty() {
        return Ok(false);
    }

    ensure_parent_dir(&config.file)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(parse_level(&config.level))
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(true)
}

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }

    #[test]
    fn empty_path_disables_logging() {
        let config = LoggingConfig::default();
        assert!(!init(&config).unwrap());
    }
}
