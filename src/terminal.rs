use std::io::stdout;

use color_eyre::Result;
use crossterm::cursor::Show;
use crossterm::execute;
use ratatui::DefaultTerminal;

/// Raw mode, alternate screen and a hidden cursor for as long as the guard
/// lives. Dropping it restores the terminal on every exit path.
pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        let mut terminal = ratatui::try_init()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore();
            original_hook(panic_info);
        }));

        if let Err(err) = terminal.hide_cursor() {
            restore();
            return Err(err.into());
        }
        tracing::debug!("terminal raw mode acquired");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
        tracing::debug!("terminal restored");
    }
}

fn restore() {
    ratatui::restore();
    let _ = execute!(stdout(), Show);
}
