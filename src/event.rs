use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A completed command line.
    Line(String),
    /// The partially typed line changed.
    Edit(String),
    Resize,
}

/// Assembles key presses into command lines. Raw mode disables the
/// terminal's own line editing, so this does it instead.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.buffer.clear();
            return Some(InputEvent::Line("q".to_string()));
        }

        match key.code {
            KeyCode::Enter => Some(InputEvent::Line(std::mem::take(&mut self.buffer))),
            KeyCode::Backspace => {
                self.buffer.pop()?;
                Some(InputEvent::Edit(self.buffer.clone()))
            }
            KeyCode::Esc => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                Some(InputEvent::Edit(String::new()))
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                Some(InputEvent::Edit(self.buffer.clone()))
            }
            _ => None,
        }
    }
}

/// Watches the terminal on a task of the current runtime and forwards input
/// to the session loop, which drains it without blocking.
pub struct InputHandler {
    rx: mpsc::UnboundedReceiver<InputEvent>,
    _task: tokio::task::JoinHandle<()>,
}

impl InputHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<InputEvent>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut editor = LineEditor::default();

            while let Some(maybe_event) = reader.next().await {
                let mapped = match maybe_event {
                    Ok(CrosstermEvent::Key(key)) => editor.handle_key(key),
                    Ok(CrosstermEvent::Resize(_, _)) => Some(InputEvent::Resize),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::warn!(%err, "terminal input stream failed");
                        break;
                    }
                };
                if let Some(e) = mapped
                    && tx.send(e).is_err()
                {
                    break;
                }
            }
        });

        Self { rx, _task: task }
    }

    pub fn receiver(&mut self) -> &mut mpsc::UnboundedReceiver<InputEvent> {
        &mut self.rx
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            editor.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_completes_line() {
        let mut editor = LineEditor::default();
        type_str(&mut editor, "n 5");
        assert_eq!(
            editor.handle_key(press(KeyCode::Enter)),
            Some(InputEvent::Line("n 5".into()))
        );
        // buffer is reset afterwards
        assert_eq!(
            editor.handle_key(press(KeyCode::Enter)),
            Some(InputEvent::Line(String::new()))
        );
    }

    #[test]
    fn typing_reports_edits() {
        let mut editor = LineEditor::default();
        assert_eq!(
            editor.handle_key(press(KeyCode::Char('k'))),
            Some(InputEvent::Edit("k".into()))
        );
        assert_eq!(
            editor.handle_key(press(KeyCode::Backspace)),
            Some(InputEvent::Edit(String::new()))
        );
        assert_eq!(editor.handle_key(press(KeyCode::Backspace)), None);
    }

    #[test]
    fn escape_discards_partial_line() {
        let mut editor = LineEditor::default();
        type_str(&mut editor, "k 12");
        assert_eq!(
            editor.handle_key(press(KeyCode::Esc)),
            Some(InputEvent::Edit(String::new()))
        );
        assert_eq!(
            editor.handle_key(press(KeyCode::Enter)),
            Some(InputEvent::Line(String::new()))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let mut editor = LineEditor::default();
        type_str(&mut editor, "s me");
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(editor.handle_key(key), Some(InputEvent::Line("q".into())));
    }

    #[test]
    fn releases_are_ignored() {
        let mut editor = LineEditor::default();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        assert_eq!(editor.handle_key(key), None);
    }
}
