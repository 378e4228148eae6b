pub mod render;
pub mod theme;

use ratatui::Frame;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;

/// Repaints the whole screen with one rendered frame.
pub fn draw(frame: &mut Frame, text: Text<'static>) {
    frame.render_widget(Paragraph::new(text), frame.area());
}
