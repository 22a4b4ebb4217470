use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

pub const TEST_ID: &str = "spinner";
pub const LABEL: &str = "Loading...";

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Glyph shown for animation step `tick`.
pub fn glyph(tick: usize) -> &'static str {
    FRAMES[tick % FRAMES.len()]
}

pub fn render(tick: usize, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);

    let text = vec![
        Line::from(glyph(tick)).style(Style::default().fg(Color::Cyan)),
        Line::from(LABEL).style(Style::default().add_modifier(Modifier::BOLD)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::draw_to_string;

    #[test]
    fn test_shows_label_and_glyph() {
        let screen = draw_to_string(30, 6, |f| {
            let area = f.area();
            render(0, f, area)
        });
        assert!(screen.contains(LABEL));
        assert!(screen.contains(glyph(0)));
    }

    #[test]
    fn test_glyph_cycles() {
        assert_eq!(glyph(0), glyph(FRAMES.len()));
        assert_ne!(glyph(0), glyph(1));
    }
}
