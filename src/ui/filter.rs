use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const TEST_ID: &str = "filter";

/// One button per category. The active category is filled in, the focused
/// button is underlined while the filter bar has focus.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Filter;

    let mut spans = Vec::with_capacity(app.categories.len() * 2);
    for (i, option) in app.categories.iter().enumerate() {
        let mut style = if option.title == app.category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if focused && i == app.filter_focus {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let label = if i < 9 {
            format!(" {} {} ", i + 1, option.title)
        } else {
            format!(" {} ", option.title)
        };
        spans.push(Span::styled(label, style));
    }

    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Category "),
        );
    frame.render_widget(bar, area);
}
