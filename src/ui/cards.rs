use crate::app::{App, Focus};
use crate::ui::card::{self, CardView};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

pub const TEST_ID: &str = "cards";

const CARD_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 9;

/// Number of card columns that fit in `width`.
pub fn columns_for(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// First grid row to draw so that `selected` stays on screen.
fn first_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let row = selected / columns;
    row.saturating_sub(visible_rows.saturating_sub(1))
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let courses = app.visible_courses();
    let selected = app.selected_card();
    let focused = app.focus == Focus::Cards;
    let summary = match app.cards.as_ref().map(|c| &c.liked) {
        Some(liked) if !liked.is_empty() => format!(" {} courses, {} liked ", courses.len(), liked.len()),
        _ => format!(" {} courses ", courses.len()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray }))
        .title(format!(" {} ", app.category))
        .title_bottom(
            Line::from(summary).alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if courses.is_empty() {
        let empty = Paragraph::new("No courses to show")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let columns = columns_for(inner.width);
    let visible_rows = ((inner.height / CARD_HEIGHT) as usize).max(1);
    let start_row = first_row(selected, columns, visible_rows);
    let card_width = inner.width / columns as u16;

    for (i, course) in courses.iter().enumerate().skip(start_row * columns) {
        let row = i / columns - start_row;
        if row >= visible_rows {
            break;
        }
        let col = i % columns;
        let y = inner.y + row as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(inner.y + inner.height - y);
        let cell = Rect::new(inner.x + col as u16 * card_width, y, card_width, height);

        let view = CardView::new(course, app.is_liked(&course.id));
        card::render(&view, focused && i == selected, frame, cell);
    }
}
