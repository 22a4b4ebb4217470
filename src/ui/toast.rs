use crate::notify::{ToastLevel, ToastQueue};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const TOAST_HEIGHT: u16 = 3;
const MARGIN: u16 = 1;

fn level_style(level: ToastLevel) -> (&'static str, Color) {
    match level {
        ToastLevel::Success => ("✔", Color::Green),
        ToastLevel::Warning => ("!", Color::Yellow),
        ToastLevel::Error => ("✖", Color::Red),
    }
}

/// Stack toasts in the top-right corner, oldest first.
pub fn render(queue: &ToastQueue, frame: &mut Frame) {
    if queue.is_empty() {
        return;
    }
    let area = frame.area();
    let mut y = area.y + MARGIN;

    for toast in queue.iter() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let (icon, color) = level_style(toast.level);
        // icon, spaces and borders
        let wanted = toast.message.width() as u16 + 6;
        let width = wanted.min(area.width.saturating_sub(MARGIN * 2));
        let x = area.x + area.width.saturating_sub(width + MARGIN);
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        frame.render_widget(Clear, rect);
        let body = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::raw(toast.message.as_str()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title_bottom(
                    Line::from(toast.shown_at.format(" %H:%M:%S ").to_string())
                        .style(Style::default().fg(Color::DarkGray))
                        .right_aligned(),
                ),
        );
        frame.render_widget(body, rect);
        y += TOAST_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::ui::test_support::draw_to_string;
    use std::time::Duration;

    #[test]
    fn test_toasts_stack_in_corner() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        queue.success("Liked Successfully");
        queue.warning("Like removed");

        let screen = draw_to_string(80, 12, |f| render(&queue, f));
        let lines: Vec<&str> = screen.lines().collect();
        let liked_row = lines.iter().position(|l| l.contains("Liked Successfully")).unwrap();
        let removed_row = lines.iter().position(|l| l.contains("Like removed")).unwrap();
        assert!(liked_row < removed_row);
        assert!(lines[liked_row].trim_end().ends_with('│'));
    }

    #[test]
    fn test_empty_queue_draws_nothing() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        let screen = draw_to_string(20, 4, |f| render(&queue, f));
        assert!(screen.chars().all(|c| c == ' ' || c == '\n'));
    }
}
