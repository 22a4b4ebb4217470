mod card;
mod cards;
mod filter;
mod help;
mod navbar;
mod spinner;
mod toast;

use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Top-level render: navbar, filter bar, spinner or card grid, status bar.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    for (id, area) in rendered_test_ids(app).into_iter().zip(chunks.iter().copied()) {
        match id {
            navbar::TEST_ID => navbar::render(frame, area),
            filter::TEST_ID => filter::render(app, frame, area),
            spinner::TEST_ID => spinner::render(app.spinner_frame, frame, area),
            cards::TEST_ID => cards::render(app, frame, area),
            _ => {}
        }
    }
    render_status(app, frame, chunks[3]);

    toast::render(&app.toasts, frame);

    if app.show_help {
        help::render(frame);
    }
}

/// Stable ids of the components the current frame draws, top to bottom.
/// `render` lays out exactly these, in this order.
pub fn rendered_test_ids(app: &App) -> Vec<&'static str> {
    let body = if app.loading {
        spinner::TEST_ID
    } else {
        cards::TEST_ID
    };
    vec![navbar::TEST_ID, filter::TEST_ID, body]
}

/// Cards per grid row for a terminal `width` columns wide.
pub fn grid_columns(width: u16) -> usize {
    cards::columns_for(width.saturating_sub(2))
}

fn render_status(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let focus_hint = match app.focus {
        Focus::Filter => " ←→ Category  Enter Apply  ",
        Focus::Cards => " ↑↓←→ Move  Space Like  ",
    };
    let status_line = Line::from(vec![
        Span::styled(" Tab", key),
        Span::raw(" Focus "),
        Span::raw(focus_hint),
        Span::styled("1-9", key),
        Span::raw(" Category  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(app.status_msg.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// Truncate a string to `max_width` terminal columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}


#[cfg(test)]
mod tests {
    use super::test_support::draw_to_string;
    use super::*;
    use crate::catalog::grouped_sample;
    use crate::config::CatalogConfig;
    use crate::fetch::FetchError;

    #[test]
    fn test_loading_frame_shows_spinner() {
        let app = App::new(&CatalogConfig::default());
        assert_eq!(rendered_test_ids(&app), vec!["navbar", "filter", "spinner"]);

        let screen = draw_to_string(100, 30, |f| render(&app, f));
        assert!(screen.contains("Top Courses"));
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Development"));
    }

    #[test]
    fn test_loaded_frame_shows_cards() {
        let mut app = App::new(&CatalogConfig::default());
        app.finish_loading(Ok(grouped_sample()));
        assert_eq!(rendered_test_ids(&app), vec!["navbar", "filter", "cards"]);

        let screen = draw_to_string(100, 30, |f| render(&app, f));
        assert!(!screen.contains("Loading..."));
        assert!(screen.contains("React Course"));
        assert!(screen.contains("Business 101"));
    }

    #[test]
    fn test_error_frame_shows_toast_and_empty_grid() {
        let mut app = App::new(&CatalogConfig::default());
        app.finish_loading(Err(FetchError::Status(500)));
        assert_eq!(rendered_test_ids(&app), vec!["navbar", "filter", "cards"]);

        let screen = draw_to_string(100, 30, |f| render(&app, f));
        assert!(screen.contains("Network Error: API is not responding"));
        assert!(screen.contains("No courses to show"));
    }

    #[test]
    fn test_body_switches_from_spinner_to_cards() {
        let mut app = App::new(&CatalogConfig::default());
        let loading = draw_to_string(100, 30, |f| render(&app, f));
        assert!(loading.contains(spinner::LABEL));
        assert!(!loading.contains("courses "));

        app.finish_loading(Ok(grouped_sample()));
        let loaded = draw_to_string(100, 30, |f| render(&app, f));
        assert!(!loaded.contains(spinner::LABEL));
        assert!(loaded.contains("2 courses"));
        assert!(loaded.contains(navbar::TITLE));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut app = App::new(&CatalogConfig::default());
        app.show_help = true;
        let screen = draw_to_string(100, 40, |f| render(&app, f));
        assert!(screen.contains("Keybindings"));
    }

    #[test]
    fn test_truncate_str_counts_columns() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_str("日本語テキスト", 5), "日本…");
    }
}
