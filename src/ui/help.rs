use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("Tab", "Switch focus between categories and courses"),
            ("1-9", "Show the numbered category"),
        ],
    ),
    (
        "Categories",
        &[
            ("←/h →/l", "Move between categories"),
            ("Enter", "Show the highlighted category"),
        ],
    ),
    (
        "Courses",
        &[
            ("↑/k ↓/j", "Move between rows"),
            ("←/h →/l", "Move between cards"),
            ("Space/Enter", "Like or unlike the selected course"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (section, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", section),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (keys, action) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help - Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
