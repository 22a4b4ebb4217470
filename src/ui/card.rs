use crate::catalog::{truncate_description, Course};
use crate::ui::truncate_str;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Which heart the like button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeIcon {
    Liked,
    Placeholder,
}

impl LikeIcon {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Liked => "♥",
            Self::Placeholder => "♡",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Liked => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Self::Placeholder => Style::default().fg(Color::Gray),
        }
    }
}

/// What a card shows for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub image_src: String,
    pub image_alt: String,
    pub title: String,
    pub description: String,
    pub icon: LikeIcon,
}

impl CardView {
    pub fn new(course: &Course, liked: bool) -> Self {
        Self {
            image_src: course.image.url.clone(),
            image_alt: course.title.clone(),
            title: course.title.clone(),
            description: truncate_description(&course.description),
            icon: if liked {
                LikeIcon::Liked
            } else {
                LikeIcon::Placeholder
            },
        }
    }
}

pub fn render(view: &CardView, selected: bool, frame: &mut Frame, area: Rect) {
    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title_bottom(
            Line::from(Span::styled(format!(" {} ", view.icon.symbol()), view.icon.style()))
                .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let image = if view.image_src.is_empty() {
        format!("[{}]", view.image_alt)
    } else {
        view.image_src.clone()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_str(&image, width),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            truncate_str(&view.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    lines.push(Line::from(view.description.as_str()));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CourseId, ImageRef};
    use crate::ui::test_support::draw_to_string;

    fn sample(description: &str) -> Course {
        Course {
            id: CourseId::Number(1),
            title: "Test Course".to_string(),
            description: description.to_string(),
            image: ImageRef {
                url: "test-image-url".to_string(),
            },
            category: None,
        }
    }

    #[test]
    fn test_view_carries_course_fields() {
        let view = CardView::new(&sample("This is a test course description"), false);
        assert_eq!(view.image_src, "test-image-url");
        assert_eq!(view.image_alt, "Test Course");
        assert_eq!(view.title, "Test Course");
        assert_eq!(view.description, "This is a test course description");
    }

    #[test]
    fn test_view_truncates_long_description() {
        let view = CardView::new(&sample(&"A".repeat(150)), false);
        assert_eq!(view.description, format!("{}...", "A".repeat(100)));
    }

    #[test]
    fn test_icon_follows_liked_state() {
        assert_eq!(CardView::new(&sample("d"), false).icon, LikeIcon::Placeholder);
        assert_eq!(CardView::new(&sample("d"), true).icon, LikeIcon::Liked);
    }

    #[test]
    fn test_render_shows_title_and_icon() {
        let view = CardView::new(&sample("Learn things"), true);
        let screen = draw_to_string(36, 9, |f| {
            let area = f.area();
            render(&view, false, f, area)
        });
        assert!(screen.contains("Test Course"));
        assert!(screen.contains("test-image-url"));
        assert!(screen.contains("Learn things"));
        assert!(screen.contains(LikeIcon::Liked.symbol()));
    }
}
