use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::lesson::Lesson;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub const CARD_HEIGHT: u16 = 9;

pub struct LessonCard<'a> {
    lesson: &'a Lesson,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> LessonCard<'a> {
    pub fn new(lesson: &'a Lesson, selected: bool, theme: &'a Theme) -> Self {
        Self {
            lesson,
            selected,
            theme,
        }
    }
}

impl Widget for LessonCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lesson = self.lesson;
        let dim = lesson.locked;

        let border = if self.selected {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered().border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 5 || inner.width < 10 {
            return;
        }

        let title_fg = if dim { colors.text_pending() } else { colors.fg() };
        let mut title = vec![Span::styled(
            lesson.title.as_str(),
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        )];
        if lesson.completed {
            title.push(Span::styled(" ✓", Style::default().fg(colors.success())));
        }
        Paragraph::new(Line::from(title)).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);

        let badge = format!(" {} ", lesson.difficulty.as_str());
        let badge_x = (inner.x + inner.width).saturating_sub(badge.len() as u16);
        buf.set_string(
            badge_x,
            inner.y,
            &badge,
            Style::default()
                .fg(colors.bg())
                .bg(colors.difficulty(lesson.difficulty)),
        );

        Paragraph::new(lesson.description.as_str())
            .style(Style::default().fg(colors.text_pending()))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y + 1, inner.width, 2), buf);

        let mut details = vec![Span::styled(
            format!("{} min", lesson.estimated_minutes),
            Style::default().fg(colors.text_pending()),
        )];
        if let Some(wpm) = lesson.target_wpm {
            details.push(Span::styled(
                format!("  {wpm} WPM target"),
                Style::default().fg(colors.text_pending()),
            ));
        }
        details.push(Span::styled(
            format!("  [{}]", lesson.category),
            Style::default().fg(colors.accent()),
        ));
        Paragraph::new(Line::from(details))
            .render(Rect::new(inner.x, inner.y + 3, inner.width, 1), buf);

        let progress_row = Rect::new(inner.x, inner.y + 4, inner.width, 1);
        if lesson.is_in_progress() {
            ProgressBar::new("Progress", lesson.progress as f64 / 100.0, self.theme)
                .inline()
                .render(progress_row, buf);
        } else if lesson.locked {
            Paragraph::new("Complete previous lessons to unlock")
                .style(Style::default().fg(colors.text_pending()))
                .alignment(Alignment::Center)
                .render(progress_row, buf);
        }

        if inner.height > 5 {
            let action_style = if lesson.locked {
                Style::default().fg(colors.text_pending()).bg(colors.bar_empty())
            } else if lesson.completed {
                Style::default().fg(colors.bg()).bg(colors.success())
            } else {
                Style::default().fg(colors.bg()).bg(colors.accent())
            };
            let mut label = lesson.action_label().to_string();
            if self.selected && lesson.can_start() {
                label.push_str("  [Enter]");
            }
            Paragraph::new(Span::styled(label, action_style.add_modifier(Modifier::BOLD)))
                .style(action_style)
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1), buf);
        }
    }
}
