use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::profile::{Achievement, AchievementCategory};
use crate::ui::theme::Theme;

/// One achievement as two lines: icon and title with category, then description.
pub fn achievement_lines<'a>(achievement: &'a Achievement, theme: &Theme) -> [Line<'a>; 2] {
    let colors = &theme.colors;
    let category_color = match achievement.category {
        AchievementCategory::Speed => colors.accent(),
        AchievementCategory::Accuracy => colors.success(),
        AchievementCategory::Consistency => colors.warning(),
        AchievementCategory::Milestone => colors.key_pressed(),
    };
    [
        Line::from(vec![
            Span::raw(format!("{} ", achievement.icon)),
            Span::styled(
                achievement.title.as_str(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", achievement.category.as_str()),
                Style::default().fg(category_color),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", achievement.description),
            Style::default().fg(colors.text_pending()),
        )),
    ]
}

/// Full achievements list with unlock dates.
pub struct AchievementList<'a> {
    achievements: &'a [Achievement],
    theme: &'a Theme,
}

impl<'a> AchievementList<'a> {
    pub fn new(achievements: &'a [Achievement], theme: &'a Theme) -> Self {
        Self {
            achievements,
            theme,
        }
    }
}

impl Widget for AchievementList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" Achievements ({}) ", self.achievements.len()))
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.achievements.is_empty() {
            Paragraph::new("Complete lessons to earn achievements!")
                .style(Style::default().fg(colors.text_pending()))
                .alignment(ratatui::layout::Alignment::Center)
                .render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        for achievement in self.achievements {
            let [head, desc] = achievement_lines(achievement, self.theme);
            lines.push(head);
            lines.push(desc);
            lines.push(Line::from(Span::styled(
                format!("   Unlocked {}", achievement.unlocked_at.format("%Y-%m-%d")),
                Style::default().fg(colors.accent_dim()),
            )));
            lines.push(Line::default());
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
