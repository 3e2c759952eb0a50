use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::profile::{ProgressStats, format_minutes};
use crate::ui::components::achievements::achievement_lines;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Level card, stat tiles, course progress, recent achievements and sessions.
pub struct ProgressDashboard<'a> {
    stats: &'a ProgressStats,
    theme: &'a Theme,
}

impl<'a> ProgressDashboard<'a> {
    pub fn new(stats: &'a ProgressStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }

    fn render_level(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.stats;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Level {}", s.level),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Stenographer", Style::default().fg(colors.text_pending())),
        ]))
        .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
        let xp = format!("{} XP", s.experience);
        let xp_x = (inner.x + inner.width).saturating_sub(xp.len() as u16);
        buf.set_string(
            xp_x,
            inner.y,
            &xp,
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        );

        let needed = s.experience_to_next.saturating_sub(s.experience);
        let bar = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        ProgressBar::new(
            &format!("Next Level: {needed} XP needed"),
            s.level_progress() / 100.0,
            self.theme,
        )
        .inline()
        .render(bar, buf);
    }

    fn render_tiles(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.stats;
        let tiles = [
            (s.average_wpm.to_string(), "Avg WPM", colors.accent()),
            (format!("{}%", s.average_accuracy), "Accuracy", colors.success()),
            (format_minutes(s.total_practice_minutes), "Practice Time", colors.key_pressed()),
            (s.streak.to_string(), "Day Streak", colors.warning()),
        ];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        for ((value, label, color), cell) in tiles.iter().zip(cells.iter()) {
            let block = Block::bordered().border_style(Style::default().fg(colors.border()));
            let inner = block.inner(*cell);
            block.render(*cell, buf);
            Paragraph::new(vec![
                Line::from(Span::styled(
                    value.as_str(),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(colors.text_pending()))),
            ])
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }

    fn render_course(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.stats;
        let block = Block::bordered()
            .title(" Course Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }
        let label = format!("Lessons Completed {} / {}", s.lessons_completed, s.total_lessons);
        ProgressBar::new(&label, s.course_progress() / 100.0, self.theme)
            .inline()
            .fill(colors.success())
            .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
    }

    fn render_achievements(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Recent Achievements ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let top = self.stats.top_achievements();
        if top.is_empty() {
            Paragraph::new("Complete lessons to earn achievements!")
                .style(Style::default().fg(colors.text_pending()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }
        let lines: Vec<Line> = top
            .iter()
            .flat_map(|a| achievement_lines(a, self.theme))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_sessions(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Recent Practice ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let sessions = self.stats.latest_sessions();
        if sessions.is_empty() {
            Paragraph::new("No practice sessions yet. Start your first lesson!")
                .style(Style::default().fg(colors.text_pending()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }
        let mut lines = Vec::new();
        for session in sessions {
            lines.push(Line::from(vec![
                Span::styled(
                    session.lesson_title.as_str(),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", session.date.format("%Y-%m-%d")),
                    Style::default().fg(colors.text_pending()),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled(format!("  {} WPM", session.wpm), Style::default().fg(colors.accent())),
                Span::styled(
                    format!("  {}% ACC", session.accuracy),
                    Style::default().fg(colors.accuracy(session.accuracy as f64)),
                ),
                Span::styled(
                    format!("  {}", format_minutes(session.duration_minutes)),
                    Style::default().fg(colors.text_pending()),
                ),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for ProgressDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(area);

        self.render_level(rows[0], buf);
        self.render_tiles(rows[1], buf);
        self.render_course(rows[2], buf);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        self.render_achievements(bottom[0], buf);
        self.render_sessions(bottom[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_sample_profile() {
        let theme = Theme::default();
        let stats = ProgressStats::sample();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        ProgressDashboard::new(&stats, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains(&format!("Level {}", stats.level)));
        assert!(text.contains("Avg WPM"));
        assert!(text.contains("Day Streak"));
        assert!(text.contains(&format!(
            "Lessons Completed {} / {}",
            stats.lessons_completed, stats.total_lessons
        )));
        assert!(text.contains("Recent Practice"));
        assert!(text.contains(&stats.recent_sessions[0].lesson_title));
    }

    #[test]
    fn empty_profile_shows_prompts() {
        let theme = Theme::default();
        let mut stats = ProgressStats::sample();
        stats.achievements.clear();
        stats.recent_sessions.clear();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        ProgressDashboard::new(&stats, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains("Complete lessons to earn achievements!"));
        assert!(text.contains("No practice sessions yet."));
    }
}
