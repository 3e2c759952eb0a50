use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::catalog::volume::{Volume, VolumeFilter, total_estimated_minutes};
use crate::profile::format_minutes;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub const CARD_HEIGHT: u16 = 10;

pub struct VolumeCard<'a> {
    volume: &'a Volume,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> VolumeCard<'a> {
    pub fn new(volume: &'a Volume, selected: bool, theme: &'a Theme) -> Self {
        Self {
            volume,
            selected,
            theme,
        }
    }
}

impl Widget for VolumeCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let v = self.volume;
        let border = if self.selected {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered().border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 6 || inner.width < 12 {
            return;
        }
        let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let muted = Style::default().fg(colors.text_pending());

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" Vol. {} ", v.volume_number),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", v.difficulty.as_str()),
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.difficulty(v.difficulty)),
            ),
        ]))
        .render(row(0), buf);

        let title_fg = if v.available { colors.fg() } else { colors.text_pending() };
        Paragraph::new(Span::styled(
            v.title.as_str(),
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        ))
        .render(row(1), buf);

        Paragraph::new(v.description.as_str())
            .style(muted)
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y + 2, inner.width, 2), buf);

        if !v.topics.is_empty() {
            Paragraph::new(Line::from(vec![
                Span::styled("Topics: ", muted),
                Span::styled(v.topics.join(", "), Style::default().fg(colors.accent_dim())),
            ]))
            .render(row(4), buf);
        }

        let minutes = v
            .estimated_minutes
            .map(|m| format!("{m} min  "))
            .unwrap_or_default();
        Paragraph::new(Span::styled(format!("{minutes}PDF Format"), muted)).render(row(5), buf);

        if inner.height > 7 {
            if v.shows_progress() {
                let ratio = v.progress.unwrap_or(0) as f64 / 100.0;
                ProgressBar::new("Progress", ratio, self.theme)
                    .inline()
                    .render(row(6), buf);
            } else if !v.available {
                Paragraph::new("Volume will be available soon")
                    .style(muted)
                    .alignment(Alignment::Center)
                    .render(row(6), buf);
            }
        }

        let (label, style) = if v.available {
            ("Open Volume", Style::default().fg(colors.bg()).bg(colors.accent()))
        } else {
            (
                "Coming Soon",
                Style::default().fg(colors.text_pending()).bg(colors.bar_empty()),
            )
        };
        Paragraph::new(Span::styled(label, style.add_modifier(Modifier::BOLD)))
            .style(style)
            .alignment(Alignment::Center)
            .render(row(inner.height - 1), buf);
    }
}

/// Totals row plus the filter selector above the volume grid.
pub struct VolumeSummary<'a> {
    volumes: &'a [Volume],
    filter: VolumeFilter,
    theme: &'a Theme,
}

impl<'a> VolumeSummary<'a> {
    pub fn new(volumes: &'a [Volume], filter: VolumeFilter, theme: &'a Theme) -> Self {
        Self {
            volumes,
            filter,
            theme,
        }
    }
}

impl Widget for VolumeSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(1)])
            .split(area);

        let available = self.volumes.iter().filter(|v| v.available).count();
        let levels: HashSet<_> = self.volumes.iter().map(|v| v.difficulty).collect();
        let tiles = [
            (self.volumes.len().to_string(), "Total Volumes", colors.accent()),
            (available.to_string(), "Available Now", colors.success()),
            (
                format_minutes(total_estimated_minutes(self.volumes)),
                "Total Time",
                colors.warning(),
            ),
            (levels.len().to_string(), "Difficulty Levels", colors.key_pressed()),
        ];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[0]);
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

        let mut filters = vec![Span::styled(" Filter: ", Style::default().fg(colors.fg()))];
        for (key, filter) in ['a', 'v', 'l'].into_iter().zip(VolumeFilter::ALL) {
            let style = if filter == self.filter {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_pending())
            };
            filters.push(Span::styled(format!(" [{key}] {} ", filter.label()), style));
            filters.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(filters)).render(rows[1], buf);
    }
}

/// Overlay shown for an opened volume; the document itself opens in a browser.
pub struct VolumeDetail<'a> {
    volume: &'a Volume,
    theme: &'a Theme,
}

impl<'a> VolumeDetail<'a> {
    pub fn new(volume: &'a Volume, theme: &'a Theme) -> Self {
        Self { volume, theme }
    }
}

impl Widget for VolumeDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let v = self.volume;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(format!(" Volume {}: {} ", v.volume_number, v.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let muted = Style::default().fg(colors.text_pending());
        let mut lines = vec![
            Line::from(Span::styled(
                v.description.as_str(),
                Style::default().fg(colors.fg()),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Difficulty: ", muted),
                Span::styled(
                    v.difficulty.as_str(),
                    Style::default().fg(colors.difficulty(v.difficulty)),
                ),
            ]),
        ];
        if let Some(minutes) = v.estimated_minutes {
            lines.push(Line::from(vec![
                Span::styled("Estimated time: ", muted),
                Span::styled(format_minutes(minutes), Style::default().fg(colors.fg())),
            ]));
        }
        if !v.topics.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Key Topics:", muted)));
            for topic in &v.topics {
                lines.push(Line::from(Span::styled(
                    format!("  • {topic}"),
                    Style::default().fg(colors.fg()),
                )));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Document: ", muted),
            Span::styled(v.view_url(), Style::default().fg(colors.accent())),
        ]));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(rows[0], buf);
        Paragraph::new(Span::styled(
            "[o] Open in browser  [Esc] Close",
            Style::default().fg(colors.accent()),
        ))
        .alignment(Alignment::Center)
        .render(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::lesson::Difficulty;

    fn volume(available: bool) -> Volume {
        Volume {
            id: "kc-1".to_string(),
            title: "Steno Theory".to_string(),
            description: "Foundations of the theory.".to_string(),
            volume_number: "1".to_string(),
            difficulty: Difficulty::Beginner,
            pdf_url: "https://drive.google.com/file/d/abc/preview".to_string(),
            available,
            estimated_minutes: Some(120),
            topics: vec!["Alphabet".to_string(), "Briefs".to_string()],
            progress: Some(30),
        }
    }

    fn dump(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn available_card_can_be_opened() {
        let theme = Theme::default();
        let v = volume(true);
        let area = Rect::new(0, 0, 48, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        VolumeCard::new(&v, false, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains("Vol. 1"));
        assert!(text.contains("Open Volume"));
        assert!(text.contains("Progress 30%"));
        assert!(text.contains("120 min"));
    }

    #[test]
    fn locked_card_says_coming_soon() {
        let theme = Theme::default();
        let mut v = volume(false);
        v.progress = None;
        let area = Rect::new(0, 0, 48, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        VolumeCard::new(&v, false, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains("Coming Soon"));
        assert!(text.contains("Volume will be available soon"));
    }

    #[test]
    fn detail_shows_view_url() {
        let theme = Theme::default();
        let v = volume(true);
        let area = Rect::new(0, 0, 80, 16);
        let mut buf = Buffer::empty(area);
        VolumeDetail::new(&v, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains("/file/d/abc/view"));
        assert!(text.contains("• Briefs"));
    }

    #[test]
    fn summary_counts_volumes() {
        let theme = Theme::default();
        let volumes = vec![volume(true), volume(false)];
        let area = Rect::new(0, 0, 100, 5);
        let mut buf = Buffer::empty(area);
        VolumeSummary::new(&volumes, VolumeFilter::Available, &theme).render(area, &mut buf);
        let text = dump(&buf);
        assert!(text.contains("Total Volumes"));
        assert!(text.contains("4h 0m"));
        assert!(text.contains("[v] Available"));
    }
}
