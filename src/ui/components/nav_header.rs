use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::Tab;
use crate::profile::HeaderStats;
use crate::ui::layout::LayoutTier;
use crate::ui::theme::Theme;

const BRAND: &str = " StenoMaster ";
const TAB_GAP: u16 = 1;

fn tab_title(tab: Tab, tier: LayoutTier) -> String {
    let key = tab.index() + 1;
    if tier.show_tab_labels() {
        format!(" {key} {} ", tab.label())
    } else {
        format!(" {key} ")
    }
}

/// Screen cells covered by each tab button on the header's middle row.
pub fn tab_regions(area: Rect, tier: LayoutTier) -> Vec<(Tab, Rect)> {
    let y = area.y + area.height.min(3) / 2;
    let right = area.x + area.width;
    let mut x = area.x + BRAND.len() as u16 + 2;
    let mut regions = Vec::new();
    for tab in Tab::ALL {
        let width = tab_title(tab, tier).chars().count() as u16;
        if x + width > right {
            break;
        }
        regions.push((tab, Rect::new(x, y, width, 1)));
        x += width + TAB_GAP;
    }
    regions
}

pub fn tab_at(area: Rect, tier: LayoutTier, column: u16, row: u16) -> Option<Tab> {
    tab_regions(area, tier)
        .into_iter()
        .find(|(_, r)| row == r.y && column >= r.x && column < r.x + r.width)
        .map(|(tab, _)| tab)
}

pub struct NavHeader<'a> {
    current: Tab,
    stats: HeaderStats,
    tier: LayoutTier,
    theme: &'a Theme,
}

impl<'a> NavHeader<'a> {
    pub fn new(current: Tab, stats: HeaderStats, tier: LayoutTier, theme: &'a Theme) -> Self {
        Self {
            current,
            stats,
            tier,
            theme,
        }
    }
}

impl Widget for NavHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()))
            .render(area, buf);

        let y = area.y + area.height.min(3) / 2;
        buf.set_string(
            area.x + 1,
            y,
            BRAND,
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD),
        );

        let mut tabs_end = area.x;
        for (tab, rect) in tab_regions(area, self.tier) {
            let style = if tab == self.current {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.header_fg())
            };
            buf.set_string(rect.x, rect.y, tab_title(tab, self.tier), style);
            tabs_end = rect.x + rect.width;
        }

        if !self.tier.show_header_stats() {
            return;
        }
        let s = self.stats;
        let line = Line::from(vec![
            Span::styled(
                format!(" Level {} ", s.level),
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} WPM", s.wpm), Style::default().fg(colors.header_fg())),
            Span::styled(format!("  {}%", s.accuracy), Style::default().fg(colors.success())),
            Span::styled(format!("  {}d ", s.streak), Style::default().fg(colors.warning())),
        ]);
        let width = line.width() as u16;
        let x = (area.x + area.width).saturating_sub(width + 1);
        if x > tabs_end + 1 {
            Paragraph::new(line).render(Rect::new(x, y, width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> HeaderStats {
        HeaderStats {
            level: 12,
            wpm: 85,
            accuracy: 94,
            streak: 7,
        }
    }

    #[test]
    fn regions_are_ordered_and_hit_testable() {
        let area = Rect::new(0, 0, 160, 3);
        let regions = tab_regions(area, LayoutTier::Wide);
        assert_eq!(regions.len(), Tab::ALL.len());
        for (tab, rect) in &regions {
            assert_eq!(tab_at(area, LayoutTier::Wide, rect.x, rect.y), Some(*tab));
        }
        assert_eq!(tab_at(area, LayoutTier::Wide, 2, 1), None);
    }

    #[test]
    fn narrow_header_uses_numbers_only() {
        assert_eq!(tab_title(Tab::Lessons, LayoutTier::Narrow), " 2 ");
        assert_eq!(tab_title(Tab::Lessons, LayoutTier::Medium), " 2 Lessons ");
    }

    #[test]
    fn wide_header_shows_user_stats() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 160, 3);
        let mut buf = Buffer::empty(area);
        NavHeader::new(Tab::Practice, stats(), LayoutTier::Wide, &theme).render(area, &mut buf);
        let row: String = (0..160).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("StenoMaster"));
        assert!(row.contains("4 Practice"));
        assert!(row.contains("Level 12"));
        assert!(row.contains("85 WPM"));
        assert!(row.contains("7d"));
    }
}
