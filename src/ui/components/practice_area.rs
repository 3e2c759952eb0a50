use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::keyboard::display::{display_glyph, key_display_name};
use crate::session::result::{LiveStats, PracticeStats};
use crate::session::scorer::{CharState, PracticeScorer, RunState, format_clock};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Clock, live WPM and accuracy above the practice text.
pub struct PracticeStatsBar<'a> {
    live: LiveStats,
    lesson_title: &'a str,
    theme: &'a Theme,
}

impl<'a> PracticeStatsBar<'a> {
    pub fn new(live: LiveStats, lesson_title: &'a str, theme: &'a Theme) -> Self {
        Self {
            live,
            lesson_title,
            theme,
        }
    }
}

impl Widget for PracticeStatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {} ", self.lesson_title))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let bold = Modifier::BOLD;
        let line = Line::from(vec![
            Span::styled(" Time ", Style::default().fg(colors.text_pending())),
            Span::styled(
                format_clock(self.live.elapsed),
                Style::default().fg(colors.accent()).add_modifier(bold),
            ),
            Span::styled("   WPM ", Style::default().fg(colors.text_pending())),
            Span::styled(
                self.live.wpm.to_string(),
                Style::default().fg(colors.fg()).add_modifier(bold),
            ),
            Span::styled("   ACC ", Style::default().fg(colors.text_pending())),
            Span::styled(
                format!("{}%", self.live.accuracy),
                Style::default()
                    .fg(colors.accuracy(self.live.accuracy as f64))
                    .add_modifier(bold),
            ),
        ]);
        Paragraph::new(line).render(inner, buf);

        let restart = "[Ctrl-R] Restart ";
        let x = inner.x + inner.width.saturating_sub(restart.len() as u16);
        buf.set_string(x, inner.y, restart, Style::default().fg(colors.text_pending()));
    }
}

/// The reference text, colored by what has been typed so far.
pub struct PracticeArea<'a> {
    scorer: &'a PracticeScorer,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> PracticeArea<'a> {
    pub fn new(scorer: &'a PracticeScorer, theme: &'a Theme) -> Self {
        Self {
            scorer,
            theme,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn char_style(&self, state: CharState) -> Style {
        let colors = &self.theme.colors;
        match state {
            CharState::Correct => Style::default().fg(colors.text_correct()),
            CharState::Incorrect => Style::default()
                .fg(colors.text_incorrect())
                .bg(colors.text_incorrect_bg())
                .add_modifier(Modifier::UNDERLINED),
            CharState::Current => Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
            CharState::Pending => Style::default().fg(colors.text_pending()),
        }
    }

    fn text_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
        for (i, &ch) in self.scorer.reference().iter().enumerate() {
            let style = self.char_style(self.scorer.char_state(i));
            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(display_glyph(ch).to_string(), style));
            }
            if ch == '\n' {
                lines.push(Vec::new());
            }
        }
        lines.into_iter().map(Line::from).collect()
    }

    fn footer_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        match self.scorer.state() {
            RunState::Idle => Line::from(Span::styled(
                "Start typing to begin practice",
                Style::default().fg(colors.text_pending()),
            )),
            RunState::Running => {
                let next = self.scorer.reference().get(self.scorer.current_index());
                let name = match next {
                    Some(&ch) => match key_display_name(ch) {
                        "" => ch.to_string(),
                        named => named.to_string(),
                    },
                    None => String::new(),
                };
                Line::from(vec![
                    Span::styled("Next: ", Style::default().fg(colors.text_pending())),
                    Span::styled(name, Style::default().fg(colors.accent())),
                ])
            }
            RunState::Complete => match self.scorer.final_stats() {
                Some(stats) => completion_line(stats, self.theme),
                None => Line::default(),
            },
        }
    }
}

fn completion_line(stats: &PracticeStats, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    let badge = Style::default()
        .fg(colors.header_fg())
        .bg(colors.accent_dim())
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(
            "Practice Complete! 🎉  ",
            Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} WPM ", stats.wpm), badge),
        Span::raw(" "),
        Span::styled(format!(" {}% Accuracy ", stats.accuracy), badge),
        Span::raw(" "),
        Span::styled(format!(" {}s ", stats.elapsed_secs_rounded()), badge),
    ])
}

impl Widget for PracticeArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Practice ")
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 {
            Paragraph::new(self.text_lines())
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        ProgressBar::new("Progress", self.scorer.progress(), self.theme).render(rows[0], buf);
        Paragraph::new(self.text_lines())
            .wrap(Wrap { trim: false })
            .render(rows[1].inner(Margin::new(1, 0)), buf);
        Paragraph::new(self.footer_line())
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }
}
