use ratatui::buffer::Buffer;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::keyboard::steno::{self, Chord, KeyGroup, KeySlot, KeyState};
use crate::ui::theme::Theme;

/// Clickable steno keyboard. Keys are placed by `steno::key_slots` so the
/// drawn layout and mouse hit testing agree.
pub struct StenoKeyboard<'a> {
    chord: &'a Chord,
    highlight: &'a [&'a str],
    theme: &'a Theme,
    focused: bool,
}

impl<'a> StenoKeyboard<'a> {
    pub fn new(chord: &'a Chord, highlight: &'a [&'a str], theme: &'a Theme) -> Self {
        Self {
            chord,
            highlight,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn key_style(&self, slot: &KeySlot) -> Style {
        let colors = &self.theme.colors;
        match steno::key_state(slot.label, self.chord, self.highlight) {
            KeyState::Pressed => Style::default()
                .fg(colors.bg())
                .bg(colors.key_pressed())
                .add_modifier(Modifier::BOLD),
            KeyState::Highlight => Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
            KeyState::Normal if slot.group == KeyGroup::Vowel => Style::default()
                .fg(colors.key_vowel())
                .bg(colors.header_bg()),
            KeyState::Normal => Style::default().fg(colors.fg()).bg(colors.header_bg()),
        }
    }
}

impl Widget for StenoKeyboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Steno Keyboard ")
            .border_style(Style::default().fg(border));
        let inner = area.inner(Margin::new(1, 1));
        block.render(area, buf);

        let slots = steno::key_slots(inner);
        if slots.is_empty() {
            Paragraph::new(Span::styled(
                "Widen the terminal to show the keyboard",
                Style::default().fg(colors.text_pending()),
            ))
            .render(inner, buf);
            return;
        }

        for slot in &slots {
            let label = slot.label.trim_matches('-');
            let text = format!("{label:^width$}", width = slot.rect.width as usize);
            buf.set_string(slot.rect.x, slot.rect.y, text, self.key_style(slot));
        }

        let (_, keys_height) = steno::required_size();
        if inner.height <= keys_height {
            return;
        }
        let status_y = inner.y + inner.height - 1;
        let chord = if self.chord.is_empty() {
            "none".to_string()
        } else {
            self.chord.steno_string()
        };
        let line = Line::from(vec![
            Span::styled(" Chord: ", Style::default().fg(colors.text_pending())),
            Span::styled(
                chord,
                Style::default().fg(colors.key_pressed()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   Click keys or [Ctrl-K] to use arrows + Space",
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(line).render(Rect::new(inner.x, status_y, inner.width, 1), buf);
    }
}
