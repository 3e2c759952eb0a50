use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

const MAX_TOASTS: usize = 3;
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

#[derive(Clone, Debug)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub created_at: Instant,
}

/// Short-lived notifications, newest last.
#[derive(Clone, Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn push(&mut self, title: &str, description: &str) {
        self.push_at(title, description, Instant::now());
    }

    pub fn push_at(&mut self, title: &str, description: &str, now: Instant) {
        self.items.push_back(Toast {
            title: title.to_string(),
            description: description.to_string(),
            created_at: now,
        });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    pub fn prune(&mut self, now: Instant, lifetime: Duration) {
        self.items
            .retain(|t| now.saturating_duration_since(t.created_at) < lifetime);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Stacks toasts in the top-right corner of the area it is given.
pub struct ToastStack<'a> {
    toasts: &'a Toasts,
    theme: &'a Theme,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a Toasts, theme: &'a Theme) -> Self {
        Self { toasts, theme }
    }
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;

        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let y = area.y + i as u16 * TOAST_HEIGHT;
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);
            Clear.render(rect, buf);

            let block = Block::bordered()
                .border_style(Style::default().fg(colors.accent()))
                .style(Style::default().bg(colors.header_bg()));
            let lines = vec![
                Line::from(Span::styled(
                    toast.title.as_str(),
                    Style::default()
                        .fg(colors.header_fg())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    toast.description.as_str(),
                    Style::default().fg(colors.text_pending()),
                )),
            ];
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
    }
}
