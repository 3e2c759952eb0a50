use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

const KEYBOARD_HEIGHT: u16 = 8;
const MIN_HEIGHT_FOR_KEYBOARD: u16 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥110 cols: tab labels plus header stats
    Medium, // 80-109 cols: tab labels only
    Narrow, // <80 cols: hotkeys only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 110 {
            LayoutTier::Wide
        } else if area.width >= 80 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_header_stats(&self) -> bool {
        *self == LayoutTier::Wide
    }

    pub fn show_tab_labels(&self) -> bool {
        *self != LayoutTier::Narrow
    }

    /// Card columns in the lessons and volumes grids.
    pub fn grid_columns(&self) -> usize {
        match self {
            LayoutTier::Wide => 3,
            LayoutTier::Medium => 2,
            LayoutTier::Narrow => 1,
        }
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            body: vertical[1],
            footer: vertical[2],
            tier,
        }
    }
}

/// Practice tab: stats row, the text card, and the steno keyboard when it fits.
pub struct PracticeLayout {
    pub stats: Rect,
    pub text: Rect,
    pub keyboard: Option<Rect>,
    /// Inside the keyboard border; keys are placed here.
    pub keyboard_keys: Option<Rect>,
}

impl PracticeLayout {
    pub fn new(body: Rect, show_keyboard: bool) -> Self {
        let with_keyboard = show_keyboard && body.height >= MIN_HEIGHT_FOR_KEYBOARD;
        let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
        if with_keyboard {
            constraints.push(Constraint::Length(KEYBOARD_HEIGHT));
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(body);

        let keyboard = with_keyboard.then(|| rows[2]);
        Self {
            stats: rows[0],
            text: rows[1],
            keyboard,
            keyboard_keys: keyboard.map(|r| r.inner(Margin::new(1, 1))),
        }
    }

    /// Layout for a whole frame, as drawn by the practice tab.
    pub fn for_frame(frame: Rect, show_keyboard: bool) -> Self {
        Self::new(AppLayout::new(frame).body, show_keyboard)
    }
}

/// Split `area` into a grid of equally sized cells, row-major.
pub fn grid(area: Rect, columns: usize, cell_height: u16, count: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let rows = count.div_ceil(columns);
    let mut cells = Vec::with_capacity(count);
    let cell_width = area.width / columns as u16;

    for row in 0..rows {
        let y = area.y + row as u16 * cell_height;
        if y + cell_height > area.y + area.height {
            break;
        }
        for col in 0..columns {
            if cells.len() == count {
                break;
            }
            let x = area.x + col as u16 * cell_width;
            cells.push(Rect::new(x, y, cell_width, cell_height));
        }
    }
    cells
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 60;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
