use std::collections::HashSet;

use ratatui::layout::Rect;

pub const NUMBER_ROW: &[&str] = &["#", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
pub const LEFT_BANK: &[&[&str]] = &[&["S-", "T-", "K-", "P-", "W-", "H-"], &["S-", "K-", "W-", "R-"]];
pub const VOWELS: &[&str] = &["A-", "O-", "E-", "U-"];
pub const RIGHT_BANK: &[&[&str]] = &[&["-F", "-R", "-P", "-B", "-L", "-G"], &["-T", "-S", "-D", "-Z"]];

/// Steno order used when writing a chord out as text.
const STENO_ORDER: &[&str] = &[
    "#", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "S-", "T-", "K-", "P-", "W-", "H-",
    "R-", "A-", "O-", "E-", "U-", "-F", "-R", "-P", "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
];

pub const KEY_WIDTH: u16 = 4;
const KEY_GAP: u16 = 1;
const SECTION_GAP: u16 = 4;
const BANK_COLUMNS: u16 = 6;
const VOWEL_COLUMNS: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyGroup {
    Number,
    Left,
    Vowel,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Normal,
    Pressed,
    Highlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySlot {
    pub label: &'static str,
    pub group: KeyGroup,
    pub rect: Rect,
}

/// Every rendered key in display order: number row, left bank, vowels, right bank.
/// Labels may repeat (the left bank shows `S-`, `K-` and `W-` twice).
pub fn layout_keys() -> Vec<(&'static str, KeyGroup)> {
    let mut keys: Vec<(&'static str, KeyGroup)> = Vec::new();
    keys.extend(NUMBER_ROW.iter().map(|&k| (k, KeyGroup::Number)));
    keys.extend(LEFT_BANK.iter().flat_map(|row| row.iter()).map(|&k| (k, KeyGroup::Left)));
    keys.extend(VOWELS.iter().map(|&k| (k, KeyGroup::Vowel)));
    keys.extend(RIGHT_BANK.iter().flat_map(|row| row.iter()).map(|&k| (k, KeyGroup::Right)));
    keys
}

fn span(columns: u16) -> u16 {
    columns * KEY_WIDTH + (columns - 1) * KEY_GAP
}

/// Minimum inner size the keyboard needs to be drawn.
pub fn required_size() -> (u16, u16) {
    let width = span(BANK_COLUMNS) * 2 + span(VOWEL_COLUMNS) + SECTION_GAP * 2;
    (width, 4)
}

/// Place every key inside `area`, centered. Returns nothing if `area` is too small.
///
/// Rendering and mouse hit testing both go through this, so a click lands on
/// exactly the key drawn under it.
pub fn key_slots(area: Rect) -> Vec<KeySlot> {
    let (width, height) = required_size();
    if area.width < width || area.height < height {
        return Vec::new();
    }

    let x0 = area.x + (area.width - width) / 2;
    let numbers_x = area.x + (area.width - span(NUMBER_ROW.len() as u16)) / 2;
    let bank_y = area.y + 2;
    let vowel_x = x0 + span(BANK_COLUMNS) + SECTION_GAP;
    let right_x = vowel_x + span(VOWEL_COLUMNS) + SECTION_GAP;
    let step = KEY_WIDTH + KEY_GAP;

    let mut slots = Vec::new();
    for (i, &label) in NUMBER_ROW.iter().enumerate() {
        slots.push(KeySlot {
            label,
            group: KeyGroup::Number,
            rect: Rect::new(numbers_x + i as u16 * step, area.y, KEY_WIDTH, 1),
        });
    }
    for (row, keys) in LEFT_BANK.iter().enumerate() {
        for (i, &label) in keys.iter().enumerate() {
            slots.push(KeySlot {
                label,
                group: KeyGroup::Left,
                rect: Rect::new(x0 + i as u16 * step, bank_y + row as u16, KEY_WIDTH, 1),
            });
        }
    }
    for (i, &label) in VOWELS.iter().enumerate() {
        let col = i as u16 % VOWEL_COLUMNS;
        let row = i as u16 / VOWEL_COLUMNS;
        slots.push(KeySlot {
            label,
            group: KeyGroup::Vowel,
            rect: Rect::new(vowel_x + col * step, bank_y + row, KEY_WIDTH, 1),
        });
    }
    for (row, keys) in RIGHT_BANK.iter().enumerate() {
        for (i, &label) in keys.iter().enumerate() {
            slots.push(KeySlot {
                label,
                group: KeyGroup::Right,
                rect: Rect::new(right_x + i as u16 * step, bank_y + row as u16, KEY_WIDTH, 1),
            });
        }
    }
    slots
}

pub fn key_at(area: Rect, column: u16, row: u16) -> Option<&'static str> {
    key_slots(area)
        .into_iter()
        .find(|slot| {
            let r = slot.rect;
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
        .map(|slot| slot.label)
}

/// Keys currently held in the simulated keyboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chord {
    pressed: HashSet<&'static str>,
}

impl Chord {
    pub fn toggle(&mut self, label: &'static str) {
        if !self.pressed.remove(label) {
            self.pressed.insert(label);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.pressed.contains(label)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    /// The chord in steno notation, e.g. `ST-F` or `KAT`.
    pub fn steno_string(&self) -> String {
        let has_vowel = VOWELS.iter().any(|v| self.contains(v));
        let mut out = String::new();
        let mut hyphenated = has_vowel;
        for &key in STENO_ORDER {
            if !self.contains(key) {
                continue;
            }
            if key.starts_with('-') && !hyphenated {
                out.push('-');
                hyphenated = true;
            }
            out.push_str(key.trim_matches('-'));
        }
        out
    }
}

/// Pressed wins over highlighted.
pub fn key_state(label: &str, chord: &Chord, highlight: &[&str]) -> KeyState {
    if chord.contains(label) {
        KeyState::Pressed
    } else if highlight.contains(&label) {
        KeyState::Highlight
    } else {
        KeyState::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(keys: &[&'static str]) -> Chord {
        let mut c = Chord::default();
        for &k in keys {
            c.toggle(k);
        }
        c
    }

    #[test]
    fn test_layout_has_every_key() {
        let keys = layout_keys();
        assert_eq!(keys.len(), 11 + 10 + 4 + 10);
        assert_eq!(keys[0], ("#", KeyGroup::Number));
        assert_eq!(keys[11], ("S-", KeyGroup::Left));
        assert_eq!(keys[21], ("A-", KeyGroup::Vowel));
        assert_eq!(keys.last(), Some(&("-Z", KeyGroup::Right)));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut c = Chord::default();
        c.toggle("S-");
        assert!(c.contains("S-"));
        c.toggle("S-");
        assert!(!c.contains("S-"));
        assert!(c.is_empty());
    }

    #[test]
    fn test_key_state_priority() {
        let c = chord(&["T-"]);
        assert_eq!(key_state("T-", &c, &["T-"]), KeyState::Pressed);
        assert_eq!(key_state("K-", &c, &["K-"]), KeyState::Highlight);
        assert_eq!(key_state("P-", &c, &[]), KeyState::Normal);
    }

    #[test]
    fn test_steno_string() {
        assert_eq!(chord(&["-F", "T-", "S-"]).steno_string(), "ST-F");
        assert_eq!(chord(&["-T", "A-", "K-"]).steno_string(), "KAT");
        assert_eq!(chord(&["-Z"]).steno_string(), "-Z");
        assert_eq!(chord(&["S-", "#"]).steno_string(), "#S");
        assert_eq!(chord(&[]).steno_string(), "");
    }

    #[test]
    fn test_key_slots_too_small_is_empty() {
        assert!(key_slots(Rect::new(0, 0, 40, 10)).is_empty());
        let (w, h) = required_size();
        assert!(key_slots(Rect::new(0, 0, w, h - 1)).is_empty());
        assert_eq!(key_slots(Rect::new(0, 0, w, h)).len(), layout_keys().len());
    }

    #[test]
    fn test_key_slots_do_not_overlap() {
        let slots = key_slots(Rect::new(3, 5, 100, 6));
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                assert!(a.rect.intersection(b.rect).is_empty(), "{} overlaps {}", a.label, b.label);
            }
        }
    }

    #[test]
    fn test_key_at_matches_slot_geometry() {
        let area = Rect::new(0, 0, 90, 6);
        for slot in key_slots(area) {
            assert_eq!(key_at(area, slot.rect.x, slot.rect.y), Some(slot.label));
            assert_eq!(key_at(area, slot.rect.x + KEY_WIDTH - 1, slot.rect.y), Some(slot.label));
        }
        // Row 1 is the gap between the number row and the banks.
        assert_eq!(key_at(area, 45, 1), None);
    }
}
