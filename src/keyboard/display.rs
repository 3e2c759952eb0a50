/// Visible stand-ins for whitespace in the practice text.
///
/// The reference text keeps the real characters; only rendering swaps them.
pub const SPACE_GLYPH: char = '\u{2423}';
pub const NEWLINE_GLYPH: char = '\u{21b5}';
pub const TAB_GLYPH: char = '\u{2192}';

pub fn display_glyph(ch: char) -> char {
    match ch {
        ' ' => SPACE_GLYPH,
        '\n' => NEWLINE_GLYPH,
        '\t' => TAB_GLYPH,
        _ => ch,
    }
}

/// Human-readable name for whitespace keys; `""` for printable chars.
pub fn key_display_name(ch: char) -> &'static str {
    match ch {
        ' ' => "Space",
        '\n' => "Enter",
        '\t' => "Tab",
        _ => "",
    }
}
