use std::fs;
use std::path::Path;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::catalog::lesson::Difficulty;

pub const DEFAULT_THEME: &str = "stenomaster";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
    pub key_pressed: String,
    pub key_vowel: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_dir = config_dir.join("stenomaster").join("themes");
            if let Some(theme) = Self::load_from_dir(&user_dir, name) {
                return Some(theme);
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        match toml::from_str::<Theme>(content) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(theme = name, %err, "bundled theme failed to parse");
                None
            }
        }
    }

    pub fn load_from_dir(dir: &Path, name: &str) -> Option<Self> {
        let path = dir.join(format!("{name}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str::<Theme>(&content) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "user theme failed to parse");
                None
            }
        }
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }

    /// Leaked so widgets can borrow the theme for the lifetime of the program.
    pub fn leak(self) -> &'static Theme {
        Box::leak(Box::new(self))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#14161f".to_string(),
            fg: "#e4e6f0".to_string(),
            text_correct: "#7bd88f".to_string(),
            text_incorrect: "#fc618d".to_string(),
            text_incorrect_bg: "#3b1f2b".to_string(),
            text_pending: "#6b7089".to_string(),
            text_cursor_bg: "#948ae3".to_string(),
            text_cursor_fg: "#14161f".to_string(),
            accent: "#948ae3".to_string(),
            accent_dim: "#3a3551".to_string(),
            border: "#3a3d4d".to_string(),
            border_focused: "#948ae3".to_string(),
            header_bg: "#1f2130".to_string(),
            header_fg: "#e4e6f0".to_string(),
            bar_filled: "#948ae3".to_string(),
            bar_empty: "#2a2c3a".to_string(),
            error: "#fc618d".to_string(),
            warning: "#fce566".to_string(),
            success: "#7bd88f".to_string(),
            key_pressed: "#5ad4e6".to_string(),
            key_vowel: "#fd9353".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn key_pressed(&self) -> Color { Self::parse_color(&self.key_pressed) }
    pub fn key_vowel(&self) -> Color { Self::parse_color(&self.key_vowel) }

    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Beginner => self.success(),
            Difficulty::Intermediate => self.warning(),
            Difficulty::Advanced => self.error(),
        }
    }

    /// Green at 95%+, amber at 85%+, red below.
    pub fn accuracy(&self, accuracy: f64) -> Color {
        if accuracy >= 95.0 {
            self.success()
        } else if accuracy >= 85.0 {
            self.warning()
        } else {
            self.error()
        }
    }
}
