use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;

use crate::catalog::Catalog;
use crate::catalog::volume::{Volume, VolumeFilter, filter_volumes};
use crate::config::{Config, MAX_REFRESH_MS, MIN_REFRESH_MS};
use crate::keyboard::steno::{self, Chord};
use crate::profile::ProgressStats;
use crate::session::refresh::RefreshTimer;
use crate::session::result::{LiveStats, PracticeStats};
use crate::session::scorer::{PracticeScorer, RunState};
use crate::ui::components::toast::Toasts;
use crate::ui::layout::PracticeLayout;
use crate::ui::theme::Theme;

const REFRESH_STEP_MS: u64 = 50;
pub const SETTINGS_FIELDS: usize = 3;
const FREE_PRACTICE: &str = "Free Practice";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Lessons,
    Volumes,
    Practice,
    Achievements,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Lessons,
        Tab::Volumes,
        Tab::Practice,
        Tab::Achievements,
        Tab::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Lessons => "Lessons",
            Tab::Volumes => "KC Volumes",
            Tab::Practice => "Practice",
            Tab::Achievements => "Achievements",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeFocus {
    Text,
    Keyboard,
}

pub struct App {
    pub tab: Tab,
    pub config: Config,
    pub config_path: PathBuf,
    pub theme: &'static Theme,
    pub catalog: Catalog,
    pub profile: ProgressStats,
    pub toasts: Toasts,
    pub should_quit: bool,
    /// Last drawn frame size, used to hit test mouse clicks.
    pub viewport: Rect,

    pub lesson_selected: usize,
    pub selected_lesson: Option<String>,

    pub volume_filter: VolumeFilter,
    pub volume_selected: usize,
    pub open_volume: Option<String>,

    pub practice_text: String,
    pub practice_input: String,
    pub scorer: PracticeScorer,
    pub refresh: RefreshTimer,
    pub live: LiveStats,
    pub chord: Chord,
    pub practice_focus: PracticeFocus,
    pub key_cursor: usize,
    pub completed_runs: Vec<PracticeStats>,

    pub settings_selected: usize,
    settings_dirty: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, catalog: Catalog, theme: &'static Theme) -> Self {
        Self::with_rng(config, catalog, theme, SmallRng::from_entropy())
    }

    pub fn with_rng(
        config: Config,
        catalog: Catalog,
        theme: &'static Theme,
        rng: SmallRng,
    ) -> Self {
        let practice_text = catalog.first_text().to_string();
        let refresh = RefreshTimer::new(config.refresh_interval());

        Self {
            tab: Tab::Dashboard,
            config,
            config_path: Config::config_path(),
            theme,
            scorer: PracticeScorer::new(&practice_text),
            catalog,
            profile: ProgressStats::sample(),
            toasts: Toasts::default(),
            should_quit: false,
            viewport: Rect::default(),
            lesson_selected: 0,
            selected_lesson: None,
            volume_filter: VolumeFilter::All,
            volume_selected: 0,
            open_volume: None,
            practice_text,
            practice_input: String::new(),
            refresh,
            live: LiveStats::default(),
            chord: Chord::default(),
            practice_focus: PracticeFocus::Text,
            key_cursor: 0,
            completed_runs: Vec::new(),
            settings_selected: 0,
            settings_dirty: false,
            rng,
        }
    }

    /// Replace the practice text, e.g. from `--text`. Starts a fresh run.
    pub fn set_practice_text(&mut self, text: &str) {
        self.practice_text = text.to_string();
        self.scorer = PracticeScorer::new(&self.practice_text);
        self.clear_run();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        match self.tab {
            Tab::Practice => self.leave_practice(),
            Tab::Settings => self.persist_settings(),
            Tab::Volumes => self.open_volume = None,
            _ => {}
        }
        tracing::debug!(from = self.tab.label(), to = tab.label(), "switch tab");
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(self.tab.prev());
    }

    // --- Lessons ---

    pub fn lesson_next(&mut self) {
        if !self.catalog.lessons.is_empty() {
            self.lesson_selected = (self.lesson_selected + 1).min(self.catalog.lessons.len() - 1);
        }
    }

    pub fn lesson_prev(&mut self) {
        self.lesson_selected = self.lesson_selected.saturating_sub(1);
    }

    pub fn start_selected_lesson(&mut self) -> bool {
        self.start_lesson(self.lesson_selected)
    }

    /// Locked lessons are ignored.
    pub fn start_lesson(&mut self, index: usize) -> bool {
        let Some(lesson) = self.catalog.lessons.get(index) else {
            return false;
        };
        if !lesson.can_start() {
            tracing::debug!(lesson = %lesson.id, "lesson is locked");
            return false;
        }
        let id = lesson.id.clone();
        tracing::info!(lesson = %id, title = %lesson.title, "lesson started");

        self.lesson_selected = index;
        self.selected_lesson = Some(id);
        self.select_tab(Tab::Practice);
        self.toasts
            .push("Lesson Started", "Good luck with your practice session!");
        true
    }

    pub fn practice_title(&self) -> &str {
        self.selected_lesson
            .as_deref()
            .and_then(|id| self.catalog.lesson(id))
            .map(|l| l.title.as_str())
            .unwrap_or(FREE_PRACTICE)
    }

    // --- Practice ---

    pub fn type_char(&mut self, ch: char) {
        self.type_char_at(ch, Instant::now());
    }

    pub fn type_char_at(&mut self, ch: char, now: Instant) {
        if self.scorer.state() == RunState::Complete {
            return;
        }
        self.practice_input.push(ch);
        self.submit_practice(now);
    }

    pub fn backspace(&mut self) {
        self.backspace_at(Instant::now());
    }

    pub fn backspace_at(&mut self, now: Instant) {
        if self.scorer.state() == RunState::Complete {
            return;
        }
        if self.practice_input.pop().is_some() {
            self.submit_practice(now);
        }
    }

    fn submit_practice(&mut self, now: Instant) {
        let was_idle = self.scorer.state() == RunState::Idle;
        let completed = self.scorer.submit_input_at(&self.practice_input, now);
        if was_idle && self.scorer.state() == RunState::Running {
            self.refresh.arm(now);
        }
        self.live = self.scorer.live_stats_at(now);

        if let Some(stats) = completed {
            self.refresh.cancel();
            self.on_practice_complete(stats);
        }
    }

    fn on_practice_complete(&mut self, stats: PracticeStats) {
        let title = self.practice_title().to_string();
        tracing::info!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            elapsed_ms = stats.time_elapsed_ms,
            lesson = %title,
            "practice complete"
        );
        self.toasts
            .push("Practice Complete! 🎉", &stats.summary_line());
        self.profile
            .record_session(&stats, &title, chrono::Utc::now());
        self.completed_runs.push(stats);
    }

    fn clear_run(&mut self) {
        self.practice_input.clear();
        self.refresh.cancel();
        self.live = LiveStats::default();
    }

    pub fn restart_practice(&mut self) {
        self.scorer.reset();
        self.clear_run();
    }

    pub fn new_practice_text(&mut self) {
        let text = self.catalog.random_text(&mut self.rng).to_string();
        tracing::debug!(chars = text.chars().count(), "new practice text");
        self.set_practice_text(&text);
    }

    /// Leaving the practice view drops the run in progress.
    fn leave_practice(&mut self) {
        self.restart_practice();
        self.practice_focus = PracticeFocus::Text;
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.refresh.poll(now) {
            self.live = self.scorer.live_stats_at(now);
        }
        self.toasts.prune(now, self.config.toast_lifetime());
    }

    // --- Steno keyboard ---

    pub fn toggle_practice_focus(&mut self) {
        self.practice_focus = match self.practice_focus {
            PracticeFocus::Text => PracticeFocus::Keyboard,
            PracticeFocus::Keyboard => PracticeFocus::Text,
        };
    }

    pub fn cursor_key(&self) -> &'static str {
        let keys = steno::layout_keys();
        keys[self.key_cursor.min(keys.len() - 1)].0
    }

    pub fn key_cursor_next(&mut self) {
        self.key_cursor = (self.key_cursor + 1) % steno::layout_keys().len();
    }

    pub fn key_cursor_prev(&mut self) {
        let len = steno::layout_keys().len();
        self.key_cursor = (self.key_cursor + len - 1) % len;
    }

    pub fn toggle_cursor_key(&mut self) {
        let label = self.cursor_key();
        self.chord.toggle(label);
    }

    /// Keys to highlight on the diagram besides the pressed ones.
    pub fn highlighted_keys(&self) -> Vec<&'static str> {
        match self.practice_focus {
            PracticeFocus::Keyboard => vec![self.cursor_key()],
            PracticeFocus::Text => Vec::new(),
        }
    }

    pub fn keyboard_area(&self) -> Option<Rect> {
        PracticeLayout::for_frame(self.viewport, self.config.show_keyboard).keyboard_keys
    }

    /// Toggle the key drawn under a mouse click. Returns whether a key was hit.
    pub fn click_keyboard(&mut self, column: u16, row: u16) -> bool {
        if self.tab != Tab::Practice {
            return false;
        }
        let Some(area) = self.keyboard_area() else {
            return false;
        };
        match steno::key_at(area, column, row) {
            Some(label) => {
                self.chord.toggle(label);
                true
            }
            None => false,
        }
    }

    // --- Volumes ---

    pub fn visible_volumes(&self) -> Vec<&Volume> {
        filter_volumes(&self.catalog.volumes, self.volume_filter)
    }

    pub fn set_volume_filter(&mut self, filter: VolumeFilter) {
        self.volume_filter = filter;
        self.volume_selected = 0;
        self.open_volume = None;
    }

    pub fn volume_next(&mut self) {
        let len = self.visible_volumes().len();
        if len > 0 {
            self.volume_selected = (self.volume_selected + 1).min(len - 1);
        }
    }

    pub fn volume_prev(&mut self) {
        self.volume_selected = self.volume_selected.saturating_sub(1);
    }

    fn selected_volume(&self) -> Option<&Volume> {
        self.visible_volumes().get(self.volume_selected).copied()
    }

    /// Only available volumes open.
    pub fn open_selected_volume(&mut self) -> bool {
        let Some(volume) = self.selected_volume() else {
            return false;
        };
        if !volume.can_open() {
            return false;
        }
        self.open_volume = Some(volume.id.clone());
        true
    }

    pub fn close_volume(&mut self) {
        self.open_volume = None;
    }

    pub fn opened_volume(&self) -> Option<&Volume> {
        self.open_volume
            .as_deref()
            .and_then(|id| self.catalog.volume(id))
    }

    /// Open the selected (or opened) volume in the system browser.
    pub fn launch_volume(&mut self) {
        let volume = match self.opened_volume() {
            Some(v) => Some(v),
            None => self.selected_volume(),
        };
        let Some(volume) = volume.filter(|v| v.can_open()) else {
            return;
        };
        let url = volume.view_url();
        let title = volume.title.clone();
        match webbrowser::open(&url) {
            Ok(()) => tracing::info!(%url, "opened volume"),
            Err(err) => {
                tracing::warn!(%url, %err, "failed to open browser");
                self.toasts
                    .push("Could not open browser", &format!("{title}: {url}"));
            }
        }
    }

    // --- Settings ---

    pub fn settings_next(&mut self) {
        self.settings_selected = (self.settings_selected + 1).min(SETTINGS_FIELDS - 1);
    }

    pub fn settings_prev(&mut self) {
        self.settings_selected = self.settings_selected.saturating_sub(1);
    }

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(false);
    }

    fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if themes.is_empty() {
                    return;
                }
                let next = match themes.iter().position(|t| *t == self.config.theme) {
                    Some(idx) if forward => (idx + 1) % themes.len(),
                    Some(idx) => (idx + themes.len() - 1) % themes.len(),
                    None => 0,
                };
                self.config.theme = themes[next].clone();
                if let Some(theme) = Theme::load(&self.config.theme) {
                    self.theme = theme.leak();
                }
            }
            1 => self.config.show_keyboard = !self.config.show_keyboard,
            2 => {
                let ms = if forward {
                    self.config.refresh_interval_ms + REFRESH_STEP_MS
                } else {
                    self.config.refresh_interval_ms.saturating_sub(REFRESH_STEP_MS)
                };
                self.config.refresh_interval_ms = ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
                self.refresh.set_interval(self.config.refresh_interval());
            }
            _ => return,
        }
        self.settings_dirty = true;
    }

    pub fn settings_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Theme", self.config.theme.clone()),
            (
                "Show Keyboard",
                if self.config.show_keyboard { "on" } else { "off" }.to_string(),
            ),
            (
                "Stats Refresh",
                format!("{} ms", self.config.refresh_interval_ms),
            ),
        ]
    }

    /// Write the config if a setting changed. Failures are logged and toasted.
    pub fn persist_settings(&mut self) {
        if !self.settings_dirty {
            return;
        }
        match self.config.save_to(&self.config_path) {
            Ok(()) => {
                self.settings_dirty = false;
                tracing::info!(path = %self.config_path.display(), "settings saved");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to save settings");
                self.toasts.push("Settings not saved", &err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const CATALOG: &str = r#"
practice_texts = ["cat", "dog"]

[[lessons]]
id = "intro"
title = "Introduction to Stenography"
description = "Learn the basics."
difficulty = "beginner"
estimated_minutes = 15
locked = false
completed = true
progress = 100
category = "Fundamentals"

[[lessons]]
id = "advanced"
title = "Advanced Briefs"
description = "Shortcuts."
difficulty = "advanced"
estimated_minutes = 40
locked = true
completed = false
progress = 0
category = "Speed"

[[volumes]]
id = "kc-1"
title = "Steno Theory"
description = "Volume one."
volume_number = "1"
difficulty = "beginner"
pdf_url = "https://drive.google.com/file/d/abc/preview"
available = true

[[volumes]]
id = "kc-2"
title = "Advanced Theory"
description = "Volume two."
volume_number = "2"
difficulty = "advanced"
pdf_url = ""
available = false
"#;

    fn test_app() -> App {
        let catalog = Catalog::parse(CATALOG).unwrap();
        let theme = Theme::default().leak();
        let mut app = App::with_rng(Config::default(), catalog, theme, SmallRng::seed_from_u64(7));
        app.config_path = std::env::temp_dir().join("stenomaster-never-written.toml");
        app
    }

    fn type_str(app: &mut App, text: &str, start: Instant, step_ms: u64) {
        for (i, ch) in text.chars().enumerate() {
            app.type_char_at(ch, start + Duration::from_millis(step_ms * i as u64));
        }
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Dashboard.prev(), Tab::Settings);
        assert_eq!(Tab::Settings.next(), Tab::Dashboard);
        assert_eq!(Tab::from_index(3), Some(Tab::Practice));
        assert_eq!(Tab::from_index(6), None);
        assert_eq!(Tab::Achievements.index(), 4);
    }

    #[test]
    fn test_starts_on_first_practice_text() {
        let app = test_app();
        assert_eq!(app.tab, Tab::Dashboard);
        assert_eq!(app.practice_text, "cat");
        assert_eq!(app.scorer.state(), RunState::Idle);
        assert_eq!(app.practice_title(), FREE_PRACTICE);
    }

    #[test]
    fn test_start_unlocked_lesson() {
        let mut app = test_app();
        assert!(app.start_lesson(0));
        assert_eq!(app.tab, Tab::Practice);
        assert_eq!(app.selected_lesson.as_deref(), Some("intro"));
        assert_eq!(app.practice_title(), "Introduction to Stenography");
        assert_eq!(app.toasts.latest().unwrap().title, "Lesson Started");
    }

    #[test]
    fn test_locked_lesson_does_nothing() {
        let mut app = test_app();
        assert!(!app.start_lesson(1));
        assert!(!app.start_lesson(9));
        assert_eq!(app.tab, Tab::Dashboard);
        assert!(app.selected_lesson.is_none());
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_first_keystroke_arms_refresh() {
        let mut app = test_app();
        app.select_tab(Tab::Practice);
        let t0 = Instant::now();
        app.type_char_at('c', t0);
        assert_eq!(app.scorer.state(), RunState::Running);
        assert!(app.refresh.is_armed());
    }

    #[test]
    fn test_completion_records_once() {
        let mut app = test_app();
        app.select_tab(Tab::Practice);
        let sessions_before = app.profile.recent_sessions.len();
        let t0 = Instant::now();
        type_str(&mut app, "cat", t0, 3000);

        assert_eq!(app.scorer.state(), RunState::Complete);
        assert!(!app.refresh.is_armed());
        assert_eq!(app.completed_runs.len(), 1);
        let stats = &app.completed_runs[0];
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.wpm, 6);
        assert_eq!(app.profile.recent_sessions.len(), sessions_before + 1);
        assert_eq!(app.profile.recent_sessions[0].lesson_title, FREE_PRACTICE);

        let toast = app.toasts.latest().unwrap();
        assert!(toast.title.starts_with("Practice Complete!"));
        assert_eq!(toast.description, "6 WPM • 100% accuracy");

        // Input after completion is ignored.
        app.type_char_at('x', t0 + Duration::from_secs(7));
        app.backspace_at(t0 + Duration::from_secs(8));
        assert_eq!(app.practice_input, "cat");
        assert_eq!(app.completed_runs.len(), 1);
    }

    #[test]
    fn test_backspace_keeps_mistake() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.type_char_at('x', t0);
        app.backspace_at(t0 + Duration::from_millis(100));
        assert_eq!(app.practice_input, "");
        type_str(&mut app, "cat", t0 + Duration::from_millis(200), 100);
        assert_eq!(app.completed_runs[0].accuracy, 67);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut app = test_app();
        let t0 = Instant::now();
        type_str(&mut app, "ca", t0, 100);
        app.restart_practice();
        assert_eq!(app.scorer.state(), RunState::Idle);
        assert!(app.practice_input.is_empty());
        assert!(!app.refresh.is_armed());
        assert_eq!(app.live, LiveStats::default());
        assert_eq!(app.practice_text, "cat");
    }

    #[test]
    fn test_leaving_practice_drops_run_but_keeps_chord() {
        let mut app = test_app();
        app.select_tab(Tab::Practice);
        app.chord.toggle("S-");
        app.type_char_at('c', Instant::now());
        app.select_tab(Tab::Lessons);
        assert_eq!(app.scorer.state(), RunState::Idle);
        assert!(app.practice_input.is_empty());
        assert!(!app.refresh.is_armed());
        assert!(app.chord.contains("S-"));
    }

    #[test]
    fn test_new_text_comes_from_catalog() {
        let mut app = test_app();
        app.type_char_at('c', Instant::now());
        app.new_practice_text();
        assert!(["cat", "dog"].contains(&app.practice_text.as_str()));
        assert_eq!(app.scorer.state(), RunState::Idle);
        assert!(app.practice_input.is_empty());
    }

    #[test]
    fn test_tick_refreshes_live_stats_only_when_due() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.type_char_at('c', t0);
        assert_eq!(app.live.elapsed, Duration::ZERO);

        app.on_tick(t0 + Duration::from_millis(10));
        assert_eq!(app.live.elapsed, Duration::ZERO);

        app.on_tick(t0 + Duration::from_millis(150));
        assert_eq!(app.live.elapsed, Duration::from_millis(150));
    }

    #[test]
    fn test_tick_prunes_toasts() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.toasts.push_at("old", "", t0);
        app.on_tick(t0 + Duration::from_secs(4));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_keyboard_cursor_toggles_chord() {
        let mut app = test_app();
        app.toggle_practice_focus();
        assert_eq!(app.highlighted_keys(), vec!["#"]);
        app.key_cursor_prev();
        assert_eq!(app.cursor_key(), "-Z");
        app.toggle_cursor_key();
        assert!(app.chord.contains("-Z"));
        app.key_cursor_next();
        app.key_cursor_next();
        assert_eq!(app.cursor_key(), "1");
        app.toggle_practice_focus();
        assert!(app.highlighted_keys().is_empty());
    }

    #[test]
    fn test_click_keyboard_hits_drawn_key() {
        let mut app = test_app();
        app.viewport = Rect::new(0, 0, 120, 40);
        app.select_tab(Tab::Practice);
        let area = app.keyboard_area().unwrap();
        let slot = steno::key_slots(area)
            .into_iter()
            .find(|s| s.label == "A-")
            .unwrap();
        assert!(app.click_keyboard(slot.rect.x + 1, slot.rect.y));
        assert!(app.chord.contains("A-"));
        assert!(!app.click_keyboard(0, 0));

        app.select_tab(Tab::Dashboard);
        assert!(!app.click_keyboard(slot.rect.x + 1, slot.rect.y));
    }

    #[test]
    fn test_volume_filter_and_open() {
        let mut app = test_app();
        app.select_tab(Tab::Volumes);
        assert_eq!(app.visible_volumes().len(), 2);

        app.set_volume_filter(VolumeFilter::Locked);
        assert_eq!(app.visible_volumes().len(), 1);
        assert!(!app.open_selected_volume());

        app.set_volume_filter(VolumeFilter::Available);
        assert!(app.open_selected_volume());
        assert_eq!(app.opened_volume().map(|v| v.id.as_str()), Some("kc-1"));

        app.select_tab(Tab::Dashboard);
        assert!(app.open_volume.is_none());
    }

    #[test]
    fn test_settings_cycle_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.config_path = dir.path().join("config.toml");
        app.select_tab(Tab::Settings);

        app.settings_next();
        app.settings_cycle_forward();
        assert!(!app.config.show_keyboard);

        app.settings_next();
        app.settings_cycle_forward();
        assert_eq!(app.config.refresh_interval_ms, 150);
        assert_eq!(app.refresh.interval(), Duration::from_millis(150));
        for _ in 0..30 {
            app.settings_cycle_forward();
        }
        assert_eq!(app.config.refresh_interval_ms, MAX_REFRESH_MS);

        app.select_tab(Tab::Practice);
        let saved = Config::load_from(&app.config_path).unwrap();
        assert_eq!(saved, app.config);
    }

    #[test]
    fn test_theme_cycles_through_bundled() {
        let mut app = test_app();
        let before = app.config.theme.clone();
        app.settings_cycle_forward();
        assert_ne!(app.config.theme, before);
        assert_eq!(app.theme.name, app.config.theme);
        app.settings_cycle_backward();
        assert_eq!(app.config.theme, before);
    }

    #[test]
    fn test_unchanged_settings_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.config_path = dir.path().join("config.toml");
        app.select_tab(Tab::Settings);
        app.select_tab(Tab::Dashboard);
        assert!(!app.config_path.exists());
    }
}
