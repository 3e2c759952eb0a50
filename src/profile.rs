use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::result::PracticeStats;

const SHOWN_ACHIEVEMENTS: usize = 3;
const SHOWN_SESSIONS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Speed,
    Accuracy,
    Consistency,
    Milestone,
}

impl AchievementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementCategory::Speed => "speed",
            AchievementCategory::Accuracy => "accuracy",
            AchievementCategory::Consistency => "consistency",
            AchievementCategory::Milestone => "milestone",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
    pub category: AchievementCategory,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub wpm: u32,
    pub accuracy: u32,
    pub duration_minutes: u32,
    pub lesson_title: String,
}

/// The four figures shown in the navigation header and dashboard tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderStats {
    pub level: u32,
    pub wpm: u32,
    pub accuracy: u32,
    pub streak: u32,
}

/// In-memory progress summary behind the dashboard. Never written to disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_practice_minutes: u32,
    pub average_wpm: u32,
    pub average_accuracy: u32,
    pub lessons_completed: u32,
    pub total_lessons: u32,
    pub streak: u32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub achievements: Vec<Achievement>,
    /// Newest first.
    pub recent_sessions: Vec<SessionRecord>,
}

impl ProgressStats {
    pub fn sample() -> Self {
        let now = Utc::now();
        Self {
            total_practice_minutes: 240,
            average_wpm: 75,
            average_accuracy: 92,
            lessons_completed: 8,
            total_lessons: 24,
            streak: 12,
            level: 5,
            experience: 2450,
            experience_to_next: 3000,
            achievements: vec![
                Achievement {
                    id: "1".to_string(),
                    title: "Speed Demon".to_string(),
                    description: "Achieved 100+ WPM in practice".to_string(),
                    icon: "\u{26a1}".to_string(),
                    unlocked_at: now,
                    category: AchievementCategory::Speed,
                },
                Achievement {
                    id: "2".to_string(),
                    title: "Accuracy Master".to_string(),
                    description: "Maintained 95%+ accuracy for 10 sessions".to_string(),
                    icon: "\u{1f3af}".to_string(),
                    unlocked_at: now,
                    category: AchievementCategory::Accuracy,
                },
            ],
            recent_sessions: vec![SessionRecord {
                id: 1,
                date: now,
                wpm: 78,
                accuracy: 94,
                duration_minutes: 15,
                lesson_title: "Common Word Outlines".to_string(),
            }],
        }
    }

    pub fn header_stats(&self) -> HeaderStats {
        HeaderStats {
            level: self.level,
            wpm: self.average_wpm,
            accuracy: self.average_accuracy,
            streak: self.streak,
        }
    }

    /// Percent of the way to the next level.
    pub fn level_progress(&self) -> f64 {
        if self.experience_to_next == 0 {
            return 0.0;
        }
        self.experience as f64 / self.experience_to_next as f64 * 100.0
    }

    pub fn course_progress(&self) -> f64 {
        if self.total_lessons == 0 {
            return 0.0;
        }
        self.lessons_completed as f64 / self.total_lessons as f64 * 100.0
    }

    pub fn top_achievements(&self) -> &[Achievement] {
        &self.achievements[..self.achievements.len().min(SHOWN_ACHIEVEMENTS)]
    }

    pub fn latest_sessions(&self) -> &[SessionRecord] {
        &self.recent_sessions[..self.recent_sessions.len().min(SHOWN_SESSIONS)]
    }

    pub fn record_session(
        &mut self,
        stats: &PracticeStats,
        lesson_title: &str,
        date: DateTime<Utc>,
    ) -> &SessionRecord {
        let id = self.recent_sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let duration_minutes = (stats.time_elapsed_ms + 30_000) / 60_000;
        self.recent_sessions.insert(
            0,
            SessionRecord {
                id,
                date,
                wpm: stats.wpm,
                accuracy: stats.accuracy,
                duration_minutes: duration_minutes as u32,
                lesson_title: lesson_title.to_string(),
            },
        );
        &self.recent_sessions[0]
    }
}

/// `"4h 0m"` for an hour or more, otherwise `"45m"`.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}
