use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub completed: bool,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    pub category: String,
    #[serde(default)]
    pub target_wpm: Option<u32>,
    #[serde(default)]
    pub min_accuracy: Option<u32>,
}

impl Lesson {
    pub fn can_start(&self) -> bool {
        !self.locked
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress > 0 && !self.completed
    }

    pub fn action_label(&self) -> &'static str {
        if self.locked {
            "Locked"
        } else if self.completed {
            "Review"
        } else if self.progress > 0 {
            "Continue"
        } else {
            "Start"
        }
    }
}
