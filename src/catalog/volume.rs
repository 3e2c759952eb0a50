use serde::{Deserialize, Serialize};

use crate::catalog::lesson::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub title: String,
    pub description: String,
    pub volume_number: String,
    pub difficulty: Difficulty,
    pub pdf_url: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub progress: Option<u8>,
}

impl Volume {
    pub fn can_open(&self) -> bool {
        self.available
    }

    /// Full viewer URL for the embedded preview link.
    pub fn view_url(&self) -> String {
        self.pdf_url.replacen("/preview", "/view", 1)
    }

    pub fn shows_progress(&self) -> bool {
        self.progress.is_some_and(|p| p > 0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VolumeFilter {
    #[default]
    All,
    Available,
    Locked,
}

impl VolumeFilter {
    pub const ALL: [VolumeFilter; 3] = [VolumeFilter::All, VolumeFilter::Available, VolumeFilter::Locked];

    pub fn label(self) -> &'static str {
        match self {
            VolumeFilter::All => "All Volumes",
            VolumeFilter::Available => "Available",
            VolumeFilter::Locked => "Coming Soon",
        }
    }

    pub fn matches(self, volume: &Volume) -> bool {
        match self {
            VolumeFilter::All => true,
            VolumeFilter::Available => volume.available,
            VolumeFilter::Locked => !volume.available,
        }
    }
}

pub fn filter_volumes(volumes: &[Volume], filter: VolumeFilter) -> Vec<&Volume> {
    volumes.iter().filter(|v| filter.matches(v)).collect()
}

pub fn total_estimated_minutes(volumes: &[Volume]) -> u32 {
    volumes.iter().filter_map(|v| v.estimated_minutes).sum()
}
