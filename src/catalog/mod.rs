pub mod lesson;
pub mod volume;

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lesson::Lesson;
use volume::Volume;

const CATALOG_FILE: &str = "catalog.toml";

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("bundled catalog is missing")]
    MissingBundled,
    #[error("catalog is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog has no practice texts")]
    NoPracticeTexts,
}

/// Lessons, reading volumes and practice texts shown by the app.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub practice_texts: Vec<String>,
}

impl Catalog {
    /// User catalog from the config directory if present, else the bundled one.
    pub fn load() -> Result<Self, CatalogError> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("stenomaster").join(CATALOG_FILE);
            if user_path.exists() {
                match Self::load_from(&user_path) {
                    Ok(catalog) => return Ok(catalog),
                    Err(err) => {
                        tracing::warn!(path = %user_path.display(), %err, "ignoring user catalog");
                    }
                }
            }
        }
        Self::bundled()
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        let file = CatalogAssets::get(CATALOG_FILE).ok_or(CatalogError::MissingBundled)?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        Self::parse(content)
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        if catalog.practice_texts.is_empty() {
            return Err(CatalogError::NoPracticeTexts);
        }
        Ok(catalog)
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn volume(&self, id: &str) -> Option<&Volume> {
        self.volumes.iter().find(|v| v.id == id)
    }

    pub fn first_text(&self) -> &str {
        self.practice_texts.first().map(String::as_str).unwrap_or_default()
    }

    pub fn random_text<R: Rng>(&self, rng: &mut R) -> &str {
        if self.practice_texts.is_empty() {
            return "";
        }
        let idx = rng.gen_range(0..self.practice_texts.len());
        &self.practice_texts[idx]
    }
}
