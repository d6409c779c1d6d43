use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eyre::WrapErr;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelNotFoundError {
    #[error("no catalog entry titled {title:?}")]
    UnknownTitle { title: String },
    #[error("{title:?} has {sheets} sheets; difficulty {diff} is out of range")]
    DifficultyOutOfRange {
        title: String,
        diff: u8,
        sheets: usize,
    },
    #[error("{title:?} difficulty {diff} has no published internal level")]
    Unpublished { title: String, diff: u8 },
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogRoot {
    songs: Vec<CatalogSong>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogSong {
    title: String,
    #[serde(default)]
    sheets: Vec<CatalogSheet>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogSheet {
    #[serde(rename = "internalLevelValue", default)]
    internal_level_value: Option<f64>,
}

/// Chart internal levels keyed by exact song title and positional difficulty.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DifficultyCatalog {
    songs: Vec<CatalogSong>,
    by_title: HashMap<String, usize>,
}

impl DifficultyCatalog {
    pub fn from_json(bytes: &[u8]) -> eyre::Result<Self> {
        let root: CatalogRoot = serde_json::from_slice(bytes).wrap_err("decode catalog json")?;
        Ok(Self::from_root(root))
    }

    pub fn load_from_path(path: &Path) -> eyre::Result<Self> {
        let file = File::open(path)
            .wrap_err_with(|| format!("open difficulty catalog: {}", path.display()))?;
        let reader = BufReader::new(file);
        let root: CatalogRoot = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("parse difficulty catalog: {}", path.display()))?;
        Ok(Self::from_root(root))
    }

    fn from_root(root: CatalogRoot) -> Self {
        let mut by_title = HashMap::with_capacity(root.songs.len());
        for (idx, song) in root.songs.iter().enumerate() {
            // first entry with a given title wins
            by_title.entry(song.title.clone()).or_insert(idx);
        }
        Self {
            songs: root.songs,
            by_title,
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Internal level of `title` at difficulty index `diff`.
    ///
    /// Titles are compared byte for byte; no case folding or trimming.
    pub fn internal_level(&self, title: &str, diff: u8) -> Result<f64, LevelNotFoundError> {
        let song = self
            .by_title
            .get(title)
            .map(|&idx| &self.songs[idx])
            .ok_or_else(|| LevelNotFoundError::UnknownTitle {
                title: title.to_string(),
            })?;

        let sheet = song.sheets.get(usize::from(diff)).ok_or_else(|| {
            LevelNotFoundError::DifficultyOutOfRange {
                title: title.to_string(),
                diff,
                sheets: song.sheets.len(),
            }
        })?;

        sheet
            .internal_level_value
            .ok_or_else(|| LevelNotFoundError::Unpublished {
                title: title.to_string(),
                diff,
            })
    }
}
