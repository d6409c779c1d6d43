use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Difficulty {
    Basic = 0,
    Advanced = 1,
    Expert = 2,
    Master = 3,
    Ultima = 4,
}

impl Difficulty {
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::Advanced,
        Self::Expert,
        Self::Master,
        Self::Ultima,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// One `.musiclist_box` section of a rating detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoreRecord {
    pub title: String,
    pub score: u32,
    pub diff: u8,
    #[serde(rename = "idx")]
    pub song_id: String,
}

impl RawScoreRecord {
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_u8(self.diff)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub raw: RawScoreRecord,
    pub level: Option<f64>,
    /// Always `None` when `level` is `None`.
    pub rating: Option<f64>,
    #[serde(rename = "jacket")]
    pub jacket_url: Option<String>,
}

impl EnrichedRecord {
    pub fn is_degraded(&self) -> bool {
        self.level.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    #[serde(rename = "level")]
    pub level_label: String,
    #[serde(rename = "rating")]
    pub rating_icons: Vec<String>,
    /// Numeric rating spelled out by `rating_icons`, when every icon decodes.
    #[serde(default)]
    pub player_rating: Option<f64>,
    #[serde(default)]
    pub team_name: String,
    pub last_play_date: String,
    pub title: String,
    #[serde(rename = "plate")]
    pub title_plate_url: String,
    #[serde(rename = "chara")]
    pub character_icon_url: String,
    pub overpower: String,
}

/// Everything the image renderer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub player_data: Vec<PlayerSummary>,
    pub best: Vec<EnrichedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent: Option<Vec<EnrichedRecord>>,
}
