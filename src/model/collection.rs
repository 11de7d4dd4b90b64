use super::Song;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Game style used when a collection does not set one
pub const DEFAULT_GAME_STYLE: u8 = 1;

/// Game style for "guess the song only" collections
pub const GUESS_SONG_ONLY_GAME_STYLE: u8 = 3;

fn default_game_style() -> u8 {
    DEFAULT_GAME_STYLE
}

/// A quiz collection: one audio folder plus hand-edited metadata
///
/// Field order is the on-disk key order; `songs` stays last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Folder name under the audio root
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Free-form difficulty, passed through untouched
    #[serde(default)]
    pub difficulty: Option<Value>,

    #[serde(default = "default_game_style")]
    pub game_style: u8,

    #[serde(default)]
    pub disabled_lifelines: Vec<Value>,

    #[serde(default)]
    pub source_name: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub covers: Vec<Value>,

    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Collection {
    /// Create a collection with default metadata
    pub fn new(id: impl Into<String>, songs: Vec<Song>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            difficulty: None,
            game_style: DEFAULT_GAME_STYLE,
            disabled_lifelines: Vec::new(),
            source_name: None,
            author: None,
            covers: Vec::new(),
            songs,
        }
    }

    /// Whether a song with this audio path is already present
    pub fn contains_audio(&self, audio_file: &str) -> bool {
        let wanted = normalize_audio_path(audio_file);
        self.songs
            .iter()
            .any(|s| normalize_audio_path(&s.audio_file) == wanted)
    }
}

/// Strip a leading `./` so old and new path styles compare equal
pub fn normalize_audio_path(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// The whole `data.json` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a collection by folder id
    pub fn get(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == id)
    }

    /// Total number of songs across all collections
    pub fn song_count(&self) -> usize {
        self.collections.iter().map(|c| c.songs.len()).sum()
    }
}
