use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// An accepted answer with its enabled flag, stored as `[true, "text"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flagged(pub bool, pub String);

impl Flagged {
    /// An enabled answer
    pub fn enabled(text: impl Into<String>) -> Self {
        Self(true, text.into())
    }

    pub fn is_enabled(&self) -> bool {
        self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// A song inside a collection (`data.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Accepted title answers
    #[serde(default)]
    pub titles: Vec<Flagged>,

    /// Accepted artist/source answers
    #[serde(default)]
    pub sources: Vec<Flagged>,

    /// Path of the audio file, `/`-separated, relative to the audio root
    #[serde(default)]
    pub audio_file: String,

    /// Playback start offset in seconds (None = start of file)
    #[serde(default)]
    pub start_time: Option<Number>,

    /// Release year
    #[serde(default)]
    pub year: Option<i32>,

    /// Hand-edited fields this tool does not manage
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Song {
    /// Create a song for an audio file with no answers yet
    pub fn new(audio_file: impl Into<String>) -> Self {
        Self {
            titles: Vec::new(),
            sources: Vec::new(),
            audio_file: audio_file.into(),
            start_time: None,
            year: None,
            extra: Map::new(),
        }
    }
}

/// An entry of the flat song index (`songs.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedSong {
    pub title: Flagged,
    pub sources: Vec<Flagged>,
    pub audio_file: String,
    pub start_time: Option<Number>,
    pub end_time: Option<Number>,
    pub level: Option<Value>,
    pub year: Option<i32>,
}
