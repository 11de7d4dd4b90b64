//! Catalog build configuration

use std::path::PathBuf;

/// Default catalog file name, relative to the audio root
pub const CATALOG_FILE: &str = "data.json";

/// Default song index file name, relative to the audio root
pub const SONG_INDEX_FILE: &str = "songs.json";

/// Configuration for catalog and song index builds
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding one sub-folder per collection
    pub audio_root: PathBuf,

    /// Collections file (`data.json`)
    pub catalog_path: PathBuf,

    /// Flat song index file (`songs.json`)
    pub song_index_path: PathBuf,
}

impl CatalogConfig {
    /// Create a configuration with both output files inside `audio_root`
    pub fn new(audio_root: PathBuf) -> Self {
        Self {
            catalog_path: audio_root.join(CATALOG_FILE),
            song_index_path: audio_root.join(SONG_INDEX_FILE),
            audio_root,
        }
    }

    /// Set the collections file path
    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = path;
        self
    }

    /// Set the song index file path
    pub fn with_song_index_path(mut self, path: PathBuf) -> Self {
        self.song_index_path = path;
        self
    }
}
