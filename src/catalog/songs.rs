//! Flat song index (`songs.json`)
//!
//! Keyed by the audio path relative to the root, without extension.
//! Entries already in the index are never touched, so hand edits survive.

use super::config::CatalogConfig;
use super::store::{read_json, write_json, CatalogError};
use crate::model::{Flagged, IndexedSong};
use crate::scan::{find_audio_files, relative_path, scan_files, MetadataReader, ScannedFile};
use anyhow::Result;
use serde_json::{Map, Value};
use std::path::Path;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Index entries by key; existing entries are kept as raw JSON
pub type SongIndex = Map<String, Value>;

/// Index key for a relative audio path: the path minus its extension
pub fn index_key(relative_path: &str) -> &str {
    let name_start = relative_path.rfind('/').map_or(0, |i| i + 1);
    match relative_path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &relative_path[..name_start + dot],
        _ => relative_path,
    }
}

/// Load the index; a missing file is an empty index
pub fn load_song_index(path: &Path) -> Result<SongIndex, CatalogError> {
    match read_json(path)? {
        None => Ok(SongIndex::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(CatalogError::Parse {
            path: path.to_path_buf(),
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "expected an object of songs, found {}",
                json_kind(&other)
            )),
        }),
    }
}

/// Write the index with two-space indentation
pub fn save_song_index(path: &Path, index: &SongIndex) -> Result<(), CatalogError> {
    write_json(path, index, b"  ")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build an index entry for a newly found file
pub fn indexed_song(file: ScannedFile) -> IndexedSong {
    let meta = file.metadata;
    let sources = if meta.artists.is_empty() {
        vec![Flagged::enabled(UNKNOWN_ARTIST)]
    } else {
        meta.artists.into_iter().map(Flagged::enabled).collect()
    };

    IndexedSong {
        title: Flagged::enabled(meta.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string())),
        sources,
        audio_file: file.relative_path,
        start_time: None,
        end_time: None,
        level: None,
        year: meta.year,
    }
}

/// Add every audio file under the root that is not yet indexed
///
/// Only new files have their tags read. Returns the number added.
pub fn update_song_index<R: MetadataReader>(
    root: &Path,
    index: &mut SongIndex,
    reader: &R,
) -> Result<usize> {
    let new_files: Vec<_> = find_audio_files(root)
        .into_iter()
        .filter(|path| !index.contains_key(index_key(&relative_path(path, root))))
        .collect();

    let mut added = 0;
    for file in scan_files(&new_files, root, reader) {
        log::info!("Processing new file: {}", file.relative_path);
        let key = index_key(&file.relative_path).to_string();
        let entry = serde_json::to_value(indexed_song(file))?;
        index.insert(key, entry);
        added += 1;
    }
    Ok(added)
}

/// Load, update and save the song index described by `config`
pub fn run_song_index<R: MetadataReader>(config: &CatalogConfig, reader: &R) -> Result<usize> {
    let mut index = load_song_index(&config.song_index_path)?;
    let added = update_song_index(&config.audio_root, &mut index, reader)?;
    save_song_index(&config.song_index_path, &index)?;

    log::info!(
        "Song index written to {}: {} new, {} total",
        config.song_index_path.display(),
        added,
        index.len()
    );
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::AudioMetadata;
    use serde_json::json;

    #[test]
    fn test_index_key() {
        assert_eq!(index_key("rock/queen/bohemian.mp3"), "rock/queen/bohemian");
        assert_eq!(index_key("a.b/c.flac"), "a.b/c");
        assert_eq!(index_key("noext"), "noext");
        assert_eq!(index_key("dir/.hidden"), "dir/.hidden");
        assert_eq!(index_key("x.tar.ogg"), "x.tar");
    }

    #[test]
    fn test_indexed_song_defaults() {
        let song = indexed_song(ScannedFile {
            relative_path: "pop/x.mp3".to_string(),
            metadata: AudioMetadata::default(),
        });
        assert_eq!(
            serde_json::to_value(song).unwrap(),
            json!({
                "title": [true, "Unknown Title"],
                "sources": [[true, "Unknown Artist"]],
                "audioFile": "pop/x.mp3",
                "startTime": null,
                "endTime": null,
                "level": null,
                "year": null
            })
        );
    }
}
