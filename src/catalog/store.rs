//! Reading and writing `data.json`
//!
//! Older catalogs are upgraded on load: single `title` strings become
//! `titles` pairs, `artists` become `sources`, and `guessSongOnly`
//! becomes a `gameStyle`.

use crate::model::{Catalog, GUESS_SONG_ONLY_GAME_STYLE, DEFAULT_GAME_STYLE};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the catalog at `path`, upgrading old layouts
///
/// A missing file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let Some(mut doc) = read_json(path)? else {
        log::info!("No catalog at {}, starting empty", path.display());
        return Ok(Catalog::new());
    };

    let upgraded = migrate_catalog(&mut doc);
    if upgraded > 0 {
        log::info!("Upgraded {} legacy field(s) in {}", upgraded, path.display());
    }

    serde_json::from_value(doc).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the catalog with tab indentation
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    write_json(path, catalog, b"\t")
}

/// Rewrite legacy fields in place; returns how many were changed
pub fn migrate_catalog(doc: &mut Value) -> usize {
    let Some(collections) = doc.get_mut("collections").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut changed = 0;
    for collection in collections.iter_mut().filter_map(Value::as_object_mut) {
        if let Some(songs) = collection.get_mut("songs").and_then(Value::as_array_mut) {
            for song in songs.iter_mut().filter_map(Value::as_object_mut) {
                changed += migrate_song(song);
            }
        }

        if let Some(guess_only) = collection.shift_remove("guessSongOnly") {
            let style = if guess_only.as_bool().unwrap_or(false) {
                GUESS_SONG_ONLY_GAME_STYLE
            } else {
                DEFAULT_GAME_STYLE
            };
            collection.insert("gameStyle".to_string(), Value::from(style));
            changed += 1;
        }
    }
    changed
}

fn migrate_song(song: &mut Map<String, Value>) -> usize {
    let mut changed = 0;

    if !song.contains_key("titles") {
        if let Some(title) = song.shift_remove("title") {
            let titles = match title {
                Value::String(t) => vec![enabled_pair(t)],
                _ => Vec::new(),
            };
            song.insert("titles".to_string(), Value::Array(titles));
            changed += 1;
        }
    }

    if let Some(titles) = song.get_mut("titles").and_then(Value::as_array_mut) {
        for title in titles.iter_mut() {
            if let Value::String(t) = title {
                *title = enabled_pair(std::mem::take(t));
                changed += 1;
            }
        }
        changed += drop_textless_pairs(titles);
    }

    if !song.contains_key("sources") {
        if let Some(Value::Array(artists)) = song.shift_remove("artists") {
            let sources = artists
                .into_iter()
                .filter_map(|a| match a {
                    Value::String(a) => Some(enabled_pair(a)),
                    _ => None,
                })
                .collect();
            song.insert("sources".to_string(), Value::Array(sources));
            changed += 1;
        }
    }

    if let Some(sources) = song.get_mut("sources").and_then(Value::as_array_mut) {
        changed += drop_textless_pairs(sources);
    }

    changed
}

/// Remove `[flag, null]`-style pairs left by older migrations; returns how many
fn drop_textless_pairs(pairs: &mut Vec<Value>) -> usize {
    let before = pairs.len();
    pairs.retain(|pair| match pair.as_array() {
        Some(items) => items.get(1).is_some_and(Value::is_string),
        None => true,
    });
    before - pairs.len()
}

fn enabled_pair(text: String) -> Value {
    Value::Array(vec![Value::Bool(true), Value::String(text)])
}

/// Read a JSON document; `None` if the file does not exist
pub(crate) fn read_json(path: &Path) -> Result<Option<Value>, CatalogError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` as pretty JSON with the given indent, UTF-8, non-ASCII kept as-is
pub(crate) fn write_json<T: Serialize>(
    path: &Path,
    value: &T,
    indent: &[u8],
) -> Result<(), CatalogError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value
        .serialize(&mut serializer)
        .map_err(|source| CatalogError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, buf).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, Flagged, Song};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = load_catalog(&dir.path().join("data.json")).unwrap();
        assert!(catalog.collections.is_empty());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_catalog(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_migrates_legacy_song_fields() {
        let mut doc = json!({
            "collections": [{
                "id": "old",
                "guessSongOnly": true,
                "songs": [
                    {"title": "Yesterday", "artists": ["The Beatles"], "audioFile": "old/y.mp3"},
                    {"titles": ["Help!", "Help"], "sources": [[false, "Beatles"]]}
                ]
            }]
        });

        assert_eq!(migrate_catalog(&mut doc), 5);
        let catalog: Catalog = serde_json::from_value(doc).unwrap();
        let collection = &catalog.collections[0];
        assert_eq!(collection.game_style, GUESS_SONG_ONLY_GAME_STYLE);

        let first = &collection.songs[0];
        assert_eq!(first.titles, vec![Flagged::enabled("Yesterday")]);
        assert_eq!(first.sources, vec![Flagged::enabled("The Beatles")]);
        assert!(first.extra.is_empty());

        let second = &collection.songs[1];
        assert_eq!(
            second.titles,
            vec![Flagged::enabled("Help!"), Flagged::enabled("Help")]
        );
        assert_eq!(second.sources, vec![Flagged(false, "Beatles".to_string())]);
        assert_eq!(second.audio_file, "");
        assert_eq!(second.start_time, None);
    }

    #[test]
    fn test_pairs_without_text_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{"collections": [{"id": "a", "songs": [
                {"titles": [[true, null], [true, "X"]], "sources": [[false, null]], "audioFile": "a/x.mp3"},
                {"title": null, "audioFile": "a/y.mp3"}
            ]}]}"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        let songs = &catalog.collections[0].songs;
        assert_eq!(songs[0].titles, vec![Flagged::enabled("X")]);
        assert!(songs[0].sources.is_empty());
        assert!(songs[1].titles.is_empty());
    }

    #[test]
    fn test_migration_keeps_key_order() {
        let mut doc = json!({"collections": [{
            "id": "k",
            "songs": [{"audioFile": "k/a.mp3", "title": "A", "year": 1999, "hint": "h"}]
        }]});
        migrate_catalog(&mut doc);

        let song = doc["collections"][0]["songs"][0].as_object().unwrap();
        let keys: Vec<&str> = song.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["audioFile", "year", "hint", "titles"]);
    }

    #[test]
    fn test_guess_song_only_false_is_default_style() {
        let mut doc = json!({"collections": [{"id": "x", "guessSongOnly": false, "gameStyle": 2}]});
        migrate_catalog(&mut doc);
        assert_eq!(doc["collections"][0]["gameStyle"], json!(1));
        assert!(doc["collections"][0].get("guessSongOnly").is_none());
    }

    #[test]
    fn test_collection_defaults_and_unknown_keys_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"collections": [{"id": "bare", "legacy": 1}]}"#).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.collections[0], Collection::new("bare", Vec::new()));
    }

    #[test]
    fn test_save_uses_tabs_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let mut song = Song::new("j/a.mp3");
        song.titles.push(Flagged::enabled("Déjà vu"));
        let mut catalog = Catalog::new();
        catalog.collections.push(Collection::new("j", vec![song]));

        save_catalog(&path, &catalog).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n\t\"collections\": [\n\t\t{\n\t\t\t\"id\": \"j\","));
        assert!(text.contains("Déjà vu"));

        assert_eq!(load_catalog(&path).unwrap(), catalog);
    }
}
