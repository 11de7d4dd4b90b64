//! Catalog data model
//!
//! These structures mirror the JSON consumed by the quiz front-end:
//! `data.json` (collections of songs) and `songs.json` (flat song index).

mod collection;
mod song;

pub use collection::{
    normalize_audio_path, Catalog, Collection, DEFAULT_GAME_STYLE, GUESS_SONG_ONLY_GAME_STYLE,
};
pub use song::{Flagged, IndexedSong, Song};
