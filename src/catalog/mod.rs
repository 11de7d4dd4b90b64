//! Catalog generation: `data.json` collections and the `songs.json` index

pub mod config;
pub mod pipeline;
pub mod songs;
pub mod store;

pub use config::CatalogConfig;
pub use pipeline::{CatalogPipeline, UpdateSummary};
pub use songs::{load_song_index, run_song_index, save_song_index, update_song_index, SongIndex};
pub use store::{load_catalog, migrate_catalog, save_catalog, CatalogError};
