//! Collection catalog update from the audio folders

use super::config::CatalogConfig;
use super::store::{load_catalog, save_catalog};
use crate::model::{Catalog, Collection, Flagged, Song};
use crate::scan::{collection_folders, scan_dir, MetadataReader, ScannedFile};
use anyhow::{Context, Result};

/// Counts reported after an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub collections_added: usize,
    pub collections_updated: usize,
    pub songs_added: usize,
}

/// Rebuilds `data.json` from the folders under the audio root
pub struct CatalogPipeline<R: MetadataReader> {
    config: CatalogConfig,
    reader: R,
}

impl<R: MetadataReader> CatalogPipeline<R> {
    pub fn new(config: CatalogConfig, reader: R) -> Self {
        Self { config, reader }
    }

    /// Load, update and save the catalog
    pub fn run(&self) -> Result<UpdateSummary> {
        log::info!("Audio root: {}", self.config.audio_root.display());

        let mut catalog = load_catalog(&self.config.catalog_path)?;
        log::info!(
            "Catalog loaded: {} collections, {} songs",
            catalog.collections.len(),
            catalog.song_count()
        );

        let summary = self.update(&mut catalog)?;

        save_catalog(&self.config.catalog_path, &catalog)?;
        log::info!(
            "Catalog written to {} ({} new collections, {} updated, {} new songs)",
            self.config.catalog_path.display(),
            summary.collections_added,
            summary.collections_updated,
            summary.songs_added
        );
        Ok(summary)
    }

    /// Merge every collection folder into `catalog`
    ///
    /// Existing collections keep their metadata and songs; only songs with
    /// an unseen `audioFile` are appended. Empty folders are skipped.
    pub fn update(&self, catalog: &mut Catalog) -> Result<UpdateSummary> {
        let root = &self.config.audio_root;
        let folders = collection_folders(root)
            .with_context(|| format!("Failed to list collections in {}", root.display()))?;

        let mut summary = UpdateSummary::default();
        for (i, (id, folder)) in folders.iter().enumerate() {
            log::info!("[{}/{}] Scanning: {}", i + 1, folders.len(), id);

            let songs = songs_from_scan(scan_dir(folder, root, &self.reader));
            if songs.is_empty() {
                log::debug!("No audio in {}, skipping", id);
                continue;
            }

            match catalog.get_mut(id) {
                Some(existing) => {
                    let mut added = 0;
                    for song in songs {
                        if !existing.contains_audio(&song.audio_file) {
                            log::debug!("New song in {}: {}", id, song.audio_file);
                            existing.songs.push(song);
                            added += 1;
                        }
                    }
                    summary.collections_updated += 1;
                    summary.songs_added += added;
                }
                None => {
                    log::info!("New collection: {} ({} songs)", id, songs.len());
                    summary.songs_added += songs.len();
                    summary.collections_added += 1;
                    catalog.collections.push(Collection::new(id.clone(), songs));
                }
            }
        }

        Ok(summary)
    }
}

/// Turn scanned files into songs, newest first
///
/// Songs without a year sort as year 0; ties keep scan order.
pub fn songs_from_scan(scanned: Vec<ScannedFile>) -> Vec<Song> {
    let mut songs: Vec<Song> = scanned
        .into_iter()
        .map(|file| {
            let meta = file.metadata;
            let mut song = Song::new(file.relative_path);
            song.titles = meta.title.into_iter().map(Flagged::enabled).collect();
            song.sources = meta.artists.into_iter().map(Flagged::enabled).collect();
            song.year = meta.year;
            song
        })
        .collect();

    songs.sort_by_key(|s| std::cmp::Reverse(s.year.unwrap_or(0)));
    songs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::AudioMetadata;

    fn scanned(path: &str, title: Option<&str>, year: Option<i32>) -> ScannedFile {
        ScannedFile {
            relative_path: path.to_string(),
            metadata: AudioMetadata {
                title: title.map(str::to_string),
                year,
                artists: vec!["A".to_string(), "B".to_string()],
            },
        }
    }

    #[test]
    fn test_songs_sorted_newest_first_stable() {
        let songs = songs_from_scan(vec![
            scanned("x/1.mp3", Some("One"), None),
            scanned("x/2.mp3", Some("Two"), Some(1999)),
            scanned("x/3.mp3", None, Some(2010)),
            scanned("x/4.mp3", Some("Four"), None),
            scanned("x/5.mp3", Some("Five"), Some(1999)),
        ]);

        let order: Vec<&str> = songs.iter().map(|s| s.audio_file.as_str()).collect();
        assert_eq!(order, vec!["x/3.mp3", "x/2.mp3", "x/5.mp3", "x/1.mp3", "x/4.mp3"]);

        assert!(songs[0].titles.is_empty());
        assert_eq!(songs[1].titles, vec![Flagged::enabled("Two")]);
        assert_eq!(
            songs[1].sources,
            vec![Flagged::enabled("A"), Flagged::enabled("B")]
        );
        assert_eq!(songs[1].start_time, None);
    }
}
