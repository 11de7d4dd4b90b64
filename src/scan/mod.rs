//! Audio folder scanning
//!
//! Finds audio files under a root directory and reads their tags.
//! Files whose tags cannot be read are kept with empty metadata.

mod metadata;
mod walker;

pub use metadata::{parse_year, split_artists, AudioMetadata, LoftyReader, MetadataReader};
pub use walker::{
    collection_folders, find_audio_files, is_audio_file, relative_path, AUDIO_EXTENSIONS,
};

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// One audio file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path relative to the audio root, `/`-separated
    pub relative_path: String,

    pub metadata: AudioMetadata,
}

/// Scan every audio file below `dir`; paths are made relative to `root`
pub fn scan_dir<R: MetadataReader>(dir: &Path, root: &Path, reader: &R) -> Vec<ScannedFile> {
    let files = find_audio_files(dir);
    log::debug!("Found {} audio file(s) in {}", files.len(), dir.display());
    scan_files(&files, root, reader)
}

/// Read tags for `files` in parallel, keeping their order
pub fn scan_files<R: MetadataReader>(files: &[PathBuf], root: &Path, reader: &R) -> Vec<ScannedFile> {
    files
        .par_iter()
        .map(|path| {
            let metadata = reader.read(path).unwrap_or_else(|e| {
                log::warn!("No metadata for {}: {:#}", path.display(), e);
                AudioMetadata::default()
            });
            ScannedFile {
                relative_path: relative_path(path, root),
                metadata,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    struct NameReader;

    impl MetadataReader for NameReader {
        fn read(&self, path: &Path) -> Result<AudioMetadata> {
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            if stem == "broken" {
                anyhow::bail!("bad tags");
            }
            Ok(AudioMetadata {
                title: Some(stem),
                year: None,
                artists: Vec::new(),
            })
        }
    }

    #[test]
    fn test_scan_dir_keeps_failures_with_empty_metadata() {
        let root = TempDir::new().unwrap();
        let folder = root.path().join("pop");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("broken.mp3"), b"").unwrap();
        fs::write(folder.join("hit.mp3"), b"").unwrap();

        let scanned = scan_dir(&folder, root.path(), &NameReader);
        assert_eq!(scanned.len(), 2);
        assert_eq!(scanned[0].relative_path, "pop/broken.mp3");
        assert_eq!(scanned[0].metadata, AudioMetadata::default());
        assert_eq!(scanned[1].relative_path, "pop/hit.mp3");
        assert_eq!(scanned[1].metadata.title.as_deref(), Some("hit"));
    }
}
