//! Audio tag reading

use anyhow::{Context, Result};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use std::path::Path;

/// Tag fields the catalog cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioMetadata {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub artists: Vec<String>,
}

/// Metadata reader trait - allows swapping lofty for a fixed table in tests
pub trait MetadataReader: Sync {
    /// Read the tags of one audio file
    fn read(&self, path: &Path) -> Result<AudioMetadata>;
}

/// Reads tags with lofty (ID3v2, Vorbis comments, MP4 atoms, RIFF INFO)
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl LoftyReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<AudioMetadata> {
        let tagged_file = Probe::open(path)
            .with_context(|| format!("Failed to open audio file: {}", path.display()))?
            .read()
            .with_context(|| format!("Failed to read tags from: {}", path.display()))?;

        let tag = match tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
            Some(tag) => tag,
            None => {
                log::debug!("No tags in {}", path.display());
                return Ok(AudioMetadata::default());
            }
        };

        Ok(metadata_from_tag(tag))
    }
}

fn metadata_from_tag(tag: &Tag) -> AudioMetadata {
    let title = tag
        .title()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let year = tag
        .get_string(&ItemKey::RecordingDate)
        .and_then(parse_year)
        .or_else(|| tag.get_string(&ItemKey::Year).and_then(parse_year));

    let artists = tag.artist().map(|a| split_artists(&a)).unwrap_or_default();

    AudioMetadata {
        title,
        year,
        artists,
    }
}

/// Year from a date tag: the first four characters, if they are digits
pub fn parse_year(raw: &str) -> Option<i32> {
    let prefix = raw.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Split an artist tag on `;` and `,`, dropping blanks
pub fn split_artists(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1987"), Some(1987));
        assert_eq!(parse_year("2003-05-12"), Some(2003));
        assert_eq!(parse_year("87"), None);
        assert_eq!(parse_year("May 1987"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_split_artists() {
        assert_eq!(
            split_artists("Daft Punk; Pharrell Williams, Nile Rodgers"),
            vec!["Daft Punk", "Pharrell Williams", "Nile Rodgers"]
        );
        assert_eq!(split_artists(" Solo "), vec!["Solo"]);
        assert!(split_artists(" ;, ").is_empty());
    }

    #[test]
    fn test_metadata_from_tag() {
        use lofty::tag::TagType;

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_title("  Around the World ".to_string());
        tag.set_artist("Daft Punk".to_string());
        tag.insert_text(ItemKey::RecordingDate, "1997-03-17".to_string());

        let meta = metadata_from_tag(&tag);
        assert_eq!(meta.title.as_deref(), Some("Around the World"));
        assert_eq!(meta.year, Some(1997));
        assert_eq!(meta.artists, vec!["Daft Punk"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.mp3");
        assert!(LoftyReader::new().read(&path).is_err());
    }
}
