//! Durable JSON checkpoint between the fetch and load stages.
//!
//! The document is a single array of record objects. Absent fields are
//! written as explicit `null`, non-ASCII titles stay verbatim, and the
//! output is indented four spaces so the snapshot stays human-inspectable.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::info;

use crate::models::anime::AnimeRecord;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("snapshot '{path}' is not a valid record document: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error on snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn write_snapshot(path: &Path, records: &[AnimeRecord]) -> Result<(), SnapshotError> {
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|source| SnapshotError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    std::fs::write(path, buf).map_err(io_err)?;
    info!("{} records written to {}", records.len(), path.display());
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<Vec<AnimeRecord>, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SnapshotError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| SnapshotError::Format {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::anime::AnimeTitle;

    fn temp_snapshot_path() -> PathBuf {
        std::env::temp_dir().join(format!("anicat-snapshot-{}.json", uuid::Uuid::new_v4()))
    }

    fn full_record() -> AnimeRecord {
        AnimeRecord {
            id: 101,
            title: AnimeTitle {
                romaji: Some("Sousou no Frieren".to_string()),
                english: Some("Frieren: Beyond Journey's End".to_string()),
            },
            format: Some("TV".to_string()),
            status: Some("FINISHED".to_string()),
            season_year: Some(2023),
            episodes: Some(28),
            average_score: Some(89.0),
        }
    }

    fn bare_record() -> AnimeRecord {
        AnimeRecord {
            id: 102,
            title: AnimeTitle::default(),
            format: None,
            status: None,
            season_year: None,
            episodes: None,
            average_score: None,
        }
    }

    fn unicode_record() -> AnimeRecord {
        AnimeRecord {
            id: 103,
            title: AnimeTitle {
                romaji: Some("葬送のフリーレン".to_string()),
                english: None,
            },
            format: Some("TV".to_string()),
            status: None,
            season_year: None,
            episodes: None,
            average_score: None,
        }
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let path = temp_snapshot_path();
        let records = vec![full_record(), bare_record(), unicode_record()];

        write_snapshot(&path, &records).unwrap();
        let restored = read_snapshot(&path).unwrap();

        assert_eq!(restored, records);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_document_has_explicit_nulls_and_verbatim_unicode() {
        let path = temp_snapshot_path();
        write_snapshot(&path, &[bare_record(), unicode_record()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"english\": null"));
        assert!(text.contains("\"seasonYear\": null"));
        assert!(text.contains("葬送のフリーレン"));
        assert!(!text.contains("\\u"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_sequence_round_trips() {
        let path = temp_snapshot_path();
        write_snapshot(&path, &[]).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), Vec::new());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = temp_snapshot_path();
        assert!(matches!(
            read_snapshot(&path),
            Err(SnapshotError::NotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_document_is_a_format_error() {
        let path = temp_snapshot_path();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_snapshot(&path),
            Err(SnapshotError::Format { .. })
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
