//! Transfer types for catalog entries fetched from AniList.

use serde::{Deserialize, Serialize};

/// One catalog entry as it travels through the pipeline: built from a page
/// response, serialized into the snapshot, read back by the loader. Never
/// mutated after creation.
///
/// All optional fields serialize as explicit `null` so the snapshot document
/// carries every key for every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: i32,
    #[serde(default)]
    pub title: AnimeTitle,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "seasonYear")]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub episodes: Option<i32>,
    #[serde(default, rename = "averageScore")]
    pub average_score: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
}

impl AnimeRecord {
    /// Preferred human-readable title: English when present, romaji otherwise.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .english
            .as_deref()
            .or(self.title.romaji.as_deref())
            .unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(english: Option<&str>, romaji: Option<&str>) -> AnimeRecord {
        AnimeRecord {
            id: 1,
            title: AnimeTitle {
                romaji: romaji.map(String::from),
                english: english.map(String::from),
            },
            format: None,
            status: None,
            season_year: None,
            episodes: None,
            average_score: None,
        }
    }

    #[test]
    fn test_display_title_prefers_english() {
        assert_eq!(
            record(Some("Frieren"), Some("Sousou no Frieren")).display_title(),
            "Frieren"
        );
        assert_eq!(
            record(None, Some("Sousou no Frieren")).display_title(),
            "Sousou no Frieren"
        );
        assert_eq!(record(None, None).display_title(), "N/A");
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let json = serde_json::to_string(&record(None, None)).unwrap();
        assert!(json.contains("\"english\":null"));
        assert!(json.contains("\"format\":null"));
        assert!(json.contains("\"seasonYear\":null"));
        assert!(json.contains("\"averageScore\":null"));
    }

    #[test]
    fn test_missing_keys_deserialize_as_none() {
        let rec: AnimeRecord = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(rec.id, 42);
        assert_eq!(rec.title, AnimeTitle::default());
        assert!(rec.episodes.is_none());
    }
}
