use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::anime::{AnimeRecord, AnimeTitle};
use crate::services::fetch::{CatalogPage, PageError, PageSource};

/// Catalog page query, popularity-descending so the most relevant entries
/// land first in the snapshot.
const PAGE_QUERY: &str = r"
    query ($page: Int, $perPage: Int) {
        Page(page: $page, perPage: $perPage) {
            pageInfo {
                total
                currentPage
                lastPage
                hasNextPage
            }
            media(type: ANIME, sort: POPULARITY_DESC) {
                id
                title { romaji english }
                format
                status
                seasonYear
                episodes
                averageScore
            }
        }
    }
";

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Variables,
}

#[derive(Serialize)]
struct Variables {
    page: u32,
    #[serde(rename = "perPage")]
    per_page: u32,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "Page")]
    page: Page,
}

#[derive(Deserialize)]
struct Page {
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
    media: Vec<Media>,
}

#[derive(Deserialize)]
struct PageInfo {
    total: Option<i32>,
    #[serde(rename = "hasNextPage")]
    has_next_page: bool,
}

#[derive(Deserialize)]
struct Media {
    id: i32,
    title: Title,
    format: Option<String>,
    status: Option<String>,
    #[serde(rename = "seasonYear")]
    season_year: Option<i32>,
    episodes: Option<i32>,
    #[serde(rename = "averageScore")]
    average_score: Option<i32>,
}

#[derive(Deserialize)]
struct Title {
    romaji: Option<String>,
    english: Option<String>,
}

impl Media {
    fn into_record(self) -> AnimeRecord {
        AnimeRecord {
            id: self.id,
            title: AnimeTitle {
                romaji: self.title.romaji,
                english: self.title.english,
            },
            format: self.format,
            status: self.status,
            season_year: self.season_year,
            episodes: self.episodes,
            average_score: self.average_score.map(|s| s as f32),
        }
    }
}

#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    api_url: String,
}

impl AnilistClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("anicat/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl PageSource for AnilistClient {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<CatalogPage, PageError> {
        let request_body = GraphQLRequest {
            query: PAGE_QUERY,
            variables: Variables { page, per_page },
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| PageError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Http(status.as_u16()));
        }

        let payload: GraphQLResponse = response
            .json()
            .await
            .map_err(|err| PageError::Parse(err.to_string()))?;

        let page_data = payload
            .data
            .ok_or_else(|| PageError::Parse("response carries no data object".to_string()))?
            .page;

        Ok(CatalogPage {
            records: page_data
                .media
                .into_iter()
                .map(Media::into_record)
                .collect(),
            has_next_page: page_data.page_info.has_next_page,
            total: page_data.page_info.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_payload_maps_to_records() {
        let payload = r#"{
            "data": {
                "Page": {
                    "pageInfo": {
                        "total": 2,
                        "currentPage": 1,
                        "lastPage": 1,
                        "hasNextPage": false
                    },
                    "media": [
                        {
                            "id": 21,
                            "title": {"romaji": "One Piece", "english": "ONE PIECE"},
                            "format": "TV",
                            "status": "RELEASING",
                            "seasonYear": 1999,
                            "episodes": null,
                            "averageScore": 88
                        },
                        {
                            "id": 170083,
                            "title": {"romaji": "残響のテロル", "english": null},
                            "format": null,
                            "status": null,
                            "seasonYear": null,
                            "episodes": null,
                            "averageScore": null
                        }
                    ]
                }
            }
        }"#;

        let response: GraphQLResponse = serde_json::from_str(payload).unwrap();
        let page = response.data.unwrap().page;
        assert!(!page.page_info.has_next_page);
        assert_eq!(page.page_info.total, Some(2));

        let records: Vec<AnimeRecord> = page.media.into_iter().map(Media::into_record).collect();
        assert_eq!(records[0].id, 21);
        assert_eq!(records[0].average_score, Some(88.0));
        assert_eq!(records[1].title.romaji.as_deref(), Some("残響のテロル"));
        assert!(records[1].format.is_none());
    }

    #[test]
    fn test_missing_data_object_is_detectable() {
        let response: GraphQLResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(response.data.is_none());
    }
}
