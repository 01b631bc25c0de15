use serde::Deserialize;

use anyhow::{bail, Result};

use crate::domain::models::OmdbEpisode;

const OMDB_API_BASE: &str = "http://www.omdbapi.com/";

#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Episodes", default)]
    episodes: Vec<OmdbEpisode>,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn fetch_season(&self, title: &str, season: u32) -> Result<Vec<OmdbEpisode>> {
        let season = season.to_string();
        let response = self
            .client
            .get(OMDB_API_BASE)
            .query(&[
                ("t", title),
                ("Season", season.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()?;

        if !response.status().is_success() {
            bail!("OMDb season lookup failed: HTTP {}", response.status());
        }

        parse_season_response(&response.text()?)
    }
}

fn parse_season_response(body: &str) -> Result<Vec<OmdbEpisode>> {
    let season_resp: SeasonResponse = serde_json::from_str(body)?;
    if season_resp.response.eq_ignore_ascii_case("false") {
        bail!(
            "OMDb returned an error: {}",
            season_resp.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(season_resp.episodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season_response() {
        let body = r#"{
            "Title": "Forensic Files",
            "Season": "1",
            "totalSeasons": "14",
            "Episodes": [
                {"Title": "The Disappearance of Helle Crafts", "Released": "1996-04-23", "Episode": "1", "imdbRating": "8.3", "imdbID": "tt0645563"},
                {"Title": "The Magic Bullet", "Released": "1996-04-30", "Episode": "2", "imdbRating": "8.0", "imdbID": "tt0645564"}
            ],
            "Response": "True"
        }"#;

        let episodes = parse_season_response(body).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "The Disappearance of Helle Crafts");
        assert_eq!(episodes[1].episode, "2");
        assert_eq!(episodes[1].imdb_id, "tt0645564");
    }

    #[test]
    fn test_serializes_omdb_field_names() {
        let body = r#"{"Episodes": [{"Title": "T", "Released": "N/A", "Episode": "3", "imdbRating": "N/A", "imdbID": "tt1"}], "Response": "True"}"#;
        let episodes = parse_season_response(body).unwrap();
        let value = serde_json::to_value(&episodes[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Title": "T",
                "Released": "N/A",
                "Episode": "3",
                "imdbRating": "N/A",
                "imdbID": "tt1"
            })
        );
    }

    #[test]
    fn test_missing_episodes_is_empty_season() {
        let episodes = parse_season_response(r#"{"Response": "True"}"#).unwrap();
        assert!(episodes.is_empty());
    }

    #[test]
    fn test_error_response() {
        let err =
            parse_season_response(r#"{"Response": "False", "Error": "Invalid API key!"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("Invalid API key!"));
    }
}
