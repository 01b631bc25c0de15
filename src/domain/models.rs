use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season key (zero-padded, e.g. `"01"`) -> episodes in that season.
pub type SeasonMap<T> = BTreeMap<String, Vec<T>>;

/// One scraped video entry, as copied out of the playlist page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawEpisode {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub url: String,
}

/// Episode entry as returned by the OMDb season endpoint. Field names are kept
/// as OMDb spells them so the fetched file mirrors the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OmdbEpisode {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Episode")]
    pub episode: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
}

pub fn season_key(season: u32) -> String {
    format!("{season:02}")
}
