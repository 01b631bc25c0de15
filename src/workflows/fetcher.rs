use anyhow::{Context, Result};

use crate::domain::models::{season_key, OmdbEpisode, SeasonMap};
use crate::infra::omdb::OmdbClient;

pub fn fetch_all_seasons(
    client: &OmdbClient,
    title: &str,
    season_count: u32,
) -> Result<SeasonMap<OmdbEpisode>> {
    let mut episodes_by_season = SeasonMap::new();

    for season in 1..=season_count {
        tracing::info!("Fetching season {season}...");
        let episodes = client
            .fetch_season(title, season)
            .with_context(|| format!("Failed to fetch season {season} of {title:?}"))?;
        tracing::debug!(season, count = episodes.len(), "fetched season");
        episodes_by_season.insert(season_key(season), episodes);
    }

    Ok(episodes_by_season)
}
