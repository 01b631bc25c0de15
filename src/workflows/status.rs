use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::episode::{season_dir_name, AssetKind, AssetName};
use crate::domain::models::{Episode, SeasonMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Present,
    Missing,
}

impl StatusFilter {
    fn accepts(self, present: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Present => present,
            StatusFilter::Missing => !present,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EpisodeStatus {
    pub episode: Episode,
    pub path: PathBuf,
    pub present: bool,
}

impl EpisodeStatus {
    pub fn line(&self) -> String {
        let mut line = format!(
            "S{:02}E{:02}  {:<7}  {}",
            self.episode.season,
            self.episode.episode,
            if self.present { "present" } else { "missing" },
            self.episode.display_title()
        );
        if let Some(hash) = self.episode.video_hash() {
            line.push_str(&format!("  [{hash}]"));
        }
        line
    }
}

#[derive(Debug, Default)]
pub struct StatusReport {
    pub entries: Vec<EpisodeStatus>,
    pub present: usize,
    pub missing: usize,
    /// Files in the season directories that belong to no known episode.
    pub orphans: Vec<PathBuf>,
}

pub fn collect_status(
    episodes: &SeasonMap<Episode>,
    assets_dir: &Path,
    kind: AssetKind,
    season: Option<u32>,
    filter: StatusFilter,
) -> Result<StatusReport> {
    let mut report = StatusReport::default();
    let mut known = HashSet::new();
    let mut seasons = Vec::new();

    let selected = episodes
        .values()
        .flatten()
        .filter(|ep| season.map_or(true, |s| ep.season == s));
    for episode in selected {
        let path = episode.asset_path(assets_dir, kind);
        let present = path.is_file();
        if present {
            report.present += 1;
        } else {
            report.missing += 1;
        }

        known.insert((episode.season, episode.episode, episode.title.clone()));
        if !seasons.contains(&episode.season) {
            seasons.push(episode.season);
        }

        if filter.accepts(present) {
            report.entries.push(EpisodeStatus {
                episode: episode.clone(),
                path,
                present,
            });
        }
    }

    seasons.sort_unstable();
    for season in seasons {
        let season_dir = kind.dir_path(assets_dir).join(season_dir_name(season));
        report
            .orphans
            .extend(find_orphans(&season_dir, kind, &known)?);
    }

    Ok(report)
}

fn find_orphans(
    season_dir: &Path,
    kind: AssetKind,
    known: &HashSet<(u32, u32, String)>,
) -> Result<Vec<PathBuf>> {
    if !season_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut orphans = Vec::new();
    for entry in fs::read_dir(season_dir)
        .with_context(|| format!("Failed to read {}", season_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let matches_episode = path.extension().and_then(|e| e.to_str()) == Some(kind.extension())
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| AssetName::parse(n).ok())
                .is_some_and(|name| known.contains(&(name.season, name.episode, name.title)));
        if !matches_episode {
            orphans.push(path);
        }
    }
    orphans.sort();
    Ok(orphans)
}
