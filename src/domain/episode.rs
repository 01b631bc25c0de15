use std::path::{Path, PathBuf};

use url::Url;

use super::error::EpisodeError;
use super::models::{Episode, RawEpisode};

const NAME_DELIMITER: &str = " | ";
const SEASON_PREFIX: &str = "Season ";
const EPISODE_PREFIX: &str = "Episode ";

/// Fields pulled out of a raw `"Season N | Episode M | Title"` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName<'a> {
    pub season: u32,
    pub episode: u32,
    pub title: &'a str,
}

pub fn parse_name(name: &str) -> Result<ParsedName<'_>, EpisodeError> {
    let parts: Vec<&str> = name.split(NAME_DELIMITER).collect();
    let [season_label, episode_label, title] = parts[..] else {
        return Err(EpisodeError::WrongPartCount {
            name: name.to_string(),
            found: parts.len(),
        });
    };

    let season = season_label
        .strip_prefix(SEASON_PREFIX)
        .ok_or_else(|| EpisodeError::MissingSeasonPrefix(season_label.to_string()))
        .and_then(parse_number)?;
    let episode = episode_label
        .strip_prefix(EPISODE_PREFIX)
        .ok_or_else(|| EpisodeError::MissingEpisodePrefix(episode_label.to_string()))
        .and_then(parse_number)?;

    Ok(ParsedName {
        season,
        episode,
        title,
    })
}

fn parse_number(value: &str) -> Result<u32, EpisodeError> {
    value
        .parse()
        .map_err(|_| EpisodeError::InvalidNumber(value.to_string()))
}

/// Lowercases ASCII letters, turns each space into a hyphen and drops
/// everything else. Runs of spaces are not collapsed.
pub fn slugify_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

pub fn normalize_record(raw: &RawEpisode) -> Result<Episode, EpisodeError> {
    let parsed = parse_name(&raw.name)?;
    Ok(Episode {
        season: parsed.season,
        episode: parsed.episode,
        title: slugify_title(parsed.title),
        url: raw.url.clone(),
    })
}

/// `the-evidence-never-lies` -> `The Evidence Never Lies`. Every hyphen
/// becomes one space, so `cold--case` keeps both.
pub fn display_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Audio,
}

impl AssetKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Video => "videos",
            AssetKind::Audio => "audio",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Video => "mp4",
            AssetKind::Audio => "mp3",
        }
    }

    pub fn dir_path(self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.dir_name())
    }
}

pub fn season_dir_name(season: u32) -> String {
    format!("season-{season}")
}

impl Episode {
    /// Common file stem for every asset of this episode: `SS-EE-title`.
    pub fn asset_name(&self) -> String {
        format!("{:02}-{:02}-{}", self.season, self.episode, self.title)
    }

    pub fn asset_path(&self, assets_dir: &Path, kind: AssetKind) -> PathBuf {
        kind.dir_path(assets_dir)
            .join(season_dir_name(self.season))
            .join(format!("{}.{}", self.asset_name(), kind.extension()))
    }

    pub fn display_title(&self) -> String {
        display_title(&self.title)
    }

    /// The `v` query parameter of the episode's video URL.
    pub fn video_hash(&self) -> Option<String> {
        if self.url.is_empty() {
            return None;
        }
        let url = Url::parse(&self.url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

/// An asset file name parsed back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
    pub season: u32,
    pub episode: u32,
    pub title: String,
}

impl AssetName {
    pub fn parse(name: &str) -> Result<Self, EpisodeError> {
        let invalid = || EpisodeError::InvalidAssetName(name.to_string());

        // Directory and extension are not part of the name.
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?;

        let mut parts = stem.splitn(3, '-');
        let (Some(season), Some(episode), Some(title)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if title.is_empty() {
            return Err(invalid());
        }

        Ok(AssetName {
            season: season.parse().map_err(|_| invalid())?,
            episode: episode.parse().map_err(|_| invalid())?,
            title: title.to_string(),
        })
    }
}
