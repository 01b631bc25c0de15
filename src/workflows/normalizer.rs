use anyhow::Context;
use std::path::Path;

use crate::domain::episode::normalize_record;
use crate::domain::error::EpisodeError;
use crate::domain::models::{Episode, RawEpisode, SeasonMap};
use crate::infra::store;

/// What to do with a record whose `name` does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole batch on the first malformed record.
    #[default]
    Fail,
    /// Drop malformed records, report each one and keep going.
    Skip,
}

#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub episodes: SeasonMap<Episode>,
    pub normalized: usize,
    pub skipped: Vec<EpisodeError>,
}

pub fn normalize(
    raw: &SeasonMap<RawEpisode>,
    policy: MalformedPolicy,
) -> Result<NormalizeReport, EpisodeError> {
    let mut report = NormalizeReport::default();

    for (key, records) in raw {
        let mut episodes = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match normalize_record(record) {
                Ok(episode) => episodes.push(episode),
                Err(e) => {
                    let err = EpisodeError::MalformedRecord {
                        key: key.clone(),
                        index,
                        source: Box::new(e),
                    };
                    match policy {
                        MalformedPolicy::Fail => return Err(err),
                        MalformedPolicy::Skip => {
                            tracing::warn!("Skipping malformed record: {err}");
                            report.skipped.push(err);
                        }
                    }
                }
            }
        }
        report.normalized += episodes.len();
        report.episodes.insert(key.clone(), episodes);
    }

    Ok(report)
}

/// Reads raw records from `input` and writes the normalized map to `output`.
/// Nothing is written unless the whole batch normalizes under `policy`.
pub fn normalize_file(
    input: &Path,
    output: &Path,
    policy: MalformedPolicy,
) -> anyhow::Result<NormalizeReport> {
    let raw: SeasonMap<RawEpisode> = store::read_json(input)?;
    let report = normalize(&raw, policy)
        .with_context(|| format!("Malformed record in {}", input.display()))?;
    store::write_json_atomically(output, &report.episodes)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn raw(name: &str, url: &str) -> RawEpisode {
        RawEpisode {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_normalize_matches_expected_json() {
        let input: SeasonMap<RawEpisode> = serde_json::from_str(
            r#"{"01": [{"name": "Season 1 | Episode 2 | The Evidence Never Lies", "url": "http://example.com/v1"}]}"#,
        )
        .unwrap();

        let report = normalize(&input, MalformedPolicy::Fail).unwrap();
        assert_eq!(
            serde_json::to_value(&report.episodes).unwrap(),
            serde_json::json!({
                "01": [{
                    "season": 1,
                    "episode": 2,
                    "title": "the-evidence-never-lies",
                    "url": "http://example.com/v1"
                }]
            })
        );
        assert_eq!(report.normalized, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_keys_and_order_preserved() {
        let mut input = SeasonMap::new();
        input.insert(
            "01".to_string(),
            vec![
                raw("Season 1 | Episode 2 | Second", "b"),
                raw("Season 1 | Episode 1 | First", "a"),
            ],
        );
        input.insert("02".to_string(), vec![]);
        input.insert(
            "14".to_string(),
            vec![raw("Season 14 | Episode 1 | Last One", "c")],
        );

        let report = normalize(&input, MalformedPolicy::Fail).unwrap();
        assert_eq!(
            report.episodes.keys().collect::<Vec<_>>(),
            input.keys().collect::<Vec<_>>()
        );
        let titles: Vec<_> = report.episodes["01"]
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert!(report.episodes["02"].is_empty());
        assert_eq!(report.episodes["14"][0].season, 14);
    }

    #[test]
    fn test_strict_policy_fails_batch() {
        let mut input = SeasonMap::new();
        input.insert(
            "01".to_string(),
            vec![
                raw("Season 1 | Episode 1 | Fine", "a"),
                raw("Season 1 | Episode 2", "b"),
            ],
        );

        let err = normalize(&input, MalformedPolicy::Fail).unwrap_err();
        match err {
            EpisodeError::MalformedRecord { key, index, source } => {
                assert_eq!(key, "01");
                assert_eq!(index, 1);
                assert!(matches!(*source, EpisodeError::WrongPartCount { found: 2, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_skip_policy_reports_and_continues() {
        let mut input = SeasonMap::new();
        input.insert(
            "01".to_string(),
            vec![
                raw("Season 1 | Episode 1 | Fine", "a"),
                raw("Season one | Episode 2 | Bad", "b"),
                raw("Season 1 | Episode 3 | Also Fine", "c"),
            ],
        );
        input.insert("02".to_string(), vec![raw("nonsense", "d")]);

        let report = normalize(&input, MalformedPolicy::Skip).unwrap();
        assert_eq!(report.normalized, 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.episodes["01"].len(), 2);
        assert_eq!(report.episodes["01"][1].episode, 3);
        assert!(report.episodes["02"].is_empty());
        assert_eq!(report.episodes.len(), 2);
    }

    #[test]
    fn test_normalize_file_strict_failure_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("youtube-links.json");
        let output = temp_dir.path().join("episodes.json");
        fs::write(
            &input,
            r#"{"01": [{"name": "Season 1 | Episode 1 | Fine", "url": "a"}, {"name": "Season 1 | Episode 2", "url": "b"}]}"#,
        )
        .unwrap();
        let previous = "{\n  \"01\": []\n}\n";
        fs::write(&output, previous).unwrap();

        let err = normalize_file(&input, &output, MalformedPolicy::Fail).unwrap_err();
        assert!(format!("{err:#}").contains("record 1"));
        assert_eq!(fs::read_to_string(&output).unwrap(), previous);

        let mut names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["episodes.json", "youtube-links.json"]);
    }

    #[test]
    fn test_normalize_file_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("youtube-links.json");
        let output = temp_dir.path().join("out").join("episodes.json");
        fs::write(
            &input,
            r#"{"01": [{"name": "Season 1 | Episode 2 | Cold  Case", "url": "a"}, {"name": "bad", "url": "b"}]}"#,
        )
        .unwrap();

        let report = normalize_file(&input, &output, MalformedPolicy::Skip).unwrap();
        assert_eq!(report.normalized, 1);
        assert_eq!(report.skipped.len(), 1);

        let written: SeasonMap<Episode> = store::read_json(&output).unwrap();
        assert_eq!(written["01"][0].title, "cold--case");
    }
}
