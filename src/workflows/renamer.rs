use anyhow::{Context, Result};
use regex::Regex;
use rustyline::DefaultEditor;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::episode::season_dir_name;
use crate::domain::models::season_key;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub already_named: usize,
}

impl RenameSummary {
    fn add(&mut self, other: RenameSummary) {
        self.renamed += other.renamed;
        self.skipped += other.skipped;
        self.already_named += other.already_named;
    }
}

/// `01` + `-` + the file name lowercased, with spaces as hyphens and
/// apostrophes removed.
pub fn video_file_name(season: u32, file_name: &str) -> String {
    let re_cased = file_name.to_lowercase().replace(' ', "-").replace('\'', "");
    format!("{}-{}", season_key(season), re_cased)
}

/// Matches names already in final `SS-EE-title` form for one season.
fn final_name_pattern(season: u32) -> Result<Regex> {
    Ok(Regex::new(&format!(r"^{}-\d{{2,}}-(.+)$", season_key(season)))?)
}

fn is_final_name(pattern: &Regex, file_name: &str) -> bool {
    pattern
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .is_some_and(|rest| {
            let rest = rest.as_str();
            rest.to_lowercase().replace(' ', "-").replace('\'', "") == rest
        })
}

pub fn find_unique_filename(old_path: &Path, directory: &Path, base_filename: &str) -> PathBuf {
    let mut path = directory.join(base_filename);
    let mut counter = 1;

    while path.exists() && path.to_string_lossy() != old_path.to_string_lossy() {
        let stem = Path::new(base_filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("video");
        let new_filename = match Path::new(base_filename).extension().and_then(|s| s.to_str()) {
            Some(extension) => format!("{stem}-copy-{counter}.{extension}"),
            None => format!("{stem}-copy-{counter}"),
        };
        path = directory.join(new_filename);
        counter += 1;
    }

    path
}

pub fn confirm_rename(old_path: &Path, new_path: &Path) -> Result<bool> {
    println!(
        "Rename \"{}\" -> \"{}\"? [y/N] ",
        file_name_lossy(old_path),
        file_name_lossy(new_path)
    );

    let mut rl = DefaultEditor::new()?;
    loop {
        let input = rl.readline("").unwrap_or_default();
        let input = input.trim().to_lowercase();

        if input == "y" || input == "yes" {
            return Ok(true);
        } else if input == "n" || input == "no" || input.is_empty() {
            return Ok(false);
        } else {
            println!("Please enter 'y' or 'n'.");
        }
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Renames every file in `videos_dir/season-{season}` to the prefixed scheme.
/// Files already in final `SS-EE-title` form are left alone.
pub fn rename_videos_for_season(
    videos_dir: &Path,
    season: u32,
    skip_confirm: bool,
) -> Result<RenameSummary> {
    let season_dir = videos_dir.join(season_dir_name(season));
    let mut summary = RenameSummary::default();

    if !season_dir.is_dir() {
        tracing::warn!("Season directory not found: {}", season_dir.display());
        return Ok(summary);
    }

    let pattern = final_name_pattern(season)?;
    let mut file_names = Vec::new();
    for entry in fs::read_dir(&season_dir)
        .with_context(|| format!("Failed to read {}", season_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            file_names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    file_names.sort();

    for file_name in file_names {
        let old_path = season_dir.join(&file_name);
        if is_final_name(&pattern, &file_name) {
            tracing::debug!("Already named: {file_name}");
            summary.already_named += 1;
            continue;
        }

        let new_name = video_file_name(season, &file_name);
        let new_path = find_unique_filename(&old_path, &season_dir, &new_name);

        if rename_file(&old_path, &new_path, skip_confirm)? {
            summary.renamed += 1;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

pub fn rename_all_videos(
    videos_dir: &Path,
    season_count: u32,
    skip_confirm: bool,
) -> Result<RenameSummary> {
    let mut summary = RenameSummary::default();
    for season in 1..=season_count {
        summary.add(rename_videos_for_season(videos_dir, season, skip_confirm)?);
    }
    Ok(summary)
}

/// Returns whether the file was actually renamed.
pub fn rename_file(old_path: &Path, new_path: &Path, skip_confirm: bool) -> Result<bool> {
    if !skip_confirm && !confirm_rename(old_path, new_path)? {
        tracing::info!("Skipped {}", file_name_lossy(old_path));
        return Ok(false);
    }

    fs::rename(old_path, new_path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            old_path.display(),
            new_path.display()
        )
    })?;
    tracing::info!(
        "Renamed {} -> {}",
        file_name_lossy(old_path),
        file_name_lossy(new_path)
    );
    Ok(true)
}
