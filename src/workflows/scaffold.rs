use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::episode::season_dir_name;

/// Creates `season-1` through `season-{season_count}` under `parent`.
/// Existing directories are left untouched.
pub fn create_season_dirs(parent: &Path, season_count: u32) -> Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(season_count as usize);

    for season in 1..=season_count {
        let season_dir = parent.join(season_dir_name(season));
        fs::create_dir_all(&season_dir)
            .with_context(|| format!("Failed to create {}", season_dir.display()))?;
        tracing::debug!(path = %season_dir.display(), "season directory ready");
        created.push(season_dir);
    }

    Ok(created)
}
