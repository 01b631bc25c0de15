mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use domain::episode::AssetKind;
use domain::models::{Episode, SeasonMap};
use infra::omdb::OmdbClient;
use infra::store;
use workflows::normalizer::{self, MalformedPolicy};
use workflows::status::StatusFilter;
use workflows::{fetcher, renamer, scaffold, status};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let assets = cli.assets;

    match cli.command {
        Command::Normalize {
            input,
            output,
            skip_malformed,
        } => {
            let policy = if skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Fail
            };
            run_normalize(
                &input.unwrap_or_else(|| assets.join("youtube-links.json")),
                &output.unwrap_or_else(|| assets.join("episodes.json")),
                policy,
            )
        }
        Command::Fetch {
            title,
            seasons,
            api_key,
            output,
        } => {
            let api_key = config::get_omdb_api_key(api_key)?;
            run_fetch(
                OmdbClient::new(api_key),
                &title,
                seasons,
                &output.unwrap_or_else(|| assets.join("episodes.json")),
            )
        }
        Command::Scaffold { parent, seasons } => run_scaffold(&assets.join(parent), seasons),
        Command::RenameVideos {
            dir,
            seasons,
            no_confirm,
        } => run_rename_videos(
            &dir.unwrap_or_else(|| AssetKind::Video.dir_path(&assets)),
            seasons,
            no_confirm,
        ),
        Command::Status {
            episodes,
            asset,
            season,
            filter,
        } => run_status(
            &episodes.unwrap_or_else(|| assets.join("episodes.json")),
            &assets,
            asset.into(),
            season,
            filter.into(),
        ),
    }
}

fn run_normalize(input: &Path, output: &Path, policy: MalformedPolicy) -> Result<()> {
    let report = normalizer::normalize_file(input, output, policy)?;
    tracing::info!(
        "Normalized {} episode(s) across {} season(s) into {}",
        report.normalized,
        report.episodes.len(),
        output.display()
    );
    if !report.skipped.is_empty() {
        tracing::warn!("Skipped {} malformed record(s)", report.skipped.len());
    }
    Ok(())
}

fn run_fetch(client: OmdbClient, title: &str, seasons: u32, output: &Path) -> Result<()> {
    let episodes_by_season = fetcher::fetch_all_seasons(&client, title, seasons)?;
    store::write_json_atomically(output, &episodes_by_season)?;
    tracing::info!("Done!");
    Ok(())
}

fn run_scaffold(parent: &Path, seasons: u32) -> Result<()> {
    let created = scaffold::create_season_dirs(parent, seasons)?;
    tracing::info!(
        "{} season directories ready under {}",
        created.len(),
        parent.display()
    );
    Ok(())
}

fn run_rename_videos(videos_dir: &Path, seasons: u32, skip_confirm: bool) -> Result<()> {
    let summary = renamer::rename_all_videos(videos_dir, seasons, skip_confirm)?;
    tracing::info!(
        "Renamed {}, skipped {}, already named {}",
        summary.renamed,
        summary.skipped,
        summary.already_named
    );
    Ok(())
}

fn run_status(
    episodes_path: &Path,
    assets: &Path,
    kind: AssetKind,
    season: Option<u32>,
    filter: StatusFilter,
) -> Result<()> {
    let episodes: SeasonMap<Episode> = store::read_json(episodes_path)?;
    let report = status::collect_status(&episodes, assets, kind, season, filter)?;

    for entry in &report.entries {
        tracing::debug!(path = %entry.path.display(), present = entry.present);
        println!("{}", entry.line());
    }
    println!(
        "{} present, {} missing ({})",
        report.present,
        report.missing,
        kind.dir_name()
    );

    if !report.orphans.is_empty() {
        println!("Files matching no episode:");
        for path in &report.orphans {
            println!("  {}", display_relative(path, assets).display());
        }
    }
    Ok(())
}

fn display_relative(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
