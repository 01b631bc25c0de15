use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    omdb_api_key: Option<String>,
}

/// Resolves the OMDb credential once, at the command boundary: an explicit
/// flag wins over the environment, which wins over the config file.
pub fn get_omdb_api_key(flag: Option<String>) -> Result<String> {
    resolve_api_key(flag, env::var(API_KEY_ENV).ok(), &get_config_path())
}

fn resolve_api_key(
    flag: Option<String>,
    env_value: Option<String>,
    config_path: &Path,
) -> Result<String> {
    if let Some(key) = flag.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }

    if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }

    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: ConfigFile = toml::from_str(&config_content)?;
        if let Some(key) = config.omdb_api_key {
            return Ok(key);
        }
    }

    bail!(
        "OMDb API key not found. Pass --api-key, set {API_KEY_ENV}, or create {} with omdb_api_key = \"your-key\"",
        config_path.display()
    )
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("episode-assets"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
