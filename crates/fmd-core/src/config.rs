use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional location of the released dataset.
pub const DEFAULT_DATASET_PATH: &str = "data/football_matches_2024_2025.csv";
/// Directory whose files are tracked by the checksum store.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Conventional location of the checksum store.
pub const DEFAULT_CHECKSUM_FILE: &str = "checksums.sha256";
/// Config file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "fmd.toml";

/// Validator knobs (optional `[validation]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Match statuses that mean the match was played to completion and must
    /// carry a fulltime score. Compared case-insensitively.
    pub completed_statuses: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            completed_statuses: vec!["FINISHED".to_string(), "AWARDED".to_string()],
        }
    }
}

impl ValidationConfig {
    pub fn is_completed(&self, status: &str) -> bool {
        let status = status.trim();
        self.completed_statuses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(status))
    }
}

/// Tool configuration, from `fmd.toml` or `~/.config/fmd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmdConfig {
    /// Dataset CSV checked by the validator.
    pub dataset_path: PathBuf,
    /// Directory whose files are hashed into the checksum store.
    pub data_dir: PathBuf,
    /// Checksum store file (`<digest>  <path>` lines).
    pub checksum_file: PathBuf,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Default for FmdConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            checksum_file: PathBuf::from(DEFAULT_CHECKSUM_FILE),
            validation: ValidationConfig::default(),
        }
    }
}

pub fn user_config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fmd")?;
    Ok(xdg_dirs.get_config_home().join("fmd").join("config.toml"))
}

/// Parse a config file. Missing keys are an error except `[validation]`.
pub fn load_from_path(path: &Path) -> Result<FmdConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FmdConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Resolve configuration: an explicit path wins, then `./fmd.toml`, then the
/// XDG user config, then built-in defaults. Nothing is written to disk.
pub fn load(explicit: Option<&Path>) -> Result<FmdConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.is_file() {
        tracing::debug!("using config {}", local.display());
        return load_from_path(local);
    }

    match user_config_path() {
        Ok(path) if path.is_file() => {
            tracing::debug!("using config {}", path.display());
            load_from_path(&path)
        }
        Ok(_) => Ok(FmdConfig::default()),
        Err(e) => {
            tracing::debug!("no XDG config dir ({e:#}); using defaults");
            Ok(FmdConfig::default())
        }
    }
}
