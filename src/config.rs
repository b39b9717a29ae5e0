use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::models::{ConferenceFile, ConferenceRecord};

/// Location of the conference list, relative to the base directory
pub const CONFERENCES_FILE: &str = "data/conferences.yaml";

pub const DEFAULT_REPO_URL: &str = "https://github.com/YOUR_USERNAME/conference-tracker";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Runtime settings shared with every handler
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `data/conferences.yaml`
    pub base_dir: PathBuf,
    /// Linked from the page so visitors can propose additions
    pub github_repo_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    /// Read `TRACKER_BASE_DIR`, `GITHUB_REPO_URL` and `BIND_ADDR`, falling back to defaults.
    pub fn from_env() -> Self {
        let base_dir = env::var("TRACKER_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            base_dir,
            github_repo_url: env::var("GITHUB_REPO_URL").unwrap_or_else(|_| DEFAULT_REPO_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    pub fn conferences_path(&self) -> PathBuf {
        self.base_dir.join(CONFERENCES_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            github_repo_url: DEFAULT_REPO_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Load the raw conference list from `<base_dir>/data/conferences.yaml`.
///
/// The file must resolve inside `base_dir` (symlinks included). A file
/// without a `conferences` key yields an empty list.
pub fn load_conferences(base_dir: &Path) -> Result<Vec<ConferenceRecord>> {
    let path = resolve_inside(base_dir, CONFERENCES_FILE)?;

    let contents = std::fs::read_to_string(&path).map_err(|source| TrackerError::Io {
        path: path.clone(),
        source,
    })?;

    let file: ConferenceFile =
        serde_yaml::from_str(&contents).map_err(|source| TrackerError::Yaml { path, source })?;

    Ok(file.conferences)
}

fn resolve_inside(base_dir: &Path, relative: &str) -> Result<PathBuf> {
    let base = base_dir.canonicalize().map_err(|source| TrackerError::Io {
        path: base_dir.to_path_buf(),
        source,
    })?;

    let joined = base.join(relative);
    let path = joined
        .canonicalize()
        .map_err(|source| TrackerError::Io { path: joined, source })?;

    if !path.starts_with(&base) {
        return Err(TrackerError::PathOutsideBase { path, base });
    }

    Ok(path)
}
