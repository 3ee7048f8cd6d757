//! Runtime settings for the data source.

use std::{env, path::PathBuf, time::Duration};

use crate::util::version::{version_label, APP_NAME, APP_REPO_URL};

pub const DEFAULT_BASE_URL: &str = "https://api.uexcorp.uk/2.0/";
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const CACHE_FILENAME: &str = "refining-tracker-cache.json";

const API_URL_VAR: &str = "REFINING_TRACKER_API_URL";
const CACHE_DIR_VAR: &str = "REFINING_TRACKER_CACHE_DIR";
const CACHE_SUBDIR: &str = "refining-tracker";

#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    pub cache_path: PathBuf,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: CACHE_TTL,
            cache_path: default_cache_dir().join(CACHE_FILENAME),
            user_agent: format!("{}/{} (+{})", APP_NAME, version_label(), APP_REPO_URL),
        }
    }
}

impl SourceConfig {
    /// Defaults overridden by `REFINING_TRACKER_API_URL` and
    /// `REFINING_TRACKER_CACHE_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env::var(API_URL_VAR).ok().filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(dir) = env::var_os(CACHE_DIR_VAR).filter(|v| !v.is_empty()) {
            config = config.with_cache_dir(PathBuf::from(dir));
        }
        config
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        // Url::join drops the last segment unless the base ends with a slash.
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_url = base;
        self
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_path = dir.join(CACHE_FILENAME);
        self
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_SUBDIR)
}
