//! Persistent on-disk cache for the last refining snapshot.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Ore, RefineryMethod, RefiningData, SourceProvenance, YieldBonus};
use crate::util::format::humanize_age;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Serialized form of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachePayload {
    pub ores: Vec<Ore>,
    pub methods: Vec<RefineryMethod>,
    pub yields: Vec<YieldBonus>,
    #[serde(default)]
    pub provenance: SourceProvenance,
    /// Unix timestamp (milliseconds) of the fetch.
    pub fetched_at: u64,
}

impl CachePayload {
    /// Create a payload stamped with the current time.
    pub fn new(
        ores: Vec<Ore>,
        methods: Vec<RefineryMethod>,
        yields: Vec<YieldBonus>,
        provenance: SourceProvenance,
    ) -> Self {
        Self {
            ores,
            methods,
            yields,
            provenance,
            fetched_at: unix_millis(SystemTime::now()),
        }
    }

    pub fn age(&self) -> Duration {
        let now = unix_millis(SystemTime::now());
        Duration::from_millis(now.saturating_sub(self.fetched_at))
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    /// Worth persisting only when both core tables have rows.
    pub fn is_cacheable(&self) -> bool {
        !self.ores.is_empty() && !self.methods.is_empty()
    }

    pub fn into_snapshot(self, from_cache: bool) -> RefiningData {
        RefiningData {
            ores: self.ores,
            methods: self.methods,
            yields: self.yields,
            provenance: self.provenance,
            from_cache,
            fetched_at: UNIX_EPOCH + Duration::from_millis(self.fetched_at),
        }
    }
}

/// Single-slot file cache with a time-to-live.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached payload if present, readable and not expired.
    /// Every failure is a miss.
    pub fn load(&self) -> Option<CachePayload> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no refining cache");
                return None;
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read refining cache");
                return None;
            }
        };

        let payload: CachePayload = match serde_json::from_str(&content) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to parse refining cache");
                return None;
            }
        };

        if payload.is_expired(self.ttl) {
            debug!(age = %humanize_age(payload.age()), "refining cache expired");
            return None;
        }

        debug!(age = %humanize_age(payload.age()), "refining cache hit");
        Some(payload)
    }

    pub fn save(&self, payload: &CachePayload) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(payload)?;
        fs::write(&self.path, content)?;
        debug!(
            path = %self.path.display(),
            ores = payload.ores.len(),
            methods = payload.methods.len(),
            yields = payload.yields.len(),
            "saved refining cache"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
