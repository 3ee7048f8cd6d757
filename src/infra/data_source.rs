//! Refining data acquisition: cache lookup, single-flight fetch, and
//! per-resource fallback.

use std::sync::Arc;

use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{fallback_methods, fallback_ores, Provenance, RefiningData, SourceProvenance};
use crate::infra::{
    cache::{CachePayload, SnapshotCache},
    config::SourceConfig,
    normalize::{parse_methods, parse_ores, parse_yields},
    uex::{EconomySource, Resource, UexClient, UexClientError},
};
use crate::util::format::humanize_age;

#[derive(Clone, Debug, Error)]
pub enum DataSourceError {
    #[error("refining data fetch aborted: {0}")]
    FetchAborted(String),
}

type FetchResult = Result<Arc<RefiningData>, DataSourceError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// The single-flight slot. `generation` identifies which fetch currently
/// owns `pending`.
#[derive(Default)]
struct InFlight {
    generation: u64,
    pending: Option<SharedFetch>,
}

#[derive(Clone)]
pub struct RefiningDataSource {
    source: Arc<dyn EconomySource>,
    cache: SnapshotCache,
    in_flight: Arc<Mutex<InFlight>>,
}

impl RefiningDataSource {
    pub fn new(config: &SourceConfig) -> Result<Self, UexClientError> {
        let client = UexClient::from_config(config)?;
        let cache = SnapshotCache::new(config.cache_path.clone(), config.cache_ttl);
        Ok(Self::with_source(Arc::new(client), cache))
    }

    pub fn with_source(source: Arc<dyn EconomySource>, cache: SnapshotCache) -> Self {
        Self {
            source,
            cache,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    /// Returns a snapshot from the cache or a fetch cycle.
    ///
    /// Without `force_refresh`, a fresh cache entry is returned as-is and
    /// concurrent callers share one in-flight fetch. With it, a new fetch
    /// cycle always starts.
    pub async fn get_data(&self, force_refresh: bool) -> FetchResult {
        if !force_refresh {
            if let Some(payload) = self.cache.load() {
                info!(age = %humanize_age(payload.age()), "serving refining data from cache");
                return Ok(Arc::new(payload.into_snapshot(true)));
            }
        }

        let fetch = {
            let mut slot = self.in_flight.lock().await;
            match slot.pending.as_ref() {
                Some(pending) if !force_refresh => {
                    debug!("joining in-flight refining fetch");
                    pending.clone()
                }
                _ => {
                    slot.generation += 1;
                    let fetch = self.start_fetch(slot.generation);
                    slot.pending = Some(fetch.clone());
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Removes the persisted snapshot and forgets any in-flight fetch.
    pub async fn clear_cache(&self) {
        if let Err(err) = self.cache.clear() {
            warn!(%err, "failed to remove refining cache");
        } else {
            info!(path = %self.cache.path().display(), "refining cache cleared");
        }
        let mut slot = self.in_flight.lock().await;
        slot.generation += 1;
        slot.pending = None;
    }

    /// Spawns the fetch cycle so it runs to completion even if every caller
    /// stops waiting.
    fn start_fetch(&self, generation: u64) -> SharedFetch {
        let source = Arc::clone(&self.source);
        let cache = self.cache.clone();
        let in_flight = Arc::clone(&self.in_flight);

        let task = tokio::spawn(async move {
            let snapshot = Arc::new(fetch_cycle(source.as_ref(), &cache).await);
            let mut slot = in_flight.lock().await;
            if slot.generation == generation {
                slot.pending = None;
            }
            snapshot
        });

        task.map(|joined| joined.map_err(|err| DataSourceError::FetchAborted(err.to_string())))
            .boxed()
            .shared()
    }
}

/// Fetches all three resources concurrently. Each failure is handled on its
/// own; none of them aborts the others.
async fn fetch_cycle(source: &dyn EconomySource, cache: &SnapshotCache) -> RefiningData {
    info!("fetching refining data from UEX");
    let (commodities, methods, yields) = tokio::join!(
        source.fetch_list(Resource::Commodities),
        source.fetch_list(Resource::RefineryMethods),
        source.fetch_list(Resource::RefineryYields),
    );

    let (ores, ores_from) = match commodities {
        Ok(raw) => (parse_ores(raw), Provenance::Live),
        Err(err) => {
            warn!(%err, "commodities unavailable; using bundled ore table");
            (fallback_ores(), Provenance::Fallback)
        }
    };
    let (methods, methods_from) = match methods {
        Ok(raw) => (parse_methods(raw), Provenance::Live),
        Err(err) => {
            warn!(%err, "refinery methods unavailable; using bundled method table");
            (fallback_methods(), Provenance::Fallback)
        }
    };
    let (yields, yields_from) = match yields {
        Ok(raw) => (parse_yields(raw), Provenance::Live),
        Err(err) => {
            warn!(%err, "refinery yields unavailable; continuing without station bonuses");
            (Vec::new(), Provenance::Missing)
        }
    };

    let provenance = SourceProvenance {
        ores: ores_from,
        methods: methods_from,
        yields: yields_from,
    };
    let payload = CachePayload::new(ores, methods, yields, provenance);
    info!(
        ores = payload.ores.len(),
        methods = payload.methods.len(),
        yields = payload.yields.len(),
        ?provenance,
        "refining data fetched"
    );

    if payload.is_cacheable() {
        if let Err(err) = cache.save(&payload) {
            warn!(%err, "failed to write refining cache");
        }
    } else {
        warn!("empty ore or method table; not caching this snapshot");
    }

    payload.into_snapshot(false)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    /// In-memory source. `None` for a resource simulates an outage.
    #[derive(Default)]
    struct FakeSource {
        commodities: Option<Vec<Value>>,
        methods: Option<Vec<Value>>,
        yields: Option<Vec<Value>>,
        calls: [AtomicUsize; 3],
    }

    impl FakeSource {
        fn healthy() -> Self {
            Self {
                commodities: Some(vec![
                    json!({ "id": 33, "name": "Gold", "code": "GOLD", "kind": "Metal", "price_sell": 7377 }),
                    json!({ "id": 34, "id_parent": 33, "name": "Gold (Ore)", "is_refinable": 1 }),
                ]),
                methods: Some(vec![json!({
                    "id": 2, "name": "Dinyx Solventation", "code": "DIN",
                    "rating_yield": 3, "rating_cost": 1, "rating_speed": 1
                })]),
                yields: Some(vec![json!({
                    "id_commodity": 34, "value": 3, "id_space_station": 12,
                    "space_station_name": "ARC-L1 Wide Forest Station"
                })]),
                ..Self::default()
            }
        }

        fn calls(&self, resource: Resource) -> usize {
            self.calls[index(resource)].load(Ordering::SeqCst)
        }
    }

    fn index(resource: Resource) -> usize {
        match resource {
            Resource::Commodities => 0,
            Resource::RefineryMethods => 1,
            Resource::RefineryYields => 2,
        }
    }

    #[async_trait]
    impl EconomySource for FakeSource {
        async fn fetch_list(&self, resource: Resource) -> Result<Vec<Value>, UexClientError> {
            self.calls[index(resource)].fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            let list = match resource {
                Resource::Commodities => &self.commodities,
                Resource::RefineryMethods => &self.methods,
                Resource::RefineryYields => &self.yields,
            };
            list.clone().ok_or(UexClientError::UnexpectedShape("null"))
        }
    }

    fn setup(source: FakeSource) -> (TempDir, Arc<FakeSource>, RefiningDataSource) {
        crate::util::logging::init_test();
        let dir = TempDir::new().unwrap();
        let source = Arc::new(source);
        let cache = SnapshotCache::new(dir.path().join("cache.json"), DAY);
        let data_source = RefiningDataSource::with_source(source.clone(), cache);
        (dir, source, data_source)
    }

    fn assert_calls(source: &FakeSource, expected: usize) {
        for resource in Resource::ALL {
            assert_eq!(source.calls(resource), expected, "{resource}");
        }
    }

    #[tokio::test]
    async fn fresh_cache_is_served_without_network() {
        let (dir, source, data_source) = setup(FakeSource::healthy());
        let payload = CachePayload::new(
            fallback_ores(),
            fallback_methods(),
            Vec::new(),
            SourceProvenance::default(),
        );
        SnapshotCache::new(dir.path().join("cache.json"), DAY)
            .save(&payload)
            .unwrap();

        let data = data_source.get_data(false).await.unwrap();
        assert!(data.from_cache);
        assert_eq!(data.ores, payload.ores);
        assert_eq!(data.methods, payload.methods);
        assert_calls(&source, 0);
    }

    #[tokio::test]
    async fn expired_cache_triggers_live_fetch() {
        let (dir, source, data_source) = setup(FakeSource::healthy());
        let mut payload = CachePayload::new(
            fallback_ores(),
            fallback_methods(),
            Vec::new(),
            SourceProvenance::default(),
        );
        payload.fetched_at -= (DAY + Duration::from_secs(1)).as_millis() as u64;
        SnapshotCache::new(dir.path().join("cache.json"), DAY)
            .save(&payload)
            .unwrap();

        let data = data_source.get_data(false).await.unwrap();
        assert!(!data.from_cache);
        assert_eq!(data.ores.len(), 1);
        assert_eq!(data.ores[0].name, "Gold");
        assert_eq!(data.yields.len(), 1);
        assert!(data.provenance.all_live());
        assert_calls(&source, 1);
    }

    #[tokio::test]
    async fn failed_resource_falls_back_without_aborting_others() {
        let (_dir, source, data_source) = setup(FakeSource {
            commodities: None,
            ..FakeSource::healthy()
        });

        let data = data_source.get_data(false).await.unwrap();
        assert_eq!(data.ores, fallback_ores());
        assert_eq!(data.provenance.ores, Provenance::Fallback);
        assert_eq!(data.methods.len(), 1);
        assert_eq!(data.methods[0].code, "DIN");
        assert_eq!(data.provenance.methods, Provenance::Live);
        assert_eq!(data.yields.len(), 1);
        assert_calls(&source, 1);
    }

    #[tokio::test]
    async fn failed_yields_leave_an_empty_table() {
        let (_dir, _source, data_source) = setup(FakeSource {
            yields: None,
            ..FakeSource::healthy()
        });

        let data = data_source.get_data(false).await.unwrap();
        assert!(data.yields.is_empty());
        assert_eq!(data.provenance.yields, Provenance::Missing);
        assert_eq!(data.ores[0].name, "Gold");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let (_dir, source, data_source) = setup(FakeSource::healthy());
        let other = data_source.clone();

        let (first, second) = tokio::join!(data_source.get_data(false), other.get_data(false));
        let (first, second) = (first.unwrap(), second.unwrap());

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!first.from_cache);
        assert_calls(&source, 1);
    }

    #[tokio::test]
    async fn forced_refreshes_do_not_share() {
        let (_dir, source, data_source) = setup(FakeSource::healthy());

        let (first, second) = tokio::join!(data_source.get_data(true), data_source.get_data(true));
        assert!(!Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
        assert_calls(&source, 2);
    }

    #[tokio::test]
    async fn forced_refresh_skips_fresh_cache() {
        let (_dir, source, data_source) = setup(FakeSource::healthy());
        data_source.get_data(false).await.unwrap();

        let cached = data_source.get_data(false).await.unwrap();
        assert!(cached.from_cache);
        assert_calls(&source, 1);

        let forced = data_source.get_data(true).await.unwrap();
        assert!(!forced.from_cache);
        assert_calls(&source, 2);
    }

    #[tokio::test]
    async fn clear_cache_forces_fresh_fetch() {
        let (_dir, source, data_source) = setup(FakeSource::healthy());
        data_source.get_data(false).await.unwrap();

        data_source.clear_cache().await;
        let data = data_source.get_data(false).await.unwrap();
        assert!(!data.from_cache);
        assert_calls(&source, 2);
    }

    #[tokio::test]
    async fn empty_tables_are_never_cached() {
        let (dir, source, data_source) = setup(FakeSource {
            commodities: Some(Vec::new()),
            ..FakeSource::healthy()
        });

        let data = data_source.get_data(false).await.unwrap();
        assert!(data.ores.is_empty());
        assert!(!dir.path().join("cache.json").exists());

        data_source.get_data(false).await.unwrap();
        assert_calls(&source, 2);
    }

    #[tokio::test]
    async fn fallback_snapshot_is_cached_with_its_provenance() {
        let (_dir, source, data_source) = setup(FakeSource::default());

        let live = data_source.get_data(false).await.unwrap();
        assert_eq!(live.provenance.degraded(), vec!["ores", "methods", "yield bonuses"]);

        let cached = data_source.get_data(false).await.unwrap();
        assert!(cached.from_cache);
        assert_eq!(cached.provenance, live.provenance);
        assert_eq!(cached.methods, fallback_methods());
        assert_calls(&source, 1);
    }
}
