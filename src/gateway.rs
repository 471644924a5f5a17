//! Log Gateway
//!
//! Runs one read or one append of the message log against the shared cache
//! and classifies what happened.
//!
//! An append is a single fetch followed by a single store:
//!
//! ```text
//! Start -> Validated -> Fetched(snapshot | absent)
//!       -> CreatedOnMiss | Swapped | Conflicted -> Done
//! ```
//!
//! Nothing is retried. A writer that loses a compare-and-swap race gets
//! [`LogError::VersionConflict`] and its message is dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::error::{CacheError, LogError, Result};
use crate::log::{encode_messages, BoundedLog, LogSnapshot, Message};

// == Append Outcome ==
/// How a successful append reached the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// No log existed; a new one-message log was stored
    Created,
    /// The existing log was replaced through compare-and-swap
    Swapped,
}

// == Log Gateway ==
/// Stateless adapter between requests and the cached log.
#[derive(Clone)]
pub struct LogGateway {
    cache: Arc<dyn SnapshotCache>,
    log: BoundedLog,
    key: String,
    max_content_size: usize,
}

impl LogGateway {
    /// Creates a gateway over `cache`.
    ///
    /// # Arguments
    /// * `cache` - The shared cache the log lives in
    /// * `log` - Append policy (capacity)
    /// * `key` - Cache key of the log
    /// * `max_content_size` - Largest accepted raw payload in bytes
    pub fn new(
        cache: Arc<dyn SnapshotCache>,
        log: BoundedLog,
        key: impl Into<String>,
        max_content_size: usize,
    ) -> Self {
        Self {
            cache,
            log,
            key: key.into(),
            max_content_size,
        }
    }

    /// Creates a gateway with capacity, key and size limit from configuration.
    pub fn from_config(cache: Arc<dyn SnapshotCache>, config: &Config) -> Self {
        Self::new(
            cache,
            BoundedLog::new(config.log_capacity),
            config.messages_key.clone(),
            config.max_content_size,
        )
    }

    pub fn capacity(&self) -> usize {
        self.log.capacity()
    }

    /// Largest accepted raw payload in bytes.
    pub fn max_content_size(&self) -> usize {
        self.max_content_size
    }

    // == Read All ==
    /// Returns the current messages, oldest first.
    ///
    /// A cache miss is an empty log. The caller decides display order.
    pub async fn read_all(&self) -> Result<Vec<Message>> {
        match self.fetch().await? {
            Some(snapshot) => Ok(snapshot.messages),
            None => Ok(Vec::new()),
        }
    }

    // == Append ==
    /// Validates `raw`, then adds the decoded message to the cached log.
    ///
    /// Oversized or malformed payloads are rejected before the cache is
    /// touched.
    pub async fn append(&self, raw: &[u8]) -> Result<AppendOutcome> {
        if raw.len() > self.max_content_size {
            return Err(LogError::PayloadTooLarge {
                size: raw.len(),
                limit: self.max_content_size,
            });
        }
        let message = Message::decode(raw)?;

        match self.fetch().await? {
            None => {
                let messages = self.log.append(None, message);
                let data = encode_messages(&messages)?;
                self.cache
                    .create(&self.key, data)
                    .await
                    .map_err(|e| self.store_failed(e))?;

                debug!(key = %self.key, "created message log");
                Ok(AppendOutcome::Created)
            }
            Some(snapshot) => {
                let LogSnapshot { messages, version } = snapshot;
                let messages = self.log.append(Some(messages), message);
                let data = encode_messages(&messages)?;
                self.cache
                    .compare_and_swap(&self.key, version, data)
                    .await
                    .map_err(|e| self.store_failed(e))?;

                debug!(key = %self.key, %version, len = messages.len(), "appended message");
                Ok(AppendOutcome::Swapped)
            }
        }
    }

    // == Internals ==
    async fn fetch(&self) -> Result<Option<LogSnapshot>> {
        let value = self.cache.fetch(&self.key).await.map_err(|e| {
            warn!(key = %self.key, error = %e, "cache fetch failed");
            LogError::CacheUnavailable(e.to_string())
        })?;

        value.map(LogSnapshot::from_cached).transpose()
    }

    fn store_failed(&self, error: CacheError) -> LogError {
        match error {
            CacheError::VersionConflict => {
                warn!(key = %self.key, "log changed since fetch, message dropped");
                LogError::VersionConflict
            }
            other => {
                warn!(key = %self.key, error = %other, "cache store failed");
                LogError::CacheUnavailable(other.to_string())
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CachedValue, MemoryCache, VersionToken};
    use async_trait::async_trait;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    fn gateway(cache: Arc<dyn SnapshotCache>, capacity: usize) -> LogGateway {
        LogGateway::new(
            cache,
            BoundedLog::new(NonZeroUsize::new(capacity).unwrap()),
            "messages",
            256,
        )
    }

    fn payload(name: &str, body: &str) -> Vec<u8> {
        serde_json::to_vec(&Message::new(name, body)).unwrap()
    }

    /// Counts calls and answers with a fixed script.
    #[derive(Default)]
    struct ScriptedCache {
        fetches: AtomicUsize,
        stores: AtomicUsize,
        fetch_result: Option<std::result::Result<Option<CachedValue>, CacheError>>,
        store_error: Option<CacheError>,
    }

    impl ScriptedCache {
        fn store_result(&self) -> std::result::Result<(), CacheError> {
            self.stores.fetch_add(1, Ordering::SeqCst);
            match &self.store_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SnapshotCache for ScriptedCache {
        async fn fetch(&self, _key: &str) -> std::result::Result<Option<CachedValue>, CacheError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.fetch_result.clone().unwrap_or(Ok(None))
        }

        async fn create(&self, _key: &str, _data: Vec<u8>) -> std::result::Result<(), CacheError> {
            self.store_result()
        }

        async fn compare_and_swap(
            &self,
            _key: &str,
            _version: VersionToken,
            _data: Vec<u8>,
        ) -> std::result::Result<(), CacheError> {
            self.store_result()
        }
    }

    /// Lets every writer fetch before any of them stores.
    struct LockstepCache {
        inner: MemoryCache,
        barrier: Barrier,
    }

    #[async_trait]
    impl SnapshotCache for LockstepCache {
        async fn fetch(&self, key: &str) -> std::result::Result<Option<CachedValue>, CacheError> {
            let value = self.inner.fetch(key).await;
            self.barrier.wait().await;
            value
        }

        async fn create(&self, key: &str, data: Vec<u8>) -> std::result::Result<(), CacheError> {
            self.inner.create(key, data).await
        }

        async fn compare_and_swap(
            &self,
            key: &str,
            version: VersionToken,
            data: Vec<u8>,
        ) -> std::result::Result<(), CacheError> {
            self.inner.compare_and_swap(key, version, data).await
        }
    }

    #[tokio::test]
    async fn test_read_all_on_miss_is_empty() {
        let gw = gateway(Arc::new(MemoryCache::new(10, 0)), 3);
        assert!(gw.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_all_propagates_fetch_error() {
        let cache = ScriptedCache {
            fetch_result: Some(Err(CacheError::Unavailable("down".to_string()))),
            ..Default::default()
        };
        let gw = gateway(Arc::new(cache), 3);

        let result = gw.read_all().await;
        assert!(matches!(result, Err(LogError::CacheUnavailable(_))));
    }

    #[tokio::test]
    async fn test_read_all_is_repeatable() {
        let gw = gateway(Arc::new(MemoryCache::new(10, 0)), 3);
        gw.append(&payload("a", "hi")).await.unwrap();
        gw.append(&payload("b", "yo")).await.unwrap();

        let first = gw.read_all().await.unwrap();
        let second = gw.read_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_first_append_creates_log() {
        let gw = gateway(Arc::new(MemoryCache::new(10, 0)), 1);

        let outcome = gw.append(&payload("a", "hi")).await.unwrap();
        assert_eq!(outcome, AppendOutcome::Created);
        assert_eq!(gw.read_all().await.unwrap(), vec![Message::new("a", "hi")]);
    }

    #[tokio::test]
    async fn test_worked_example_capacity_three() {
        let gw = gateway(Arc::new(MemoryCache::new(10, 0)), 3);

        assert_eq!(
            gw.append(&payload("a", "hi")).await.unwrap(),
            AppendOutcome::Created
        );
        assert_eq!(
            gw.append(&payload("b", "yo")).await.unwrap(),
            AppendOutcome::Swapped
        );
        gw.append(&payload("c", "hey")).await.unwrap();
        assert_eq!(gw.read_all().await.unwrap().len(), 3);

        gw.append(&payload("d", "sup")).await.unwrap();
        assert_eq!(
            gw.read_all().await.unwrap(),
            vec![
                Message::new("b", "yo"),
                Message::new("c", "hey"),
                Message::new("d", "sup"),
            ]
        );
    }

    #[tokio::test]
    async fn test_oversize_payload_never_reaches_cache() {
        let cache = Arc::new(ScriptedCache::default());
        let gw = gateway(cache.clone(), 3);
        let big = payload("a", &"x".repeat(300));

        let result = gw.append(&big).await;
        assert!(matches!(result, Err(LogError::PayloadTooLarge { limit: 256, .. })));
        assert_eq!(cache.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(cache.stores.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_payload_at_limit_is_accepted() {
        let gw = gateway(Arc::new(MemoryCache::new(10, 0)), 3);
        // {"name":"a","body":"..."} has 22 bytes of framing
        let exact = payload("a", &"x".repeat(256 - 22));
        assert_eq!(exact.len(), 256);

        assert!(gw.append(&exact).await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_payload_never_reaches_cache() {
        let cache = Arc::new(ScriptedCache::default());
        let gw = gateway(cache.clone(), 3);

        let result = gw.append(b"{\"name\":").await;
        assert!(matches!(result, Err(LogError::InvalidMessage(_))));
        assert_eq!(cache.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_skips_store() {
        let cache = Arc::new(ScriptedCache {
            fetch_result: Some(Err(CacheError::Unavailable("down".to_string()))),
            ..Default::default()
        });
        let gw = gateway(cache.clone(), 3);

        let result = gw.append(&payload("a", "hi")).await;
        assert!(matches!(result, Err(LogError::CacheUnavailable(_))));
        assert_eq!(cache.stores.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_error_is_internal() {
        let cache = Arc::new(ScriptedCache {
            store_error: Some(CacheError::Unavailable("full".to_string())),
            ..Default::default()
        });
        let gw = gateway(cache.clone(), 3);

        let result = gw.append(&payload("a", "hi")).await;
        assert!(matches!(result, Err(LogError::CacheUnavailable(_))));
        assert_eq!(cache.stores.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_swap_conflict_is_reported_once() {
        let existing = CachedValue {
            data: encode_messages(&[Message::new("a", "hi")]).unwrap(),
            version: VersionToken::new(4),
        };
        let cache = Arc::new(ScriptedCache {
            fetch_result: Some(Ok(Some(existing))),
            store_error: Some(CacheError::VersionConflict),
            ..Default::default()
        });
        let gw = gateway(cache.clone(), 3);

        let result = gw.append(&payload("b", "yo")).await;
        assert!(matches!(result, Err(LogError::VersionConflict)));
        assert_eq!(cache.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stores.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_snapshot_is_internal() {
        let cache = Arc::new(ScriptedCache {
            fetch_result: Some(Ok(Some(CachedValue {
                data: b"not a log".to_vec(),
                version: VersionToken::new(1),
            }))),
            ..Default::default()
        });
        let gw = gateway(cache.clone(), 3);

        assert!(matches!(
            gw.read_all().await,
            Err(LogError::CacheUnavailable(_))
        ));
        assert!(matches!(
            gw.append(&payload("a", "hi")).await,
            Err(LogError::CacheUnavailable(_))
        ));
        assert_eq!(cache.stores.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_on_same_version() {
        let memory = MemoryCache::new(10, 0);
        let seed = gateway(Arc::new(memory.clone()), 3);
        seed.append(&payload("a", "hi")).await.unwrap();

        let cache = Arc::new(LockstepCache {
            inner: memory,
            barrier: Barrier::new(2),
        });
        let gw = gateway(cache, 3);

        let (payload_b, payload_c) = (payload("b", "yo"), payload("c", "hey"));
        let (first, second) = tokio::join!(gw.append(&payload_b), gw.append(&payload_c));

        let results = [first, second];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(LogError::VersionConflict)))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(conflicts, 1);

        let log = seed.read_all().await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], Message::new("a", "hi"));
        let winner = if results[0].is_ok() { "b" } else { "c" };
        let loser = if winner == "b" { "c" } else { "b" };
        assert_eq!(log[1].name, winner);
        assert!(log.iter().all(|m| m.name != loser));
    }
}
