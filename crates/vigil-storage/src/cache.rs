// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-to-live result cache for any [`QueryBackend`].
//!
//! Results are keyed by exact query text. Failed queries are never cached,
//! so a transient backend error does not stick for a whole TTL.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use vigil_core::{AdapterType, HealthStatus, PluginAdapter, QueryBackend, Table, VigilError};

struct CachedTable {
    stored_at: Instant,
    table: Table,
}

/// Decorator adding a TTL cache in front of another backend.
///
/// Callers see the same rows with or without the cache; only latency changes.
pub struct CachedBackend<B> {
    inner: B,
    ttl: Duration,
    entries: DashMap<String, CachedTable>,
}

impl<B: QueryBackend> CachedBackend<B> {
    /// Wrap `inner`. A zero `ttl` disables caching entirely.
    pub fn new(inner: B, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Number of live cached results (expired entries are dropped first).
    pub fn len(&self) -> usize {
        self.evict_expired();
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached result.
    pub fn invalidate(&self) {
        self.entries.clear();
    }

    fn evict_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    fn lookup(&self, query: &str) -> Option<Table> {
        let entry = self.entries.get(query)?;
        if entry.stored_at.elapsed() < self.ttl {
            return Some(entry.table.clone());
        }
        drop(entry);
        self.entries.remove(query);
        None
    }
}

#[async_trait]
impl<B: QueryBackend> PluginAdapter for CachedBackend<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> semver::Version {
        self.inner.version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::QueryBackend
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        self.invalidate();
        self.inner.shutdown().await
    }
}

#[async_trait]
impl<B: QueryBackend> QueryBackend for CachedBackend<B> {
    async fn execute(&self, query: &str) -> Result<Table, VigilError> {
        if self.ttl.is_zero() {
            return self.inner.execute(query).await;
        }

        if let Some(table) = self.lookup(query) {
            debug!(rows = table.row_count(), "query cache hit");
            return Ok(table);
        }

        let table = self.inner.execute(query).await?;
        self.evict_expired();
        self.entries.insert(
            query.to_string(),
            CachedTable {
                stored_at: Instant::now(),
                table: table.clone(),
            },
        );
        debug!(rows = table.row_count(), "query cache miss, stored");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vigil_core::Value;

    /// Counts calls and fails any query containing "fail".
    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PluginAdapter for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 1)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::QueryBackend
        }
        async fn health_check(&self) -> Result<HealthStatus, VigilError> {
            Ok(HealthStatus::Healthy)
        }
        async fn shutdown(&self) -> Result<(), VigilError> {
            Ok(())
        }
    }

    #[async_trait]
    impl QueryBackend for CountingBackend {
        async fn execute(&self, query: &str) -> Result<Table, VigilError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
            if query.contains("fail") {
                return Err(VigilError::backend("boom"));
            }
            Table::with_rows(["n"], vec![vec![Value::Integer(n)]])
        }
    }

    fn calls(cache: &CachedBackend<CountingBackend>) -> usize {
        cache.inner().calls.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn repeated_query_is_served_from_cache() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_secs(300));
        let first = cache.execute("SELECT n").await.unwrap();
        let second = cache.execute("SELECT n").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls(&cache), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn key_is_exact_query_text() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_secs(300));
        cache.execute("SELECT n").await.unwrap();
        cache.execute("select n").await.unwrap();
        assert_eq!(calls(&cache), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_secs(300));
        assert!(cache.execute("fail").await.is_err());
        assert!(cache.execute("fail").await.is_err());
        assert_eq!(calls(&cache), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn entries_expire() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_millis(30));
        cache.execute("SELECT n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let again = cache.execute("SELECT n").await.unwrap();
        assert_eq!(again.rows()[0][0], Value::Integer(1));
        assert_eq!(calls(&cache), 2);
    }

    #[tokio::test]
    async fn expired_entries_are_swept_on_insert() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_millis(30));
        cache.execute("SELECT a").await.unwrap();
        cache.execute("SELECT b").await.unwrap();
        assert_eq!(cache.entries.len(), 2);

        tokio::time::sleep(Duration::from_millis(60)).await;
        cache.execute("SELECT c").await.unwrap();
        assert_eq!(cache.entries.len(), 1);
        assert!(cache.entries.contains_key("SELECT c"));
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::ZERO);
        cache.execute("SELECT n").await.unwrap();
        cache.execute("SELECT n").await.unwrap();
        assert_eq!(calls(&cache), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = CachedBackend::new(CountingBackend::default(), Duration::from_secs(300));
        cache.execute("SELECT n").await.unwrap();
        cache.invalidate();
        cache.execute("SELECT n").await.unwrap();
        assert_eq!(calls(&cache), 2);
    }
}
