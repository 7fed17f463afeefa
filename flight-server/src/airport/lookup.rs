//! Airport lookup with caching, rate governing and local fallback.
//!
//! `AirportLookup::search` never fails. The order of resolution is:
//!
//! 1. queries shorter than the minimum length return nothing;
//! 2. a live cache entry for the normalized query is returned as-is;
//! 3. in local-only mode the local table answers;
//! 4. otherwise the remote provider is tried, gated by the governor, and
//!    any failure (rejection, 429, other status, bad payload) is answered
//!    from the local table.
//!
//! Whatever the answer, it is cached under the normalized query.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use super::client::AirportClient;
use super::data;
use super::error::AirportError;
use super::governor::{GovernorConfig, RateGovernor};
use super::normalize::normalize;
use super::record::AirportRecord;

/// Cached lookup answer.
type CacheEntry = Arc<Vec<AirportRecord>>;

/// Trait for remote airport search.
///
/// This abstraction allows the lookup to be tested without a network.
pub trait AirportProvider {
    /// Whether remote calls can be attempted at all (e.g. a key is set).
    fn is_available(&self) -> bool {
        true
    }

    /// Search the remote provider. Results are already filtered to airports.
    fn search_airports(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<AirportRecord>, AirportError>> + Send;
}

impl AirportProvider for AirportClient {
    fn is_available(&self) -> bool {
        self.has_key()
    }

    async fn search_airports(&self, query: &str) -> Result<Vec<AirportRecord>, AirportError> {
        self.search(query).await
    }
}

/// Configuration for airport lookups.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// How long a cached answer stays valid.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,

    /// Maximum number of airports in one answer.
    pub max_results: usize,

    /// Queries shorter than this (in characters) return nothing.
    pub min_query_len: usize,

    /// Never call the remote provider.
    pub local_only: bool,
}

impl LookupConfig {
    /// Set local-only mode.
    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    /// Set the cache TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_capacity: 1000,
            max_results: 8,
            min_query_len: 3,
            local_only: false,
        }
    }
}

/// Shared mutable state behind lookups: the answer cache and the governor.
///
/// Constructed explicitly and handed to `AirportLookup`, so separate
/// lookups (or tests) can share or isolate it as needed.
#[derive(Debug)]
pub struct LookupState {
    cache: MokaCache<String, CacheEntry>,
    governor: RateGovernor,
}

impl LookupState {
    /// Create state with the given cache settings and governor.
    pub fn new(config: &LookupConfig, governor: GovernorConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            cache,
            governor: RateGovernor::new(governor),
        }
    }

    /// The rate governor.
    pub fn governor(&self) -> &RateGovernor {
        &self.governor
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached answers.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

/// Airport search over the remote provider and the local table.
pub struct AirportLookup<P> {
    provider: P,
    state: Arc<LookupState>,
    config: LookupConfig,
    dataset: Arc<[AirportRecord]>,
}

impl<P: AirportProvider> AirportLookup<P> {
    /// Create a lookup over the built-in local table.
    pub fn new(provider: P, state: Arc<LookupState>, config: LookupConfig) -> Self {
        Self {
            provider,
            state,
            config,
            dataset: Arc::from(data::all()),
        }
    }

    /// Replace the local table (for testing or alternative data sets).
    pub fn with_dataset(mut self, dataset: Vec<AirportRecord>) -> Self {
        self.dataset = Arc::from(dataset);
        self
    }

    /// Search airports matching `query`.
    ///
    /// Returns at most `max_results` airports. Never fails: remote problems
    /// are logged and answered from the local table.
    pub async fn search(&self, query: &str) -> Vec<AirportRecord> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_len {
            return Vec::new();
        }

        let key = normalize(query);

        if let Some(cached) = self.state.cache.get(&key).await {
            debug!(key, "airport cache hit");
            return cached.as_ref().clone();
        }

        let results = if self.config.local_only {
            debug!(key, "local-only airport lookup");
            self.search_local(&key)
        } else {
            self.search_remote_or_local(query, &key).await
        };

        let entry = Arc::new(results);
        self.state.cache.insert(key, entry.clone()).await;
        entry.as_ref().clone()
    }

    /// Try the provider, falling back to the local table on any failure.
    async fn search_remote_or_local(&self, query: &str, key: &str) -> Vec<AirportRecord> {
        if !self.provider.is_available() {
            warn!(error = %AirportError::MissingApiKey, "using local airport data");
            return self.search_local(key);
        }

        let ticket = match self.state.governor.try_acquire() {
            Ok(ticket) => ticket,
            Err(rejection) => {
                warn!(%rejection, "airport call too frequent, using local airport data");
                return self.search_local(key);
            }
        };

        match self.provider.search_airports(query).await {
            Ok(mut records) => {
                records.truncate(self.config.max_results);
                info!(
                    count = records.len(),
                    calls = ticket.call_count,
                    soft_cap = ticket.soft_cap,
                    "remote airport search succeeded"
                );
                records
            }
            Err(AirportError::RateLimited) => {
                self.state.governor.penalize();
                warn!("airport provider returned 429, deferring next call and using local data");
                self.search_local(key)
            }
            Err(e) => {
                warn!(error = %e, "remote airport search failed, using local airport data");
                self.search_local(key)
            }
        }
    }

    fn search_local(&self, normalized_query: &str) -> Vec<AirportRecord> {
        search_local(&self.dataset, normalized_query, self.config.max_results)
    }

    /// Drop every cached answer.
    pub fn clear_cache(&self) {
        self.state.invalidate_all();
    }

    /// Shared lookup state.
    pub fn state(&self) -> &Arc<LookupState> {
        &self.state
    }

    /// Lookup configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }
}

/// Search a table for records matching an already-normalized query.
///
/// A record matches if any of its normalized code, city, name, country or
/// full name contains the whole query, or contains any single word of it.
/// Matches keep table order and are capped at `limit`.
pub fn search_local(
    records: &[AirportRecord],
    normalized_query: &str,
    limit: usize,
) -> Vec<AirportRecord> {
    if normalized_query.trim().is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = normalized_query.split_whitespace().collect();

    records
        .iter()
        .filter(|record| {
            let fields = [
                normalize(&record.code),
                normalize(&record.city),
                normalize(&record.name),
                normalize(&record.country),
                normalize(&record.full_name),
            ];

            fields.iter().any(|f| f.contains(normalized_query))
                || words
                    .iter()
                    .any(|word| fields.iter().any(|f| f.contains(word)))
        })
        .take(limit)
        .cloned()
        .collect()
}
