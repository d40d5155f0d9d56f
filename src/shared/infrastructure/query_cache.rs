// Memoizes fetched query results by query key.
//
// Responsibilities
// - Serve data younger than the staleness threshold without fetching.
// - Coalesce concurrent fetches of the same key behind a per-key gate.
// - Tag every fetch with a sequence number and only apply the result when it is still the
//   latest one issued for its key. Invalidation issues a new number, so fetches that were in
//   flight during a write never overwrite the invalidated entry.
// - Never keep data from a failed fetch; the next request fetches again.
// - Drop entries once they are stale and gates once nobody waits on them, so keys that are not
//   queried again (one per user id) do not accumulate.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

struct CacheEntry<V> {
    data: Option<Arc<V>>,
    fetched_at: Option<Instant>,
    started_at: Option<Instant>,
    status: QueryStatus,
    latest_sequence: u64,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, stale_after: Duration) -> bool {
        match (&self.data, self.fetched_at) {
            (Some(_), Some(fetched_at)) => fetched_at.elapsed() < stale_after,
            _ => false,
        }
    }

    /// Loading entries older than the threshold belong to abandoned fetches.
    fn worth_keeping(&self, stale_after: Duration) -> bool {
        let in_flight = self.status == QueryStatus::Loading
            && self
                .started_at
                .is_some_and(|started_at| started_at.elapsed() < stale_after);
        in_flight || self.is_fresh(stale_after)
    }
}

impl<V> Default for CacheEntry<V> {
    fn default() -> Self {
        Self {
            data: None,
            fetched_at: None,
            started_at: None,
            status: QueryStatus::Idle,
            latest_sequence: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub key: K,
    pub sequence: u64,
}

pub struct QueryCache<K, V> {
    stale_after: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    gates: Mutex<HashMap<K, Arc<Mutex<()>>>>,
    sequence: AtomicU64,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send,
    V: Send + Sync,
{
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    pub async fn fresh(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        if entry.is_fresh(self.stale_after) {
            entry.data.clone()
        } else {
            None
        }
    }

    pub async fn status(&self, key: &K) -> QueryStatus {
        self.entries
            .lock()
            .await
            .get(key)
            .map(|entry| entry.status)
            .unwrap_or(QueryStatus::Idle)
    }

    pub async fn begin(&self, key: K) -> FetchTicket<K> {
        let sequence = self.next_sequence();
        let mut entries = self.entries.lock().await;
        let stale_after = self.stale_after;
        entries.retain(|_, entry| entry.worth_keeping(stale_after));
        let entry = entries.entry(key.clone()).or_default();
        entry.latest_sequence = sequence;
        entry.started_at = Some(Instant::now());
        entry.status = QueryStatus::Loading;
        FetchTicket { key, sequence }
    }

    /// Applies fetched data. Returns false when a newer fetch or an invalidation superseded the ticket.
    pub async fn store(&self, ticket: &FetchTicket<K>, data: Arc<V>) -> bool {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.latest_sequence != ticket.sequence {
            debug!(key = ?ticket.key, sequence = ticket.sequence, latest = entry.latest_sequence, "discarding superseded fetch");
            return false;
        }
        entry.data = Some(data);
        entry.fetched_at = Some(Instant::now());
        entry.status = QueryStatus::Ready;
        true
    }

    pub async fn fail(&self, ticket: &FetchTicket<K>) -> bool {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.latest_sequence != ticket.sequence {
            return false;
        }
        entry.data = None;
        entry.fetched_at = None;
        entry.status = QueryStatus::Failed;
        true
    }

    pub async fn invalidate(&self, key: &K) {
        let sequence = self.next_sequence();
        if let Some(entry) = self.entries.lock().await.get_mut(key) {
            Self::reset(entry, sequence);
        }
    }

    pub async fn invalidate_all(&self) {
        let sequence = self.next_sequence();
        for entry in self.entries.lock().await.values_mut() {
            Self::reset(entry, sequence);
        }
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(data) = self.fresh(&key).await {
            debug!(?key, "query cache hit");
            return Ok(data);
        }

        let gate = self.gate(&key).await;
        let result = {
            let _guard = gate.lock().await;
            self.fetch_locked(key.clone(), fetch).await
        };
        self.release_gate(&key, gate).await;
        result
    }

    async fn fetch_locked<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(data) = self.fresh(&key).await {
            debug!(?key, "query served by a coalesced fetch");
            return Ok(data);
        }

        debug!(?key, "query cache miss");
        let ticket = self.begin(key).await;
        match fetch().await {
            Ok(value) => {
                let data = Arc::new(value);
                self.store(&ticket, data.clone()).await;
                Ok(data)
            }
            Err(error) => {
                self.fail(&ticket).await;
                Err(error)
            }
        }
    }

    async fn gate(&self, key: &K) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        gates.retain(|_, gate| Arc::strong_count(gate) > 1);
        gates
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Removes the gate of `key` when `held` and the map hold the only references.
    async fn release_gate(&self, key: &K, held: Arc<Mutex<()>>) {
        let mut gates = self.gates.lock().await;
        let only_holder = gates.get(key).is_some_and(|gate| Arc::ptr_eq(gate, &held))
            && Arc::strong_count(&held) == 2;
        if only_holder {
            gates.remove(key);
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    #[cfg(test)]
    async fn gate_count(&self) -> usize {
        self.gates.lock().await.len()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn reset(entry: &mut CacheEntry<V>, sequence: u64) {
        entry.data = None;
        entry.fetched_at = None;
        entry.status = QueryStatus::Idle;
        entry.latest_sequence = sequence;
    }
}
