//! Profile cache service.
//!
//! [`ProfileCache`] owns the `"profiles"` cache entry: the last fetched
//! collection snapshot, its fetch status, and the subscriber set (a
//! [`tokio::sync::watch`] channel -- subscribers always observe the
//! latest published entry, never a partial mutation).
//!
//! Writes never go through the cache. A component that has completed a
//! create/update/delete against the backend calls
//! [`invalidate`](ProfileCache::invalidate), which wakes the refresh
//! task. Invalidations that arrive while a fetch is already in flight
//! coalesce into at most one follow-up fetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, Mutex, Notify};
use tokio_util::sync::CancellationToken;

use parokya_core::{Profile, ProfileStore};

/// The single key this service manages.
pub const PROFILES_KEY: &str = "profiles";

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

/// Fetch state of the cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch has been requested yet.
    NotLoaded,
    /// A fetch is in flight. Any previously fetched snapshot is still
    /// present -- this is the brief stale-read window, not an empty
    /// result and not an error.
    Loading,
    /// The snapshot reflects the last successful fetch.
    Ready,
    /// The last fetch failed; the previous snapshot is retained.
    Error,
}

/// The published state of the `"profiles"` entry.
///
/// Entries are replaced wholesale on every publication; the profile
/// vector is never patched in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub status: FetchStatus,
    /// Snapshot of the collection from the last successful fetch.
    pub profiles: Vec<Profile>,
    /// Message from the last failed fetch, if that was the most recent
    /// outcome.
    pub error: Option<String>,
    /// Completed-fetch counter. Each resolved fetch (success or
    /// failure) increments it, so callers can wait for a refresh that
    /// started after a known point.
    pub generation: u64,
    /// When the snapshot was last successfully refreshed.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self {
            status: FetchStatus::NotLoaded,
            profiles: Vec::new(),
            error: None,
            generation: 0,
            refreshed_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileCache
// ---------------------------------------------------------------------------

/// Explicit cache service for the profile collection.
///
/// Created once at application start via [`ProfileCache::start`]; the
/// returned `Arc` is cheap to clone into every component that reads
/// profiles. Torn down with [`shutdown`](Self::shutdown).
pub struct ProfileCache {
    entry_rx: watch::Receiver<CacheEntry>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl ProfileCache {
    /// Spawn the refresh task over the given store.
    ///
    /// No fetch is issued until the first
    /// [`ensure_loaded`](Self::ensure_loaded) or
    /// [`invalidate`](Self::invalidate).
    pub fn start(store: Arc<dyn ProfileStore>) -> Arc<Self> {
        let (entry_tx, entry_rx) = watch::channel(CacheEntry::default());
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(refresh_loop(
            store,
            entry_tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Arc::new(Self {
            entry_rx,
            refresh,
            cancel,
            task: Mutex::new(Some(task)),
        })
    }

    /// Current entry, without waiting.
    pub fn snapshot(&self) -> CacheEntry {
        self.entry_rx.borrow().clone()
    }

    /// Subscribe to entry publications. The receiver always yields the
    /// latest entry; intermediate states may be skipped under load
    /// (last writer wins).
    pub fn subscribe(&self) -> watch::Receiver<CacheEntry> {
        self.entry_rx.clone()
    }

    /// Trigger the first fetch if none has been requested yet.
    ///
    /// The read contract is eventually consistent: callers observe the
    /// result through [`subscribe`](Self::subscribe) or
    /// [`refreshed_after`](Self::refreshed_after) rather than blocking
    /// here.
    pub fn ensure_loaded(&self) {
        if self.snapshot().status == FetchStatus::NotLoaded {
            self.invalidate();
        }
    }

    /// Mark the entry stale and wake the refresh task.
    ///
    /// Must only be called after a write has been acknowledged by the
    /// backend -- never optimistically. Calls made while a fetch is in
    /// flight are satisfied by at most one follow-up fetch.
    pub fn invalidate(&self) {
        tracing::debug!(key = PROFILES_KEY, "Cache entry invalidated");
        self.refresh.notify_one();
    }

    /// Wait for a fetch that completed after the given generation.
    ///
    /// Returns the first entry whose generation exceeds `generation`
    /// (whether it resolved to `Ready` or `Error`), or `None` if the
    /// cache was shut down first.
    pub async fn refreshed_after(&self, generation: u64) -> Option<CacheEntry> {
        let mut rx = self.entry_rx.clone();
        let entry = rx.wait_for(|entry| entry.generation > generation).await;
        entry.ok().map(|entry| (*entry).clone())
    }

    /// Cancel the refresh task and wait for it to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        if let Some(task) = self.task.lock().await.take() {
            if let Err(error) = task.await {
                tracing::warn!(%error, "Cache refresh task panicked during shutdown");
            }
        }
        tracing::debug!(key = PROFILES_KEY, "Cache service stopped");
    }
}

// ---------------------------------------------------------------------------
// Refresh task
// ---------------------------------------------------------------------------

/// One fetch per wakeup. [`Notify`] stores at most a single pending
/// permit, which is what coalesces overlapping invalidations: however
/// many arrive while a fetch is running, the loop runs at most one more.
async fn refresh_loop(
    store: Arc<dyn ProfileStore>,
    entry_tx: watch::Sender<CacheEntry>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = refresh.notified() => {}
        }

        let previous = entry_tx.borrow().clone();
        entry_tx.send_replace(CacheEntry {
            status: FetchStatus::Loading,
            ..previous.clone()
        });

        match store.list().await {
            Ok(profiles) => {
                tracing::debug!(
                    key = PROFILES_KEY,
                    count = profiles.len(),
                    "Cache refreshed"
                );
                entry_tx.send_replace(CacheEntry {
                    status: FetchStatus::Ready,
                    profiles,
                    error: None,
                    generation: previous.generation + 1,
                    refreshed_at: Some(Utc::now()),
                });
            }
            Err(error) => {
                tracing::warn!(key = PROFILES_KEY, %error, "Cache refresh failed");
                entry_tx.send_replace(CacheEntry {
                    status: FetchStatus::Error,
                    error: Some(error.to_string()),
                    generation: previous.generation + 1,
                    ..previous
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
