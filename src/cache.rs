//! Single-slot story cache with a fixed freshness window.

use anyhow::Result;
use std::future::Future;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::models::StoryItem;

/// How long a computed front page is served before it is rebuilt.
pub const CACHE_EXPIRATION: Duration = Duration::from_secs(10);

#[derive(Default)]
struct CacheEntry {
    stories: Vec<StoryItem>,
    // None until the first `set`
    expires_at: Option<Instant>,
}

/// Holds the last ranked story list, shared by every request.
///
/// Reads and writes go through one read-write lock and never wait on I/O.
/// Rebuilding is coordinated separately by [`StoriesCache::get_or_refresh`].
pub struct StoriesCache {
    entry: RwLock<CacheEntry>,
    expiration: Duration,
    refresh_lock: Mutex<()>,
}

impl StoriesCache {
    pub fn new(expiration: Duration) -> Self {
        Self {
            entry: RwLock::new(CacheEntry::default()),
            expiration,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// True once the expiry instant is reached, and before anything was ever set.
    pub fn is_expired(&self) -> bool {
        match self.read().expires_at {
            Some(expires_at) => Instant::now() >= expires_at,
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.read().stories.is_empty()
    }

    /// Replaces the cached stories and restarts the freshness window.
    pub fn set(&self, stories: Vec<StoryItem>) {
        let mut entry = self.write();
        entry.expires_at = Some(Instant::now() + self.expiration);
        entry.stories = stories;
    }

    /// Copy of the cached stories.
    pub fn get(&self) -> Vec<StoryItem> {
        self.read().stories.clone()
    }

    fn needs_refresh(&self) -> bool {
        self.is_expired() || self.is_empty()
    }

    /// Returns the cached stories, rebuilding them with `refresh` first when
    /// the cache is expired or empty.
    ///
    /// Concurrent callers that find the cache stale queue on the refresh lock;
    /// only the first one runs `refresh`, the rest read what it stored. If
    /// `refresh` fails the previous entry is kept and the next waiter tries again.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Vec<StoryItem>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<StoryItem>>>,
    {
        if !self.needs_refresh() {
            return Ok(self.get());
        }

        let _refreshing = self.refresh_lock.lock().await;
        if self.needs_refresh() {
            let stories = refresh().await?;
            self.set(stories);
        }

        Ok(self.get())
    }

    // A panic while holding the lock cannot leave the entry half-written, so poisoning is ignored
    fn read(&self) -> RwLockReadGuard<'_, CacheEntry> {
        self.entry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheEntry> {
        self.entry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StoriesCache {
    fn default() -> Self {
        Self::new(CACHE_EXPIRATION)
    }
}
