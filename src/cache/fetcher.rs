use crate::cache::clock::{Clock, SystemClock};
use crate::cache::error::{CacheError, Result};
use crate::cache::store::{ArtifactStore, FileArtifactStore};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of the freshness check made before each resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Nothing stored yet
    Missing,
    /// Creation or modification time fell outside the window
    Stale,
    /// Both timestamps are inside the window
    Fresh,
}

impl CacheDecision {
    pub fn is_hit(self) -> bool {
        matches!(self, CacheDecision::Fresh)
    }
}

/// Time-windowed memoization of a single fetched artifact.
///
/// Each `resolve` either serves the stored artifact or calls the wrapped fetch,
/// stores its result verbatim and serves that. The slot is not locked, so two
/// processes refreshing the same slot at once can observe a half-written file.
pub struct MemoizingFetcher<S = FileArtifactStore, C = SystemClock> {
    store: S,
    clock: C,
    window: Duration,
}

impl MemoizingFetcher {
    /// File-backed fetcher using the system clock
    pub fn new(path: impl Into<PathBuf>, window: Duration) -> Self {
        Self::with_parts(FileArtifactStore::new(path), SystemClock, window)
    }
}

impl<S: ArtifactStore, C: Clock> MemoizingFetcher<S, C> {
    pub fn with_parts(store: S, clock: C, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Oldest timestamp an artifact may carry and still be served
    pub fn cutoff(&self) -> DateTime<Utc> {
        let window = chrono::Duration::from_std(self.window).unwrap_or(chrono::Duration::MAX);
        self.clock
            .now()
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub async fn decide(&self) -> Result<CacheDecision> {
        let Some(stamps) = self.store.timestamps().await? else {
            debug!("No cached artifact at {}", self.store.location());
            return Ok(CacheDecision::Missing);
        };

        let cutoff = self.cutoff();
        // Either timestamp alone is enough to force a refresh.
        if stamps.created < cutoff || stamps.modified < cutoff {
            debug!(
                "Cached artifact at {} is stale (created {}, modified {}, cutoff {})",
                self.store.location(),
                stamps.created,
                stamps.modified,
                cutoff
            );
            Ok(CacheDecision::Stale)
        } else {
            debug!("Cached artifact at {} is fresh", self.store.location());
            Ok(CacheDecision::Fresh)
        }
    }

    /// Serve the stored artifact, or fetch and store a new one when it is missing or stale.
    ///
    /// Errors from `fetch` are returned as-is and leave the slot untouched.
    pub async fn resolve<F, Fut, E>(&self, fetch: F) -> std::result::Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<String, E>>,
        E: From<CacheError>,
    {
        let (artifact, _) = self.resolve_with_decision(fetch).await?;
        Ok(artifact)
    }

    pub async fn resolve_with_decision<F, Fut, E>(
        &self,
        fetch: F,
    ) -> std::result::Result<(String, CacheDecision), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<String, E>>,
        E: From<CacheError>,
    {
        let decision = self.decide().await?;
        if decision.is_hit() {
            return Ok((self.store.read().await?, decision));
        }

        info!(
            "Refreshing cached artifact at {} ({:?})",
            self.store.location(),
            decision
        );
        let artifact = fetch().await?;
        self.store.write(&artifact).await?;
        info!(
            "Stored {} bytes at {}",
            artifact.len(),
            self.store.location()
        );

        Ok((self.store.read().await?, decision))
    }

    /// Drop the stored artifact so the next resolve fetches
    pub async fn invalidate(&self) -> Result<()> {
        info!("Invalidating cached artifact at {}", self.store.location());
        self.store.remove().await
    }
}
