//! Shared access-token cache with expiry tracking.
//!
//! The cache owns the check-then-fetch protocol: a lookup that finds a live
//! token returns it without network access, anything else asks the provider
//! for a new one while the lock is held, so concurrent callers never start a
//! second fetch for the same resource.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};
use windams_domain::{AccessToken, CredentialResult};

use crate::ports::{Clock, TokenProvider};

type Slot = Arc<AsyncMutex<Option<AccessToken>>>;

/// How widely the cache lock is held during a lookup-or-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockGranularity {
    /// One lock for the whole cache. At most one fetch is in flight
    /// process-wide, and a slow provider stalls every caller.
    #[default]
    Global,
    /// One lock per resource, created on first use. Fetches for different
    /// resources run concurrently; at most one per resource.
    PerResource,
}

/// Process-wide token cache keyed by resource.
///
/// Construct once at startup and share it through an `Arc`. Entries are
/// only ever replaced, never evicted; keys are bare resource strings, so two
/// environments requesting the same resource share one entry.
pub struct TokenCache {
    clock: Arc<dyn Clock>,
    granularity: LockGranularity,
    global: AsyncMutex<()>,
    slots: parking_lot::Mutex<HashMap<String, Slot>>,
}

impl TokenCache {
    /// Create an empty cache with a single global lock.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_granularity(clock, LockGranularity::Global)
    }

    /// Create an empty cache with the given lock granularity.
    #[must_use]
    pub fn with_granularity(clock: Arc<dyn Clock>, granularity: LockGranularity) -> Self {
        Self {
            clock,
            granularity,
            global: AsyncMutex::new(()),
            slots: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// The configured lock granularity.
    #[must_use]
    pub const fn granularity(&self) -> LockGranularity {
        self.granularity
    }

    /// Return a live token for `resource`, fetching one from `provider` if
    /// the cached entry is missing or expired.
    ///
    /// A failed fetch leaves the existing entry untouched.
    ///
    /// # Errors
    ///
    /// Propagates whatever `provider.query_access_token` returns.
    pub async fn obtain_access_token(
        &self,
        provider: &dyn TokenProvider,
        resource: &str,
    ) -> CredentialResult<String> {
        let _global = match self.granularity {
            LockGranularity::Global => Some(self.global.lock().await),
            LockGranularity::PerResource => None,
        };

        let slot = self.slot(resource);
        let mut entry = slot.lock().await;

        if let Some(token) = entry.as_ref()
            && !token.is_expired_at(self.clock.now())
        {
            debug!(resource, "access token served from cache");
            return Ok(token.token.clone());
        }

        let fresh = provider.query_access_token(resource).await?;
        info!(
            resource,
            provider = %provider.kind(),
            expires_at = %fresh.expires_at,
            "obtained new access token"
        );

        let token = fresh.token.clone();
        *entry = Some(fresh);
        Ok(token)
    }

    /// The stored token for `resource`, expired or not.
    ///
    /// Waits for an in-flight fetch of the same resource to finish.
    pub async fn cached(&self, resource: &str) -> Option<AccessToken> {
        let slot = self.slots.lock().get(resource).cloned()?;
        let entry = slot.lock().await;
        entry.clone()
    }

    /// Number of resources holding a token.
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    /// Returns true if no token is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn slot(&self, resource: &str) -> Slot {
        let mut slots = self.slots.lock();
        Arc::clone(
            slots
                .entry(resource.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(None))),
        )
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("granularity", &self.granularity)
            .field("resources", &self.slots.lock().len())
            .finish_non_exhaustive()
    }
}
