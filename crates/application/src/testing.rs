//! Test doubles for the credential ports.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use windams_domain::{
    AccessToken, CredentialError, CredentialResult, ProviderConfig, ProviderKind,
};

use crate::ports::{Clock, TokenProvider};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Provider that mints numbered tokens and records how it was called.
pub struct CountingProvider {
    config: ProviderConfig,
    clock: Arc<ManualClock>,
    lifetime: Duration,
    latency: Option<std::time::Duration>,
    token_value: Option<String>,
    well_known: Option<Vec<u8>>,
    failure: Mutex<Option<CredentialError>>,
    fetches: AtomicUsize,
    key_fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CountingProvider {
    pub fn new(clock: Arc<ManualClock>, lifetime: Duration) -> Self {
        Self {
            config: ProviderConfig::new(
                ProviderKind::AzureAd,
                "client",
                "tenant",
                Some("secret".to_string()),
            ),
            clock,
            lifetime,
            latency: None,
            token_value: None,
            well_known: None,
            failure: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            key_fetches: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_token_value(mut self, value: &str) -> Self {
        self.token_value = Some(value.to_string());
        self
    }

    pub fn with_well_known(mut self, document: &[u8]) -> Self {
        self.well_known = Some(document.to_vec());
        self
    }

    pub fn fail_with(&self, error: CredentialError) {
        *self.failure.lock() = Some(error);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn key_fetches(&self) -> usize {
        self.key_fetches.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for CountingProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn query_access_token(&self, resource: &str) -> CredentialResult<AccessToken> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failure = self.failure.lock().clone();
        if let Some(error) = failure {
            return Err(error);
        }

        let value = self
            .token_value
            .clone()
            .unwrap_or_else(|| format!("token-{n}"));
        Ok(AccessToken::new(
            value,
            "Bearer",
            self.clock.now() + self.lifetime,
            resource,
        ))
    }

    async fn fetch_well_known(&self) -> CredentialResult<Vec<u8>> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        self.well_known.clone().ok_or_else(|| CredentialError::Auth {
            code: "signing_keys_unavailable".to_string(),
            description: "status 503".to_string(),
            status: Some(503),
        })
    }
}
