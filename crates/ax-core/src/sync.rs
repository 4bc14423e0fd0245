use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::candidate::Candidate;
use crate::store::{CandidateStore, StoreError};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("persistence api unreachable: {0}")]
    Transport(String),
    #[error("persistence api rejected the request: status {0}")]
    Rejected(u16),
    #[error("persistence api returned an invalid payload: {0}")]
    InvalidPayload(String),
}

/// Whether the backing store has seen the session's latest write.
///
/// Surfaced as a first-class value for the UI to render ("local-first,
/// best-effort sync"), never inferred from caught exceptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No sync attempted yet this session.
    Local,
    Synced,
    Failed { reason: String },
}

/// The §6 persistence collaborator, consumed as a boundary.
pub trait PersistenceGateway<C> {
    fn fetch_all(&self) -> impl std::future::Future<Output = Result<Vec<C>, SyncError>> + Send;

    fn create(
        &self,
        candidate: &C,
    ) -> impl std::future::Future<Output = Result<(), SyncError>> + Send;

    fn update(
        &self,
        candidate: &C,
    ) -> impl std::future::Future<Output = Result<(), SyncError>> + Send;
}

/// reqwest implementation of the persistence contract.
#[derive(Debug, Clone)]
pub struct HttpPersistenceGateway {
    http: reqwest::Client,
    base_url: String,
}

const PERSISTENCE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

impl HttpPersistenceGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(PERSISTENCE_TIMEOUT)
            .build()
            .map_err(|err| SyncError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn candidates_url(&self) -> String {
        format!("{}/candidates", self.base_url)
    }

    fn candidate_url(&self, id: &str) -> String {
        format!("{}/candidates/{id}", self.base_url)
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<(), SyncError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SyncError::Rejected(status.as_u16()))
    }
}

impl<C> PersistenceGateway<C> for HttpPersistenceGateway
where
    C: Candidate + Serialize + DeserializeOwned + Send + Sync,
{
    async fn fetch_all(&self) -> Result<Vec<C>, SyncError> {
        let response = self
            .http
            .get(self.candidates_url())
            .send()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;
        check_status(response.status())?;

        response
            .json()
            .await
            .map_err(|err| SyncError::InvalidPayload(err.to_string()))
    }

    async fn create(&self, candidate: &C) -> Result<(), SyncError> {
        let response = self
            .http
            .post(self.candidates_url())
            .json(candidate)
            .send()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;
        check_status(response.status())
    }

    async fn update(&self, candidate: &C) -> Result<(), SyncError> {
        let response = self
            .http
            .put(self.candidate_url(candidate.id()))
            .json(candidate)
            .send()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;
        check_status(response.status())
    }
}

/// Candidate store with best-effort sync to the persistence API.
///
/// Every write lands in the in-memory store first, regardless of network
/// outcome: no write is ever lost locally because of a network failure.
/// Durability to the backing store is not guaranteed; the outcome of the
/// last sync attempt is observable via [`LocalFirstStore::status`].
#[derive(Debug)]
pub struct LocalFirstStore<C: Candidate> {
    store: CandidateStore<C>,
    status: SyncStatus,
}

impl<C: Candidate> LocalFirstStore<C> {
    pub fn new(store: CandidateStore<C>) -> Self {
        Self {
            store,
            status: SyncStatus::Local,
        }
    }

    pub fn store(&self) -> &CandidateStore<C> {
        &self.store
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// Seed the session from the backing store. On failure the local set is
    /// left untouched (offline mode: filtering local data keeps working).
    pub async fn load<G: PersistenceGateway<C>>(
        &mut self,
        gateway: &G,
    ) -> Result<usize, SyncError> {
        match gateway.fetch_all().await {
            Ok(candidates) => {
                let fetched = candidates.len();
                self.store
                    .replace_all(candidates)
                    .map_err(|err| SyncError::InvalidPayload(err.to_string()))?;
                self.status = SyncStatus::Synced;
                Ok(fetched)
            }
            Err(err) => {
                warn!(error = %err, "candidate fetch failed; staying on local data");
                self.status = SyncStatus::Failed {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Create action: prepends locally with a fresh id, then syncs
    /// best-effort. Returns the minted id.
    pub async fn create<G: PersistenceGateway<C>>(
        &mut self,
        gateway: &G,
        make: impl FnOnce(String) -> C,
    ) -> String {
        let candidate = self.store.add(make).clone();

        self.status = match gateway.create(&candidate).await {
            Ok(()) => SyncStatus::Synced,
            Err(err) => {
                warn!(error = %err, id = %candidate.id(), "create not synced; kept locally");
                SyncStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        candidate.id().to_string()
    }

    /// Update action: replaces the candidate locally (rejected synchronously
    /// for unknown ids, before any network traffic), then syncs best-effort.
    pub async fn update<G: PersistenceGateway<C>>(
        &mut self,
        gateway: &G,
        candidate: C,
    ) -> Result<(), StoreError> {
        self.store.replace(candidate.clone())?;

        self.status = match gateway.update(&candidate).await {
            Ok(()) => SyncStatus::Synced,
            Err(err) => {
                warn!(error = %err, id = %candidate.id(), "update not synced; applied locally");
                SyncStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        Ok(())
    }
}
