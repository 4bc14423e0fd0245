use std::sync::RwLock;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::client::RelevanceClient;
use super::prompts::ScoreRequest;
use super::schema::RelevanceError;
use crate::overlay::RelevanceOverlay;

/// The source behavior never resolved a hung request; an explicit timeout
/// bounds how long the busy flag can be held.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one refresh attempt, surfaced to the caller as a value. A
/// failure is a non-fatal notice; the prior overlay is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Overlay replaced wholesale with the new snapshot.
    Replaced { scored: usize },
    /// Another refresh is outstanding; this trigger was suppressed.
    AlreadyRunning,
    Failed { notice: String },
}

/// Owns the relevance overlay lifecycle for one view instance.
///
/// At most one request is in flight at a time: a second trigger while one is
/// outstanding is a no-op, not a queued or racing request. Because of that,
/// the overlay always reflects either "no data" or the most recently
/// completed request — an out-of-order overwrite is impossible by
/// construction.
#[derive(Debug)]
pub struct RelevanceSession {
    overlay: RwLock<Option<RelevanceOverlay>>,
    in_flight: Mutex<()>,
    timeout: Duration,
}

impl Default for RelevanceSession {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_TIMEOUT)
    }
}

impl RelevanceSession {
    pub fn new(timeout: Duration) -> Self {
        Self {
            overlay: RwLock::new(None),
            in_flight: Mutex::new(()),
            timeout,
        }
    }

    /// Snapshot of the current overlay, if any AI pass has completed.
    pub fn overlay(&self) -> Option<RelevanceOverlay> {
        self.overlay
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Discard the overlay (view unmount); it is never persisted.
    pub fn clear(&self) {
        *self
            .overlay
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Run one scoring round-trip. On success the overlay is replaced
    /// wholesale; on any failure (transport, timeout, shape validation,
    /// empty result) it is left exactly as it was.
    pub async fn refresh<C: RelevanceClient>(
        &self,
        client: &C,
        request: &ScoreRequest,
    ) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            return RefreshOutcome::AlreadyRunning;
        };

        let result = tokio::time::timeout(self.timeout, client.score(request)).await;

        let entries = match result {
            Err(_elapsed) => return self.fail(RelevanceError::Timeout(self.timeout)),
            Ok(Err(err)) => return self.fail(err),
            Ok(Ok(entries)) if entries.is_empty() => {
                return self.fail(RelevanceError::EmptyResponse)
            }
            Ok(Ok(entries)) => entries,
        };

        let overlay = RelevanceOverlay::from_entries(entries);
        let scored = overlay.len();
        *self
            .overlay
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(overlay);

        info!(scored, "relevance overlay replaced");
        RefreshOutcome::Replaced { scored }
    }

    fn fail(&self, err: RelevanceError) -> RefreshOutcome {
        warn!(error = %err, "relevance refresh failed; keeping prior overlay");
        RefreshOutcome::Failed {
            notice: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::Notify;
    use tokio::task::yield_now;

    use crate::overlay::RelevanceEntry;

    fn entry(id: &str, score: f64) -> RelevanceEntry {
        RelevanceEntry {
            candidate_id: id.into(),
            score,
            reason: "because".into(),
            suggested_topics: Vec::new(),
        }
    }

    fn request() -> ScoreRequest {
        ScoreRequest {
            instruction: "match".into(),
            subject: json!({}),
            candidates: vec![json!({"id": "j1"})],
            preferences: serde_json::Map::new(),
        }
    }

    struct StaticClient(Vec<RelevanceEntry>);

    impl RelevanceClient for StaticClient {
        async fn score(
            &self,
            _request: &ScoreRequest,
        ) -> Result<Vec<RelevanceEntry>, RelevanceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingClient;

    impl RelevanceClient for FailingClient {
        async fn score(
            &self,
            _request: &ScoreRequest,
        ) -> Result<Vec<RelevanceEntry>, RelevanceError> {
            Err(RelevanceError::Transport("connection refused".into()))
        }
    }

    struct BlockingClient {
        release: Arc<Notify>,
    }

    impl RelevanceClient for BlockingClient {
        async fn score(
            &self,
            _request: &ScoreRequest,
        ) -> Result<Vec<RelevanceEntry>, RelevanceError> {
            self.release.notified().await;
            Ok(vec![entry("j1", 55.0)])
        }
    }

    struct HangingClient;

    impl RelevanceClient for HangingClient {
        async fn score(
            &self,
            _request: &ScoreRequest,
        ) -> Result<Vec<RelevanceEntry>, RelevanceError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn success_replaces_the_overlay_wholesale() {
        let session = RelevanceSession::default();

        let first = session
            .refresh(&StaticClient(vec![entry("j1", 90.0), entry("j2", 40.0)]), &request())
            .await;
        assert_eq!(first, RefreshOutcome::Replaced { scored: 2 });

        let second = session
            .refresh(&StaticClient(vec![entry("j3", 10.0)]), &request())
            .await;
        assert_eq!(second, RefreshOutcome::Replaced { scored: 1 });

        let overlay = session.overlay().unwrap();
        assert!(overlay.get("j1").is_none());
        assert_eq!(overlay.score_for("j3"), 10.0);
    }

    #[tokio::test]
    async fn failure_preserves_the_prior_overlay_by_value() {
        let session = RelevanceSession::default();
        session
            .refresh(&StaticClient(vec![entry("j1", 90.0)]), &request())
            .await;
        let before = session.overlay();

        let outcome = session.refresh(&FailingClient, &request()).await;

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert_eq!(session.overlay(), before);
    }

    #[tokio::test]
    async fn empty_results_are_a_failed_refresh() {
        let session = RelevanceSession::default();
        session
            .refresh(&StaticClient(vec![entry("j1", 90.0)]), &request())
            .await;

        let outcome = session.refresh(&StaticClient(Vec::new()), &request()).await;

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert_eq!(session.overlay().unwrap().score_for("j1"), 90.0);
    }

    #[tokio::test]
    async fn concurrent_triggers_are_suppressed_not_queued() {
        let session = Arc::new(RelevanceSession::default());
        let release = Arc::new(Notify::new());

        let background = {
            let session = Arc::clone(&session);
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                session
                    .refresh(&BlockingClient { release }, &request())
                    .await
            })
        };
        yield_now().await;
        assert!(session.is_busy());

        let duplicate = session
            .refresh(&StaticClient(vec![entry("jX", 1.0)]), &request())
            .await;
        assert_eq!(duplicate, RefreshOutcome::AlreadyRunning);

        release.notify_one();
        let first = background.await.unwrap();
        assert_eq!(first, RefreshOutcome::Replaced { scored: 1 });

        // The suppressed duplicate left no trace; the completed request won.
        assert!(!session.is_busy());
        assert_eq!(session.overlay().unwrap().score_for("j1"), 55.0);
    }

    #[tokio::test(start_paused = true)]
    async fn a_hung_request_times_out_and_releases_the_busy_flag() {
        let session = RelevanceSession::new(Duration::from_secs(30));
        session
            .refresh(&StaticClient(vec![entry("j1", 90.0)]), &request())
            .await;

        let outcome = session.refresh(&HangingClient, &request()).await;

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert!(!session.is_busy());
        // Timeout is a failure like any other: prior overlay intact.
        assert_eq!(session.overlay().unwrap().score_for("j1"), 90.0);

        // The session is usable again after the timeout.
        let retry = session
            .refresh(&StaticClient(vec![entry("j2", 70.0)]), &request())
            .await;
        assert_eq!(retry, RefreshOutcome::Replaced { scored: 1 });
    }
}
