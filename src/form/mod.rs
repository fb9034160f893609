//! The query form: state, submission lifecycle, and rendering.
//!
//! ```rust,no_run
//! use ai_query::{QueryClient, QueryForm};
//!
//! # async fn example() -> Result<(), ai_query::Error> {
//! let form = QueryForm::new(QueryClient::builder().build()?);
//! form.set_query("meaning of life");
//! form.submit().await;
//! println!("{}", form.view());
//! # Ok(())
//! # }
//! ```

pub mod state;
pub mod view;

pub use state::{FormState, RenderState};
pub use view::{FormView, render};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::Instrument;

use crate::client::QueryBackend;
use crate::observability::SubmitSpan;

/// Owns the form state and drives one request per submission.
///
/// Cloning is cheap and clones share state, so a submission can be spawned
/// while the UI keeps reading. Observers get every change through
/// [`QueryForm::subscribe`].
#[derive(Clone)]
pub struct QueryForm {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn QueryBackend>,
    state: watch::Sender<FormState>,
    latest_request: AtomicU64,
}

impl QueryForm {
    /// Create a form with an empty query
    pub fn new(backend: impl QueryBackend + 'static) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    /// Create a form sharing an existing backend
    pub fn with_backend(backend: Arc<dyn QueryBackend>) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            inner: Arc::new(Inner {
                backend,
                state,
                latest_request: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FormState {
        self.inner.state.borrow().clone()
    }

    /// Render the current state
    pub fn view(&self) -> FormView {
        render(&self.inner.state.borrow())
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn backend(&self) -> &dyn QueryBackend {
        self.inner.backend.as_ref()
    }

    /// Replace the query text.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.inner.state.send_if_modified(|state| {
            if state.query == query {
                return false;
            }
            state.query = query;
            true
        });
    }

    /// Start a submission of the current query.
    ///
    /// Loading is entered before this returns, so a second caller checking
    /// [`QueryForm::is_loading`] right after sees it. The returned
    /// [`Submission`] performs the call when run.
    pub fn start(&self) -> Submission {
        let request_id = self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let mut query = String::new();
        self.inner.state.send_modify(|state| {
            state.begin();
            query.clone_from(&state.query);
        });

        let span = SubmitSpan::new(request_id, self.inner.backend.name(), query.len());
        Submission {
            form: self.clone(),
            request_id,
            query,
            span,
            settled: false,
        }
    }

    /// Submit the current query and wait for it to settle.
    ///
    /// Nothing blocks an empty query or an overlapping call; the UI disables
    /// its submit control while loading. If a newer submission started while
    /// this one was pending, this settlement is dropped and leaves the newer
    /// call's state alone.
    pub async fn submit(&self) -> RenderState {
        self.start().run().await
    }

    /// Set the query, then submit it.
    pub async fn submit_query(&self, query: impl Into<String>) -> RenderState {
        self.set_query(query);
        self.submit().await
    }
}

/// One in-flight submission, created by [`QueryForm::start`].
///
/// Dropping it before it settles (a timeout, a losing `select!` branch)
/// clears `loading` if it is still the latest submission.
#[must_use = "a submission does nothing until it is run"]
pub struct Submission {
    form: QueryForm,
    request_id: u64,
    query: String,
    span: SubmitSpan,
    settled: bool,
}

impl Submission {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Send the query and apply its outcome.
    pub async fn run(mut self) -> RenderState {
        let inner = &self.form.inner;
        let outcome = inner
            .backend
            .ask(&self.query)
            .instrument(self.span.span().clone())
            .await;
        self.span.record_outcome(&outcome);
        self.settled = true;

        let request_id = self.request_id;
        let inner = &self.form.inner;
        let applied = inner.state.send_if_modified(|state| {
            if inner.latest_request.load(Ordering::SeqCst) != request_id {
                return false;
            }
            state.settle(outcome);
            true
        });
        if !applied {
            self.span.record_discarded();
            tracing::debug!(request_id, "Discarded stale settlement");
        }

        inner.state.borrow().render_state()
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.span.record_abandoned();

        let request_id = self.request_id;
        let inner = &self.form.inner;
        inner.state.send_if_modified(|state| {
            if inner.latest_request.load(Ordering::SeqCst) != request_id || !state.loading {
                return false;
            }
            state.abandon();
            true
        });
    }
}

impl std::fmt::Debug for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission")
            .field("request_id", &self.request_id)
            .field("settled", &self.settled)
            .finish()
    }
}

impl std::fmt::Debug for QueryForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryForm")
            .field("backend", &self.inner.backend.name())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, QueryResponse};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl QueryBackend for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn ask(&self, query: &str) -> Result<QueryResponse, ClientError> {
            if query == "fail" {
                Err(ClientError::transport("network down"))
            } else {
                Ok(QueryResponse::new(format!("echo: {}", query)))
            }
        }
    }

    #[tokio::test]
    async fn test_submit_success() {
        let form = QueryForm::new(Echo);
        let state = form.submit_query("hello").await;

        assert_eq!(state, RenderState::Success);
        let view = form.view();
        assert_eq!(view.response_panel.as_deref(), Some("echo: hello"));
        assert!(!view.button_disabled);
        assert_eq!(form.state().query, "hello");
    }

    #[tokio::test]
    async fn test_submit_failure_then_success() {
        let form = QueryForm::new(Echo);
        assert_eq!(form.submit_query("fail").await, RenderState::Error);
        assert_eq!(form.view().error_line.as_deref(), Some("Error: network down"));

        assert_eq!(form.submit_query("again").await, RenderState::Success);
        assert!(form.state().error.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let form = QueryForm::new(Echo);
        let mut rx = form.subscribe();

        form.set_query("abc");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().query, "abc");

        form.set_query("abc");
        assert!(!rx.has_changed().unwrap());

        form.submit().await;
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().loading);
    }

    #[derive(Debug)]
    struct Stalled;

    #[async_trait]
    impl QueryBackend for Stalled {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn ask(&self, _query: &str) -> Result<QueryResponse, ClientError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_start_enters_loading_immediately() {
        let form = QueryForm::new(Stalled);
        let submission = form.start();
        assert!(form.is_loading());
        assert!(form.view().button_disabled);
        assert_eq!(submission.request_id(), 1);
    }

    #[tokio::test]
    async fn test_dropped_submission_clears_loading() {
        let form = QueryForm::new(Stalled);
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            form.submit_query("q"),
        )
        .await;

        assert!(timed_out.is_err());
        let view = form.view();
        assert!(!form.is_loading());
        assert!(!view.button_disabled);
        assert_eq!(view.button_label, "Ask AI");
        assert_eq!(view.response_panel, None);
        assert_eq!(view.error_line, None);
    }

    #[tokio::test]
    async fn test_dropped_stale_submission_keeps_newer_loading() {
        let form = QueryForm::new(Stalled);
        let older = form.start();
        let _newer = form.start();

        drop(older);
        assert!(form.is_loading());
    }
}
