//! Structured span definitions for tracing.

use std::time::Instant;

use tracing::{Level, Span, field, span};

use crate::client::{ClientError, QueryResponse};

/// Span covering one form submission, from `begin` to settlement.
pub struct SubmitSpan {
    span: Span,
    start: Instant,
}

impl SubmitSpan {
    pub fn new(request_id: u64, backend: &str, query_len: usize) -> Self {
        let span = span!(
            Level::INFO,
            "query.submit",
            request_id = request_id,
            backend = backend,
            query_len = query_len,
            outcome = field::Empty,
            status = field::Empty,
            latency_ms = field::Empty,
            discarded = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    fn record_latency(&self) -> u64 {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.span.record("latency_ms", latency_ms);
        latency_ms
    }

    pub fn record_outcome(&self, outcome: &Result<QueryResponse, ClientError>) {
        let latency_ms = self.record_latency();

        match outcome {
            Ok(response) => {
                self.span.record("outcome", "success");
                if response.answer.is_none() {
                    tracing::debug!(parent: &self.span, "Response carried no answer field");
                }
            }
            Err(err) => {
                self.span.record("outcome", "error");
                if let Some(status) = err.status_code() {
                    self.span.record("status", status);
                }
                tracing::warn!(parent: &self.span, error = %err, latency_ms, "Query failed");
            }
        }
    }

    /// The submission was dropped before the call settled.
    pub fn record_abandoned(&self) {
        let latency_ms = self.record_latency();
        self.span.record("outcome", "abandoned");
        tracing::debug!(parent: &self.span, latency_ms, "Submission dropped before settling");
    }

    pub fn record_discarded(&self) {
        self.span.record("discarded", true);
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Collects every span field value as text.
    #[derive(Clone, Default)]
    struct FieldCapture(Arc<Mutex<HashMap<String, String>>>);

    impl FieldCapture {
        fn fields(&self) -> HashMap<String, String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S: Subscriber> Layer<S> for FieldCapture {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            attrs.record(&mut FieldVisitor(&mut self.0.lock().unwrap()));
        }

        fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            values.record(&mut FieldVisitor(&mut self.0.lock().unwrap()));
        }
    }

    fn capture(f: impl FnOnce()) -> HashMap<String, String> {
        let capture = FieldCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, f);
        capture.fields()
    }

    #[test]
    fn test_error_outcome_fields() {
        let fields = capture(|| {
            let span = SubmitSpan::new(7, "http", 15);
            span.record_outcome(&Err(ClientError::Status { status: 500 }));
            span.record_discarded();
        });

        assert_eq!(fields["request_id"], "7");
        assert_eq!(fields["backend"], "http");
        assert_eq!(fields["query_len"], "15");
        assert_eq!(fields["outcome"], "error");
        assert_eq!(fields["status"], "500");
        assert_eq!(fields["discarded"], "true");
        assert!(fields.contains_key("latency_ms"));
    }

    #[test]
    fn test_success_outcome_fields() {
        let fields = capture(|| {
            SubmitSpan::new(1, "http", 2).record_outcome(&Ok(QueryResponse::new("42")));
        });

        assert_eq!(fields["outcome"], "success");
        assert!(!fields.contains_key("status"));
        assert!(!fields.contains_key("discarded"));
    }

    #[test]
    fn test_abandoned_outcome_fields() {
        let fields = capture(|| SubmitSpan::new(3, "http", 0).record_abandoned());

        assert_eq!(fields["outcome"], "abandoned");
        assert!(fields.contains_key("latency_ms"));
    }
}
