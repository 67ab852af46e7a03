use crate::adapters::http::HttpTransport;
use crate::config::toml_config::SubmitterConfig;
use crate::core::rate_gate::RateGate;
use crate::domain::model::{Document, SubmissionRequest};
use crate::domain::ports::DocumentTransport;
use crate::utils::error::{CrptError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::future::Future;
use std::sync::Arc;

/// Submits signed documents through a shared [`RateGate`].
///
/// Safe to share across tasks behind an `Arc`; the gate is the only mutable state.
pub struct DocumentSubmitter<T: DocumentTransport> {
    gate: Arc<RateGate>,
    transport: T,
}

impl DocumentSubmitter<HttpTransport> {
    pub fn from_config(config: &SubmitterConfig) -> Result<Self> {
        let gate = RateGate::per(config.rate_limit.time_unit, config.rate_limit.request_limit)?;
        let transport = HttpTransport::new(config.endpoint(), config.timeout())?;
        Ok(Self::new(Arc::new(gate), transport))
    }
}

impl<T: DocumentTransport> DocumentSubmitter<T> {
    pub fn new(gate: Arc<RateGate>, transport: T) -> Self {
        Self { gate, transport }
    }

    pub fn gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    /// Waits for rate gate admission, then sends the document once.
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<()> {
        validate_non_empty_string("signature", signature)?;

        self.gate.acquire().await;
        self.send(document, signature).await
    }

    /// Same as [`submit`](Self::submit), but a wait for admission ends with
    /// `Interrupted` when `cancel` resolves first. Once admitted, the call
    /// is sent regardless of `cancel`.
    pub async fn submit_or_cancel<F>(
        &self,
        document: &Document,
        signature: &str,
        cancel: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        validate_non_empty_string("signature", signature)?;

        self.gate.acquire_or_cancel(cancel).await?;
        self.send(document, signature).await
    }

    async fn send(&self, document: &Document, signature: &str) -> Result<()> {
        let body = SubmissionRequest::new(document, signature).to_json_bytes()?;

        tracing::debug!(
            "Submitting document {} ({} bytes)",
            document.doc_id.as_deref().unwrap_or("<no id>"),
            body.len()
        );
        let response = self.transport.post_json(body).await?;
        tracing::debug!("Registration endpoint responded with status {}", response.status);

        if response.status >= 400 {
            return Err(CrptError::RemoteRejection {
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    struct MockTransport {
        status: u16,
        body: String,
        sent: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    impl MockTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn sent(&self) -> Vec<serde_json::Value> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentTransport for MockTransport {
        async fn post_json(&self, body: Vec<u8>) -> Result<TransportResponse> {
            let value = serde_json::from_slice(&body)?;
            self.sent.lock().unwrap().push(value);
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn submitter(limit: usize, transport: MockTransport) -> DocumentSubmitter<MockTransport> {
        let gate = RateGate::new(limit, Duration::from_millis(1000)).unwrap();
        DocumentSubmitter::new(Arc::new(gate), transport)
    }

    fn document(id: &str) -> Document {
        Document {
            doc_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_sends_document_and_signature() {
        let transport = MockTransport::new(200, "");
        let submitter = submitter(5, transport.clone());

        submitter.submit(&document("A-1"), "sig-1").await.unwrap();

        assert_eq!(
            transport.sent(),
            vec![serde_json::json!({
                "document": { "doc_id": "A-1" },
                "signature": "sig-1"
            })]
        );
    }

    #[tokio::test]
    async fn test_status_below_400_is_success() {
        let transport = MockTransport::new(302, "moved");
        let submitter = submitter(5, transport);

        tokio_test::assert_ok!(submitter.submit(&document("A-2"), "sig").await);
    }

    #[tokio::test]
    async fn test_status_400_and_above_is_rejection() {
        let transport = MockTransport::new(503, "service unavailable");
        let submitter = submitter(5, transport.clone());

        let err = submitter.submit(&document("A-3"), "sig").await.unwrap_err();

        match err {
            CrptError::RemoteRejection { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "service unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_signature_is_rejected_before_admission() {
        let transport = MockTransport::new(200, "");
        let submitter = submitter(1, transport.clone());

        let result = submitter.submit(&document("A-4"), "  ").await;

        assert!(matches!(result, Err(CrptError::InvalidInput { .. })));
        assert!(transport.sent().is_empty());
        assert_eq!(submitter.gate().admissions_in_window().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_submissions_are_paced() {
        let transport = MockTransport::new(200, "");
        let submitter = submitter(1, transport.clone());
        let start = tokio::time::Instant::now();

        for i in 0..3 {
            submitter.submit(&document(&format!("B-{i}")), "sig").await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(transport.sent().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_is_not_sent() {
        let transport = MockTransport::new(200, "");
        let submitter = submitter(1, transport.clone());
        submitter.submit(&document("C-1"), "sig").await.unwrap();

        let result = submitter
            .submit_or_cancel(
                &document("C-2"),
                "sig",
                tokio::time::sleep(Duration::from_millis(50)),
            )
            .await;

        assert!(matches!(result, Err(CrptError::Interrupted)));
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(submitter.gate().admissions_in_window().await, 1);
    }
}
