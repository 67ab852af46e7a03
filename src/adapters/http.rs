use crate::domain::ports::{DocumentTransport, TransportResponse};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://ismp.crpt.ru/v3/lk/documents/commissioning/contract/create";

/// reqwest-backed transport posting JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        validate_url("api.endpoint", endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DocumentTransport for HttpTransport {
    async fn post_json(&self, body: Vec<u8>) -> Result<TransportResponse> {
        tracing::debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CrptError;
    use httpmock::prelude::*;

    #[test]
    fn test_rejects_invalid_endpoint() {
        let result = HttpTransport::new("not a url", None);
        assert!(matches!(result, Err(CrptError::InvalidConfiguration { .. })));
    }

    #[tokio::test]
    async fn test_posts_json_and_returns_raw_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/create")
                .header("content-type", "application/json")
                .body(r#"{"document":{},"signature":"s"}"#);
            then.status(422).body("bad document");
        });

        let transport = HttpTransport::new(&server.url("/create"), None).unwrap();
        let response = transport
            .post_json(br#"{"document":{},"signature":"s"}"#.to_vec())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(
            response,
            TransportResponse {
                status: 422,
                body: "bad document".to_string()
            }
        );
    }
}
