//! Zoho Books API client
//!
//! Thin request layer between the reconciliation components and the
//! [`Transport`] capability: applies the HTTP-status acceptance rule and
//! decodes the response envelope. Application-level codes are left for the
//! callers, which differ in whether 1004 is tolerable.

use crate::envelope::Envelope;
use crate::error::{ApiError, Result};
use crate::transport::{HttpTransport, Method, Transport};
use bookflow_config::BooksContext;
use serde_json::Value;
use std::sync::Arc;

/// Client over a transport capability
///
/// Cheap to clone; a clone shares the underlying transport.
#[derive(Clone)]
pub struct BooksClient {
    transport: Arc<dyn Transport>,
}

impl BooksClient {
    /// Production client backed by [`HttpTransport`]
    pub fn new(context: BooksContext) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(context)))
    }

    /// Client over an arbitrary transport (used by tests)
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send one request and decode the envelope.
    ///
    /// HTTP statuses other than 200/201 fail here, surfacing the remote
    /// `message` when the error body parses.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Envelope> {
        let response = self.transport.send(method, path, query, body).await?;

        if !matches!(response.status, 200 | 201) {
            let (code, message) = match &response.body {
                Some(body) => (
                    body.get("code").and_then(Value::as_i64).unwrap_or(0),
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                ),
                None => (0, None),
            };
            return Err(ApiError::remote(response.status, code, message));
        }

        let body = response.body.ok_or_else(|| {
            ApiError::UnexpectedPayload("response body is empty or not JSON".to_string())
        })?;
        Envelope::from_body(response.status, body)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Envelope> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Envelope> {
        self.request(Method::Post, path, &[], body).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Envelope> {
        self.request(Method::Put, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        self.request(Method::Delete, path, &[], None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_http_error_surfaces_remote_message() {
        let transport = MockTransport::new();
        transport.push_response(401, json!({"code": 57, "message": "Invalid token"}));
        let client = BooksClient::with_transport(Arc::new(transport));

        match client.get("items", &[]).await {
            Err(ApiError::Remote {
                status, message, ..
            }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid token");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_without_body_gets_generic_message() {
        let transport = MockTransport::new();
        transport.push_empty_response(502);
        let client = BooksClient::with_transport(Arc::new(transport));

        match client.get("items", &[]).await {
            Err(ApiError::Remote {
                status, message, ..
            }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "API request failed with status 502");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_created_status_is_accepted() {
        let transport = MockTransport::new();
        transport.push_response(201, json!({"code": 0, "item": {"item_id": "1"}}));
        let client = BooksClient::with_transport(Arc::new(transport));

        let envelope = client.post("items", Some(&json!({"name": "x"}))).await.unwrap();
        assert!(envelope.is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockTransport::new();
        transport.push_failure("connection refused");
        let client = BooksClient::with_transport(Arc::new(transport));

        assert!(matches!(
            client.get("items", &[]).await,
            Err(ApiError::Transport(_))
        ));
    }
}
