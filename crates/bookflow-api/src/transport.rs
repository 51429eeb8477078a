//! Transport capability
//!
//! The only boundary the reconciliation core depends on: a capability that
//! sends one HTTP request and returns the status plus decoded JSON body.
//! [`HttpTransport`] is the production implementation; tests script the
//! trait directly.

use crate::error::TransportError;
use async_trait::async_trait;
use bookflow_config::BooksContext;
use serde_json::Value;

/// HTTP method of a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Raw response handed back by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    /// Decoded JSON body, `None` when the body was empty or not JSON
    pub body: Option<Value>,
}

/// One-request/one-response capability over the remote API
///
/// Implementations own connection handling, TLS and authentication; callers
/// see only paths relative to the API base and JSON in/out. A network-level
/// failure is returned as [`TransportError`] and is never retried here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport for the Zoho Books v3 API
///
/// Adds the organization-scoping query parameter and the
/// `Zoho-oauthtoken` authorization header to every request.
pub struct HttpTransport {
    client: reqwest::Client,
    context: BooksContext,
}

impl HttpTransport {
    pub fn new(context: BooksContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            context,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3/{}", self.context.api_domain, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.url(path);
        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        request = request
            .query(&[("organization_id", self.context.organization_id.as_str())])
            .query(query)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Zoho-oauthtoken {}", self.context.access_token),
            );

        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "sending request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).ok();

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let transport = HttpTransport::new(BooksContext::new(
            "123",
            "token",
            "https://books.zoho.com",
        ));
        assert_eq!(
            transport.url("items/42"),
            "https://books.zoho.com/api/v3/items/42"
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
