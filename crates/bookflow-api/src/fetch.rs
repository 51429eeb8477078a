//! Paged collection fetching
//!
//! Retrieves a complete collection across however many result pages the
//! remote reports, hiding pagination from callers. The accumulated list is
//! owned by the invocation and discarded after use; a failing page aborts
//! the whole fetch rather than returning partial results.

use crate::client::BooksClient;
use crate::error::{ApiError, Result};
use bookflow_core::{RemoteResource, ResourceKind};
use serde_json::Value;

/// Fetch every resource of `kind`, in page order.
///
/// `filter_by` is passed through to the remote listing verbatim (e.g.
/// `Status.Active`). Pages are requested sequentially starting at 1 until
/// `page_context.has_more_page` is false.
pub async fn fetch_all(
    client: &BooksClient,
    kind: ResourceKind,
    filter_by: Option<&str>,
) -> Result<Vec<RemoteResource>> {
    let mut resources = Vec::new();
    let mut page: u32 = 1;

    loop {
        let mut query: Vec<(String, String)> = kind
            .collection_query()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        query.push(("page".to_string(), page.to_string()));
        if let Some(filter) = filter_by {
            query.push(("filter_by".to_string(), filter.to_string()));
        }

        let mut envelope = client
            .get(kind.collection_path(), &query)
            .await?
            .ensure_ok()?;

        let Some(Value::Array(entries)) = envelope.take(kind.list_key()) else {
            return Err(ApiError::UnexpectedPayload(format!(
                "listing response is missing the '{}' array",
                kind.list_key()
            )));
        };

        tracing::debug!(%kind, page, count = entries.len(), "fetched page");

        for entry in entries {
            let resource = RemoteResource::from_payload(kind, entry).ok_or_else(|| {
                ApiError::UnexpectedPayload(format!(
                    "listing entry without a '{}' field",
                    kind.id_field()
                ))
            })?;
            resources.push(resource);
        }

        if !envelope.has_more_page() {
            break;
        }
        page += 1;
    }

    Ok(resources)
}
