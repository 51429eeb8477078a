//! Zoho Books response envelope
//!
//! Every response body is a JSON object carrying an application-level `code`
//! (0 on success, 1004 for "not found") and a `message`, alongside a
//! kind-specific payload key (`account`, `items`, `contact`, …) and, for
//! listings, a `page_context` with the continuation flag.

use crate::error::{ApiError, Result};
use serde_json::{Map, Value};

/// Distinguished application code for "resource not found"
pub const CODE_NOT_FOUND: i64 = 1004;

/// Decoded response envelope, still carrying the HTTP status it arrived with
#[derive(Debug, Clone)]
pub struct Envelope {
    pub status: u16,
    pub code: i64,
    pub message: String,
    fields: Map<String, Value>,
}

impl Envelope {
    /// Decode a response body.
    ///
    /// `code` defaults to 0 when absent: some success responses (and all
    /// non-JSON failures, which are caught earlier by the HTTP status
    /// check) do not carry one.
    pub fn from_body(status: u16, body: Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(ApiError::UnexpectedPayload(
                "response body is not a JSON object".to_string(),
            ));
        };
        let code = fields.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = fields
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            status,
            code,
            message,
            fields,
        })
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    pub fn is_not_found(&self) -> bool {
        self.code == CODE_NOT_FOUND
    }

    /// Fail unless the application code signals success
    pub fn ensure_ok(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ApiError::remote(
                self.status,
                self.code,
                Some(self.message).filter(|m| !m.is_empty()),
            ))
        }
    }

    /// Remove and return a payload value by key
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Continuation flag from `page_context.has_more_page`
    pub fn has_more_page(&self) -> bool {
        self.fields
            .get("page_context")
            .and_then(|ctx| ctx.get("has_more_page"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::from_body(
            200,
            json!({"code": 0, "message": "success", "item": {"item_id": "1"}}),
        )
        .unwrap();
        assert!(envelope.is_ok());
        assert!(!envelope.is_not_found());
        assert_eq!(envelope.message, "success");
    }

    #[test]
    fn test_not_found_code() {
        let envelope =
            Envelope::from_body(200, json!({"code": 1004, "message": "Item does not exist."}))
                .unwrap();
        assert!(envelope.is_not_found());
        assert!(envelope.ensure_ok().is_err());
    }

    #[test]
    fn test_ensure_ok_surfaces_remote_message() {
        let envelope =
            Envelope::from_body(200, json!({"code": 37, "message": "rate limit hit"})).unwrap();
        match envelope.ensure_ok() {
            Err(ApiError::Remote {
                status,
                code,
                message,
            }) => {
                assert_eq!(status, 200);
                assert_eq!(code, 37);
                assert_eq!(message, "rate limit hit");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_code_defaults_to_success() {
        let envelope = Envelope::from_body(200, json!({"items": []})).unwrap();
        assert!(envelope.is_ok());
    }

    #[test]
    fn test_page_context() {
        let more = Envelope::from_body(
            200,
            json!({"code": 0, "items": [], "page_context": {"has_more_page": true}}),
        )
        .unwrap();
        assert!(more.has_more_page());

        let last = Envelope::from_body(200, json!({"code": 0, "items": []})).unwrap();
        assert!(!last.has_more_page());
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(Envelope::from_body(200, json!([1, 2, 3])).is_err());
    }
}
