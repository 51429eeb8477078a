//! Field diffing between desired and observed state
//!
//! Only fields explicitly supplied in the desired state participate; a field
//! the caller never mentioned can neither trigger an update nor end up in a
//! request body. Comparison is by semantic value: `25` equals `25.0`,
//! objects are compared structurally over the desired object's keys, and a
//! field the remote never reported compares equal to an explicitly-desired
//! empty string (the remote collapses cleared strings to absent fields).

use crate::desired::DesiredResource;
use crate::resource::RemoteResource;
use serde_json::Value;

/// Whether the observed resource differs from the desired field set
pub fn needs_update(existing: &RemoteResource, desired: &DesiredResource) -> bool {
    !differing_fields(existing, desired).is_empty()
}

/// Names of the explicitly-desired fields whose observed value differs
pub fn differing_fields(existing: &RemoteResource, desired: &DesiredResource) -> Vec<String> {
    desired
        .diff_fields()
        .into_iter()
        .filter(|(name, want)| !values_equal(existing.field(name), want))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Semantic value equality between an observed value (possibly absent) and a
/// desired value
pub fn values_equal(observed: Option<&Value>, desired: &Value) -> bool {
    match observed {
        Some(observed) => value_eq(observed, desired),
        // Remote systems commonly omit fields that were never set; treat
        // that the same as an empty value.
        None => matches!(desired, Value::Null) || desired.as_str() == Some(""),
    }
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            // Representation-insensitive: 25 == 25.0
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Object(observed), Value::Object(desired)) => {
            // Structural comparison restricted to the desired keys: fields
            // the caller did not mention inside a nested object are ignored,
            // mirroring the top-level present-vs-absent rule.
            desired
                .iter()
                .all(|(key, want)| values_equal(observed.get(key), want))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| value_eq(a, b))
        }
        _ => a == b,
    }
}
