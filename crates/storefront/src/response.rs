//! Uniform JSON response envelope.
//!
//! Every successful action responds with `{"success": true, ...}`; failures
//! go through `AppError` and produce `{"success": false, "error": "..."}`.
//! The payload's own fields are flattened into the envelope so clients read
//! `body.artworks`, not `body.data.artworks`.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Wrap a payload in the success envelope.
///
/// Object payloads are flattened into the envelope; any other JSON shape is
/// placed under `data`.
pub fn ok<T: Serialize>(payload: T) -> Json<Value> {
    let value = serde_json::to_value(payload).unwrap_or(Value::Null);
    match value {
        Value::Object(mut map) => {
            map.insert("success".to_string(), Value::Bool(true));
            Json(Value::Object(map))
        }
        Value::Null => Json(json!({ "success": true })),
        other => Json(json!({ "success": true, "data": other })),
    }
}

/// A bare success envelope with no payload.
#[must_use]
pub fn ok_empty() -> Json<Value> {
    Json(json!({ "success": true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn test_ok_flattens_object_payload() {
        let Json(value) = ok(Payload { count: 3 });
        assert_eq!(value["success"], Value::Bool(true));
        assert_eq!(value["count"], json!(3));
    }

    #[test]
    fn test_ok_wraps_non_object_payload() {
        let Json(value) = ok(vec![1, 2, 3]);
        assert_eq!(value["success"], Value::Bool(true));
        assert_eq!(value["data"], json!([1, 2, 3]));
    }

    #[test]
    fn test_ok_empty() {
        let Json(value) = ok_empty();
        assert_eq!(value, json!({ "success": true }));
    }
}
