//! Shape-tolerant extraction helpers for backend analytics payloads.
//!
//! The analytics endpoints have drifted over time, so every accessor here is
//! total: a missing key, a wrong type, or a null payload yields an empty or
//! zero value instead of an error. Absence is a modeled case (`Option` /
//! empty slice), never a panic.

use serde_json::Value;

const EMPTY: &[Value] = &[];

/// Unwrap a list payload. Accepts either a bare JSON array or an envelope
/// object exposing the array under a `results` or `data` key. Anything else
/// is treated as an empty list.
pub fn items(payload: &Value) -> &[Value] {
    if let Some(list) = payload.as_array() {
        return list.as_slice();
    }
    list_field(payload, "results")
        .or_else(|| list_field(payload, "data"))
        .unwrap_or(EMPTY)
}

/// Array stored under `key`, if present and actually an array.
pub fn list_field<'a>(payload: &'a Value, key: &str) -> Option<&'a [Value]> {
    payload.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// First numeric value found walking the fallback key chain; 0.0 otherwise.
pub fn num(payload: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_f64))
        .unwrap_or(0.0)
}

/// Same fallback chain as [`num`] but truncated to an unsigned count.
pub fn count(payload: &Value, keys: &[&str]) -> u32 {
    let value = num(payload, keys);
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// String stored under `key`; empty string when missing or non-string.
pub fn text<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_accepts_bare_arrays_and_envelopes() {
        let bare = json!([1, 2, 3]);
        assert_eq!(items(&bare).len(), 3);

        let results = json!({ "results": [1, 2] });
        assert_eq!(items(&results).len(), 2);

        let data = json!({ "data": [1] });
        assert_eq!(items(&data).len(), 1);
    }

    #[test]
    fn items_degrades_to_empty_on_any_other_shape() {
        assert!(items(&Value::Null).is_empty());
        assert!(items(&json!({})).is_empty());
        assert!(items(&json!({ "foo": 1 })).is_empty());
        assert!(items(&json!({ "results": "not-a-list" })).is_empty());
        assert!(items(&json!(42)).is_empty());
    }

    #[test]
    fn num_walks_the_fallback_chain() {
        let payload = json!({ "attempts": 7 });
        assert_eq!(num(&payload, &["attempts_count", "attempts"]), 7.0);
        assert_eq!(num(&payload, &["missing"]), 0.0);
        assert_eq!(num(&Value::Null, &["anything"]), 0.0);
    }

    #[test]
    fn count_clamps_negatives_and_non_numbers() {
        assert_eq!(count(&json!({ "n": -3 }), &["n"]), 0);
        assert_eq!(count(&json!({ "n": "five" }), &["n"]), 0);
        assert_eq!(count(&json!({ "n": 4.9 }), &["n"]), 4);
    }

    #[test]
    fn text_defaults_to_empty() {
        assert_eq!(text(&json!({ "date": "2024-01-03" }), "date"), "2024-01-03");
        assert_eq!(text(&json!({ "date": 3 }), "date"), "");
        assert_eq!(text(&Value::Null, "date"), "");
    }
}
