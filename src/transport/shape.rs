use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use super::TransportError;
use crate::domain::{InstantMessageStatusDto, SendMessageResultDto};

const RESULTS: &str = "results";
const ID: &str = "id";

/// Decode the response of an instant or prepared send.
///
/// The server answers in one of three shapes:
/// - no `results` key (or `results: null`): the whole body is a single result,
/// - `results` is one result object,
/// - `results` is a list of result objects.
///
/// An empty body counts as one result with nothing set. A scalar `results` is rejected.
pub fn decode_send_results(body: Value) -> Result<Vec<SendMessageResultDto>, TransportError> {
    let mut map = match body {
        Value::Null => return Ok(vec![SendMessageResultDto::default()]),
        Value::Object(map) => map,
        other => return Ok(vec![serde_json::from_value(other)?]),
    };

    match map.remove(RESULTS) {
        None | Some(Value::Null) => Ok(vec![serde_json::from_value(Value::Object(map))?]),
        Some(Value::Array(items)) => decode_items(items),
        Some(results @ Value::Object(_)) => Ok(vec![serde_json::from_value(results)?]),
        Some(other) => Err(serde_json::Error::custom(format_args!(
            "`{RESULTS}` must be an object or a list, got {other}"
        ))
        .into()),
    }
}

/// Decode a status lookup that may hold one status object or a list of them.
pub fn decode_statuses(body: Value) -> Result<Vec<InstantMessageStatusDto>, TransportError> {
    let results = match body {
        Value::Object(mut map) if map.contains_key(RESULTS) => {
            map.remove(RESULTS).unwrap_or(Value::Null)
        }
        other => other,
    };
    decode_one_or_many(results)
}

/// Decode `null`, a single object, or an array into a list, preserving order.
pub fn decode_one_or_many<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, TransportError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => decode_items(items),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Like [`decode_one_or_many`], but looks inside `key` first when the body is an object
/// wrapping the payload (e.g. `{"addressBook": {...}}`).
pub fn decode_wrapped_list<T: DeserializeOwned>(
    body: Value,
    key: &str,
) -> Result<Vec<T>, TransportError> {
    match body {
        Value::Object(mut map) if map.contains_key(key) => {
            decode_one_or_many(map.remove(key).unwrap_or(Value::Null))
        }
        other => decode_one_or_many(other),
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, TransportError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(TransportError::from))
        .collect()
}

/// Server-assigned numeric id of a created entity (`{"id": 42}`), if present.
pub fn decode_created_id(body: &Value) -> Option<u64> {
    match body.get(ID)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a decoded body counts as a successful acknowledgement.
///
/// `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}` are falsy; everything else is truthy.
pub fn is_truthy(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::domain::AddressBook;

    #[test]
    fn send_results_without_results_key_wrap_whole_body() {
        let results = decode_send_results(json!({})).unwrap();
        assert_eq!(results, vec![SendMessageResultDto::default()]);

        let results =
            decode_send_results(json!({"locator": "x", "status": "OK", "requestId": "r1"}))
                .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].locator.as_deref(), Some("x"));
        assert_eq!(results[0].request_id.as_deref(), Some("r1"));
    }

    #[test]
    fn send_results_with_single_result_object() {
        let results =
            decode_send_results(json!({"results": {"locator": "x", "status": "ok"}})).unwrap();
        assert_eq!(
            results,
            vec![SendMessageResultDto {
                locator: Some("x".to_owned()),
                status: Some("ok".to_owned()),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn send_results_with_list_preserve_order() {
        let results =
            decode_send_results(json!({"results": [{"locator": "a"}, {"locator": "b"}]}))
                .unwrap();
        let locators = results
            .iter()
            .map(|it| it.locator.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(locators, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn send_results_with_locatorless_object_still_yield_one_result() {
        let results = decode_send_results(json!({"results": {"status": "queued"}})).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status.as_deref(), Some("queued"));
    }

    #[test]
    fn send_results_with_null_results_wrap_whole_body() {
        let results = decode_send_results(json!({"results": null, "locator": "x"})).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].locator.as_deref(), Some("x"));
    }

    #[test]
    fn empty_send_response_is_one_blank_result() {
        let results = decode_send_results(Value::Null).unwrap();
        assert_eq!(results, vec![SendMessageResultDto::default()]);
    }

    #[test]
    fn scalar_results_are_rejected() {
        let err = decode_send_results(json!({"results": "ok"})).unwrap_err();
        assert!(err.to_string().contains("results"), "{err}");
    }

    #[test]
    fn statuses_normalize_single_object_and_list() {
        let one = decode_statuses(json!({"results": {"status": "sent"}})).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].status.as_deref(), Some("sent"));

        let many =
            decode_statuses(json!({"results": [{"status": "sent"}, {"status": "failed"}]}))
                .unwrap();
        let statuses = many
            .iter()
            .map(|it| it.status.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(statuses, vec![Some("sent"), Some("failed")]);

        assert!(decode_statuses(json!({"results": null})).unwrap().is_empty());
        assert!(decode_statuses(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn wrapped_list_accepts_wrapper_or_bare_payload() {
        let books: Vec<AddressBook> =
            decode_wrapped_list(json!({"addressBook": {"name": "main"}}), "addressBook").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name.as_deref(), Some("main"));

        let books: Vec<AddressBook> =
            decode_wrapped_list(json!([{"name": "a"}, {"name": "b"}]), "addressBook").unwrap();
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn created_id_accepts_number_or_numeric_string() {
        assert_eq!(decode_created_id(&json!({"id": 42})), Some(42));
        assert_eq!(decode_created_id(&json!({"id": "43"})), Some(43));
        assert_eq!(decode_created_id(&json!({"id": null})), None);
        assert_eq!(decode_created_id(&json!({})), None);
        assert_eq!(decode_created_id(&Value::Null), None);
    }

    #[test]
    fn truthiness_matches_acknowledgement_rules() {
        for falsy in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("ok"), json!([0]), json!({"id": 1})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
