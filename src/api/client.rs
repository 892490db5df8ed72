//! Request plumbing shared by the endpoint modules.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::{ApiError, Result};
use crate::config::ApiConfig;

/// Turn a non-2xx reply into [`ApiError::Status`] carrying the raw body.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}
	let body = response.text().await.unwrap_or_default();
	Err(ApiError::Status {
		status: status.as_u16(),
		body,
	})
}

/// `GET {root}{path}` and return the body text of a successful reply.
pub(crate) async fn get_text(config: &ApiConfig, path: &str) -> Result<String> {
	let response = reqwest::Client::new().get(config.url(path)).send().await?;
	Ok(check(response).await?.text().await?)
}

/// Decode each row on its own, dropping the ones that do not fit `T`.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, what: &str) -> Vec<T> {
	rows.into_iter()
		.enumerate()
		.filter_map(|(i, row)| match serde_json::from_value(row) {
			Ok(item) => Some(item),
			Err(e) => {
				warn!("skipping {what} row {i}: {e}");
				None
			}
		})
		.collect()
}

/// Decode a body that should be a JSON array of `T`. Other well-formed JSON
/// yields no rows.
pub(crate) fn parse_rows<T: DeserializeOwned>(body: &str, what: &str) -> Result<Vec<T>> {
	match serde_json::from_str(body)? {
		Value::Array(rows) => Ok(decode_rows(rows, what)),
		other => {
			debug!("expected a list of {what}, got {other}");
			Ok(Vec::new())
		}
	}
}

/// `deserialize_with` helper for nested lists: absent or null is empty and bad
/// rows are dropped.
pub(crate) fn lenient_rows<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let rows = Option::<Vec<Value>>::deserialize(deserializer)?;
	Ok(decode_rows(rows.unwrap_or_default(), "nested"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[derive(Debug, Deserialize, PartialEq)]
	struct Row {
		id: i64,
	}

	#[test]
	fn bad_rows_are_dropped_in_order() {
		let rows = vec![json!({"id": 1}), json!({"id": "x"}), json!(null), json!({"id": 3})];
		let decoded: Vec<Row> = decode_rows(rows, "test");
		assert_eq!(decoded, vec![Row { id: 1 }, Row { id: 3 }]);
	}

	#[test]
	fn non_array_body_has_no_rows() {
		let rows: Vec<Row> = parse_rows(r#"{"error":"down"}"#, "test").unwrap();
		assert!(rows.is_empty());
		assert!(parse_rows::<Row>("oops", "test").is_err());
	}

	#[derive(Debug, Deserialize)]
	struct Holder {
		#[serde(default, deserialize_with = "lenient_rows")]
		rows: Vec<Row>,
	}

	#[test]
	fn nested_rows_tolerate_null_and_bad_items() {
		let h: Holder = serde_json::from_value(json!({"rows": null})).unwrap();
		assert!(h.rows.is_empty());
		let h: Holder = serde_json::from_value(json!({"rows": [{"id": 1}, {"id": []}]})).unwrap();
		assert_eq!(h.rows, vec![Row { id: 1 }]);
		let h: Holder = serde_json::from_value(json!({})).unwrap();
		assert!(h.rows.is_empty());
	}
}
