//! Family directory endpoints.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{check, decode_rows, get_text};
use super::error::Result;
use crate::config::ApiConfig;

/// A person in the family directory, as the backend stores them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
	/// Backend primary key; also the member card's node id.
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Free-text relation to the storyteller, e.g. "grandmother".
	#[serde(default)]
	pub relationship: Option<String>,
	/// Year of birth.
	#[serde(default)]
	pub birth_year: Option<i32>,
	/// Year of death.
	#[serde(default)]
	pub death_year: Option<i32>,
	/// Story the member was extracted from.
	#[serde(default)]
	pub story_id: Option<i64>,
	/// Free-form notes.
	#[serde(default)]
	pub notes: Option<String>,
}

/// Body of `POST /family/member`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewMember {
	/// Display name, already trimmed.
	pub name: String,
	/// Relation to the storyteller; omitted when blank.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub relationship: Option<String>,
	/// Year of birth; omitted when blank.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birth_year: Option<i32>,
}

/// Reply to `POST /family/member`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedMember {
	/// Id assigned by the backend.
	pub id: i64,
}

/// Decode a `/family` body: a bare array or `{ "members": [...] }`. Any other
/// well-formed JSON means an empty directory. Rows that are not valid members
/// are skipped; the rest still load.
pub fn parse_family(body: &str) -> Result<Vec<Member>> {
	let rows = match serde_json::from_str(body)? {
		Value::Array(rows) => rows,
		Value::Object(mut map) => match map.remove("members") {
			Some(Value::Array(rows)) => rows,
			_ => {
				debug!("unrecognised /family payload: {}", Value::Object(map));
				Vec::new()
			}
		},
		other => {
			debug!("unrecognised /family payload: {other}");
			Vec::new()
		}
	};
	Ok(decode_rows(rows, "family member"))
}

/// `GET /family`.
pub async fn fetch_family(config: &ApiConfig) -> Result<Vec<Member>> {
	parse_family(&get_text(config, "/family").await?)
}

/// `POST /family/member`.
pub async fn create_member(config: &ApiConfig, member: &NewMember) -> Result<CreatedMember> {
	let response = reqwest::Client::new()
		.post(config.url("/family/member"))
		.json(member)
		.send()
		.await?;
	Ok(check(response).await?.json().await?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::ApiError;

	#[test]
	fn parses_bare_array() {
		let members = parse_family(
			r#"[{"id":1,"name":"Amrit","relationship":"grandmother","birth_year":1931,"death_year":2004},
			    {"id":2,"name":"Simran"}]"#,
		)
		.unwrap();
		assert_eq!(members.len(), 2);
		assert_eq!(members[0].birth_year, Some(1931));
		assert_eq!(members[1].relationship, None);
	}

	#[test]
	fn parses_wrapped_members() {
		let members = parse_family(r#"{"members":[{"id":3,"name":"Raj","story_id":4}]}"#).unwrap();
		assert_eq!(members[0].id, 3);
		assert_eq!(members[0].story_id, Some(4));
	}

	#[test]
	fn explicit_nulls_are_absent() {
		let members =
			parse_family(r#"[{"id":1,"name":"Amrit","relationship":null,"birth_year":null}]"#).unwrap();
		assert_eq!(members[0].relationship, None);
		assert_eq!(members[0].birth_year, None);
	}

	#[test]
	fn unknown_shape_is_empty() {
		assert!(parse_family(r#"{"detail":"nope"}"#).unwrap().is_empty());
		assert!(parse_family("null").unwrap().is_empty());
		assert!(parse_family("[]").unwrap().is_empty());
	}

	#[test]
	fn one_bad_row_keeps_the_rest() {
		let members =
			parse_family(r#"[{"id":1,"name":"Amrit"},{"id":2,"name":null},{"id":3,"name":"Raj"}]"#).unwrap();
		let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
		assert_eq!(ids, vec![1, 3]);

		let members = parse_family(
			r#"{"members":[{"id":1,"name":"Amrit"},{"id":2,"name":"Raj","birth_year":1958.0}]}"#,
		)
		.unwrap();
		assert_eq!(members.len(), 1);
		assert_eq!(members[0].name, "Amrit");
	}

	#[test]
	fn members_key_without_array_is_empty() {
		assert!(parse_family(r#"{"members":null}"#).unwrap().is_empty());
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(parse_family("<html>"), Err(ApiError::Json(_))));
	}

	#[test]
	fn new_member_omits_absent_fields() {
		let body = serde_json::to_value(NewMember {
			name: "Raj".into(),
			..NewMember::default()
		})
		.unwrap();
		assert_eq!(body, serde_json::json!({ "name": "Raj" }));
	}
}
