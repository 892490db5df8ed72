//! Read-only timeline endpoints.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::client::{get_text, parse_rows};
use super::error::Result;
use crate::config::ApiConfig;

/// One row of `GET /timeline`: a storyteller and how many events their story
/// produced.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Person {
	/// Story the timeline belongs to.
	pub story_id: i64,
	/// Subject of the story.
	#[serde(default)]
	pub person_name: Option<String>,
	/// Number of extracted events.
	#[serde(default)]
	pub event_count: u32,
	/// Last change to the story, as an ISO timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

impl Person {
	/// Name to show, "Unknown" when the story has none.
	pub fn display_name(&self) -> &str {
		self.person_name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("Unknown")
	}
}

/// A dated life event extracted from a story.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TimelineEvent {
	/// Backend id.
	#[serde(default)]
	pub id: Option<i64>,
	/// Year as shown on the badge; the backend sends a number or a string.
	#[serde(default, deserialize_with = "year_label")]
	pub year: Option<String>,
	/// Headline.
	#[serde(default)]
	pub event: Option<String>,
	/// Secondary heading.
	#[serde(default)]
	pub title: Option<String>,
	/// Body text.
	#[serde(default)]
	pub description: Option<String>,
	/// Where it happened.
	#[serde(default)]
	pub location: Option<String>,
	/// Kind of event, e.g. "migration".
	#[serde(default)]
	pub category: Option<String>,
}

fn year_label<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::Number(n)) => Some(n.to_string()),
		Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
		_ => None,
	})
}

/// Decode a `/timeline` body.
pub fn parse_people(body: &str) -> Result<Vec<Person>> {
	parse_rows(body, "timeline person")
}

/// Decode a `/timeline/{id}` body.
pub fn parse_timeline(body: &str) -> Result<Vec<TimelineEvent>> {
	parse_rows(body, "timeline event")
}

/// `GET /timeline`.
pub async fn fetch_people(config: &ApiConfig) -> Result<Vec<Person>> {
	parse_people(&get_text(config, "/timeline").await?)
}

/// `GET /timeline/{story_id}`.
pub async fn fetch_timeline(config: &ApiConfig, story_id: i64) -> Result<Vec<TimelineEvent>> {
	parse_timeline(&get_text(config, &format!("/timeline/{story_id}")).await?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn people_default_missing_fields() {
		let people = parse_people(
			r#"[{"story_id":4,"person_name":"Amrit","event_count":3,"updated_at":"2024-05-02T10:00:00"},
			    {"story_id":5,"person_name":null}]"#,
		)
		.unwrap();
		assert_eq!(people.len(), 2);
		assert_eq!(people[0].display_name(), "Amrit");
		assert_eq!(people[1].display_name(), "Unknown");
		assert_eq!(people[1].event_count, 0);
	}

	#[test]
	fn person_without_story_id_is_skipped() {
		let people = parse_people(r#"[{"person_name":"Nobody"},{"story_id":2}]"#).unwrap();
		assert_eq!(people.len(), 1);
		assert_eq!(people[0].story_id, 2);
	}

	#[test]
	fn year_accepts_numbers_and_strings() {
		let events = parse_timeline(
			r#"[{"year":1947,"event":"Partition"},{"year":"1960s","event":"Moved"},{"year":null,"event":"Later"}]"#,
		)
		.unwrap();
		let years: Vec<Option<&str>> = events.iter().map(|e| e.year.as_deref()).collect();
		assert_eq!(years, vec![Some("1947"), Some("1960s"), None]);
	}

	#[test]
	fn error_object_is_no_events() {
		assert!(parse_timeline(r#"{"error":"Backend error"}"#).unwrap().is_empty());
	}
}
