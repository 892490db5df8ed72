//! Read-only story endpoints.

use serde::Deserialize;

use super::client::{get_text, lenient_rows, parse_rows};
use super::error::Result;
use super::family::Member;
use super::timeline::TimelineEvent;
use crate::config::ApiConfig;

/// A card in the story library.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StorySummary {
	/// Story id, used in `/story/{id}` links.
	pub id: i64,
	/// Subject of the story.
	#[serde(default)]
	pub person_name: Option<String>,
	/// Short generated summary.
	#[serde(default)]
	pub summary: Option<String>,
	/// Length of the story text, when the backend reports it.
	#[serde(default)]
	pub character_count: Option<usize>,
	/// Creation time, as an ISO timestamp.
	#[serde(default)]
	pub created_at: Option<String>,
}

impl StorySummary {
	/// Name to show, "Unknown" when the story has none.
	pub fn display_name(&self) -> &str {
		display_name(self.person_name.as_deref())
	}

	/// Reported character count, else the length of the summary.
	pub fn char_count(&self) -> usize {
		self.character_count
			.or_else(|| self.summary.as_ref().map(|s| s.chars().count()))
			.unwrap_or(0)
	}
}

/// Birth details of a story's subject.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StoryPerson {
	/// Full name.
	#[serde(default)]
	pub name: Option<String>,
	/// Year of birth.
	#[serde(default)]
	pub birth_year: Option<i32>,
	/// Place of birth.
	#[serde(default)]
	pub birth_place: Option<String>,
	/// Year of death.
	#[serde(default)]
	pub death_year: Option<i32>,
}

/// A full story with everything extracted from it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Story {
	/// Story id.
	pub id: i64,
	/// Subject of the story.
	#[serde(default)]
	pub person_name: Option<String>,
	/// Generated biography text.
	#[serde(default)]
	pub body: Option<String>,
	/// Biography text under its older key.
	#[serde(default)]
	pub story: Option<String>,
	/// Short generated summary.
	#[serde(default)]
	pub summary: Option<String>,
	/// Story id the timeline is keyed by, when it differs from `id`.
	#[serde(default)]
	pub story_id: Option<i64>,
	/// Last change, as an ISO timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
	/// Birth details of the subject.
	#[serde(default)]
	pub person: Option<StoryPerson>,
	/// Events extracted from the text.
	#[serde(default, deserialize_with = "lenient_rows")]
	pub timeline_events: Vec<TimelineEvent>,
	/// Relatives mentioned in the text.
	#[serde(default, deserialize_with = "lenient_rows")]
	pub family_members: Vec<Member>,
}

impl Story {
	/// Name to show, "Unknown" when the story has none.
	pub fn display_name(&self) -> &str {
		display_name(self.person_name.as_deref())
	}

	/// Id of the matching `/timeline/{id}` page.
	pub fn timeline_id(&self) -> i64 {
		self.story_id.unwrap_or(self.id)
	}

	/// Non-blank lines of the story text, each one a paragraph.
	pub fn paragraphs(&self) -> Vec<&str> {
		self.story
			.as_deref()
			.or(self.body.as_deref())
			.unwrap_or_default()
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.collect()
	}
}

fn display_name(name: Option<&str>) -> &str {
	name.filter(|n| !n.trim().is_empty()).unwrap_or("Unknown")
}

/// Decode a `/story_library` body.
pub fn parse_library(body: &str) -> Result<Vec<StorySummary>> {
	parse_rows(body, "story")
}

/// Decode a `/story/{id}` body. `null` means there is no such story.
pub fn parse_story(body: &str) -> Result<Option<Story>> {
	Ok(serde_json::from_str(body)?)
}

/// `GET /story_library`.
pub async fn fetch_story_library(config: &ApiConfig) -> Result<Vec<StorySummary>> {
	parse_library(&get_text(config, "/story_library").await?)
}

/// `GET /story/{id}`.
pub async fn fetch_story(config: &ApiConfig, id: i64) -> Result<Option<Story>> {
	parse_story(&get_text(config, &format!("/story/{id}")).await?)
}
