//! Thin client for the VirsaAI backend: the editable family directory plus
//! read-only stories and timelines.

mod client;
mod error;
mod family;
mod story;
mod timeline;

pub use error::{ApiError, Result};
pub use family::{CreatedMember, Member, NewMember, create_member, fetch_family, parse_family};
pub use story::{
	Story, StoryPerson, StorySummary, fetch_story, fetch_story_library, parse_library, parse_story,
};
pub use timeline::{
	Person, TimelineEvent, fetch_people, fetch_timeline, parse_people, parse_timeline,
};
