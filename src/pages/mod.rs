pub mod dashboard;
pub mod family;
pub mod not_found;
pub mod record;
pub mod story;
pub mod story_library;
pub mod timeline;
pub mod timeline_home;

/// Progress of a one-shot backend read.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetch<T> {
	Loading,
	Ready(T),
	Failed,
}

/// Case-insensitive substring match used by the search boxes.
pub fn name_matches(name: &str, query: &str) -> bool {
	let query = query.trim();
	query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Date part of a backend timestamp, "N/A" when there is none.
pub fn date_label(raw: Option<&str>) -> String {
	raw.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(|s| s.split(['T', ' ']).next().unwrap_or(s).to_owned())
		.unwrap_or_else(|| "N/A".to_owned())
}

/// Numeric `:id` route parameter.
pub fn parse_id(raw: Option<String>) -> Option<i64> {
	raw?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_ignores_case_and_blank_queries() {
		assert!(name_matches("Amrit Kaur", "kaur"));
		assert!(name_matches("Amrit", "  "));
		assert!(!name_matches("Amrit", "raj"));
	}

	#[test]
	fn dates_keep_the_day() {
		assert_eq!(date_label(Some("2024-05-02T10:00:00.123")), "2024-05-02");
		assert_eq!(date_label(Some("2024-05-02 10:00:00")), "2024-05-02");
		assert_eq!(date_label(Some("")), "N/A");
		assert_eq!(date_label(None), "N/A");
	}

	#[test]
	fn ids_must_be_numeric() {
		assert_eq!(parse_id(Some("42".into())), Some(42));
		assert_eq!(parse_id(Some("abc".into())), None);
		assert_eq!(parse_id(None), None);
	}
}
