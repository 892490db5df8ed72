//! Where the VirsaAI backend lives.

const DEFAULT_API_ROOT: &str = "http://localhost:8000";

/// Backend location, shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	root: String,
}

impl ApiConfig {
	/// Use `root` as the backend base URL. Trailing slashes are dropped.
	pub fn new(root: impl Into<String>) -> Self {
		let root = root.into();
		Self {
			root: root.trim_end_matches('/').to_owned(),
		}
	}

	/// Base URL baked in at build time through `VIRSA_API_ROOT`, falling back
	/// to a local development backend.
	pub fn from_build_env() -> Self {
		Self::new(
			option_env!("VIRSA_API_ROOT")
				.filter(|s| !s.trim().is_empty())
				.unwrap_or(DEFAULT_API_ROOT),
		)
	}

	/// Base URL without a trailing slash.
	pub fn root(&self) -> &str {
		&self.root
	}

	/// Absolute URL of a backend path such as `/family`.
	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.root, path.trim_start_matches('/'))
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::from_build_env()
	}
}
