//! Backend client errors.

use thiserror::Error;

/// Result type for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Why a backend call failed.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never got a reply.
	#[error("network error: {0}")]
	Http(#[from] reqwest::Error),

	/// The reply body was not the JSON we expected.
	#[error("invalid response: {0}")]
	Json(#[from] serde_json::Error),

	/// Non-2xx reply. Displays the backend's own message when it sent one.
	#[error("{}", status_message(.status, .body))]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body as received.
		body: String,
	},
}

fn status_message(status: &u16, body: &str) -> String {
	let body = body.trim();
	if body.is_empty() {
		format!("request failed with status {status}")
	} else {
		body.to_owned()
	}
}
