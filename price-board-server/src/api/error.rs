use thiserror::Error;

/// Failure of a single provider request. Callers turn it into an unavailable row; it
/// never aborts a poll cycle.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("Invalid URL {url}: {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error("Failed to send request to {url}: {reason}")]
	Request { url: String, reason: String },

	#[error("{url} answered {status}: {body}")]
	Status { url: String, status: u16, body: String },

	#[error("Could not decode response from {url}: {reason}")]
	Decode { url: String, reason: String },
}
