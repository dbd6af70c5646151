//! Normalized client errors.

use thiserror::Error;
use vitrine_primitives::ErrorBody;

/// Status reported for requests that produced no response in time.
pub const TIMEOUT_STATUS: u16 = 408;

/// Status reported for transport failures (DNS, refused connection, reset).
pub const NETWORK_STATUS: u16 = 0;

/// Errors produced by catalog API calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
	/// The server answered with a non-2xx status.
	#[error("{message}")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Server `message`, or the status reason phrase.
		message: String,
		/// Parsed JSON error body, when the server sent one.
		details: Option<ErrorBody>,
	},
	/// No response arrived within the request timeout.
	#[error("request timed out")]
	Timeout,
	/// The request never reached the server or the connection failed.
	#[error("network error: {0}")]
	Network(String),
	/// The caller cancelled the request. Never surfaced to users.
	#[error("request aborted")]
	Aborted,
	/// A 2xx body did not match the expected shape.
	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),
	/// Any other transport-layer failure, passed through unchanged.
	#[error(transparent)]
	Other(reqwest::Error),
}

impl ClientError {
	/// Numeric status in the normalized taxonomy.
	///
	/// API errors carry the HTTP status, timeouts 408, and transport failures
	/// 0. Aborted, decode, and passthrough errors have no status.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			Self::Timeout => Some(TIMEOUT_STATUS),
			Self::Network(_) => Some(NETWORK_STATUS),
			Self::Aborted | Self::Decode(_) | Self::Other(_) => None,
		}
	}

	/// Server error body, if any.
	pub fn details(&self) -> Option<&ErrorBody> {
		match self {
			Self::Api { details, .. } => details.as_ref(),
			_ => None,
		}
	}

	/// Returns true when the request was cancelled by its caller.
	pub fn is_aborted(&self) -> bool {
		matches!(self, Self::Aborted)
	}

	pub(crate) fn from_transport(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			Self::Timeout
		} else if err.is_connect() || err.is_request() || err.is_body() {
			Self::Network(err.to_string())
		} else {
			Self::Other(err)
		}
	}
}

/// Result type for catalog API calls.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
