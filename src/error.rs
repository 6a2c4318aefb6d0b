//! Client-level error types shared across the request protocol, issuer, and stores.

// self
use crate::{_prelude::*, api::ValidationIssue};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// No identity material is available, or a token could not be obtained for it.
	#[error("Authentication required. Please sign in.")]
	AuthenticationRequired,
	/// Token endpoint rejected the issuance request.
	#[error("Token issuance failed: {message}")]
	Issuance {
		/// Remote message or a generic network-failure message.
		message: String,
	},
	/// API rejected the request with structured per-field issues.
	#[error("{message}")]
	Validation {
		/// Aggregated message listing every issue.
		message: String,
		/// Individual issues as reported by the API.
		issues: Vec<ValidationIssue>,
	},
	/// API returned a non-2xx status without structured detail.
	#[error("{message}")]
	RequestFailed {
		/// HTTP status code.
		status: u16,
		/// Remote message or a generic status message.
		message: String,
	},
	/// Local credential checks rejected a sign-in or sign-up attempt.
	#[error("{reason}")]
	InvalidCredentials {
		/// Human-readable reason.
		reason: String,
	},
	/// A successful response body did not match the expected shape.
	#[error("API returned a malformed response body.")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl Error {
	/// HTTP status code attached to the error, when the API produced one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status, .. } => Some(*status),
			Self::Decode { status, .. } => *status,
			_ => None,
		}
	}

	/// Returns true when the API rejected the caller's credentials (401/403).
	pub fn is_auth_rejection(&self) -> bool {
		matches!(self.status(), Some(401 | 403))
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL could not be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http or https.
	#[error("Base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL cannot be used as a base for API paths: {url}.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Base URL carries a query string or fragment.
	#[error("Base URL must not carry a query or fragment: {url}.")]
	UnexpectedQuery {
		/// Offending URL.
		url: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the task API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the task API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
