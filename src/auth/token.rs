//! Opaque bearer token wrapper that redacts sensitive material.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const FINGERPRINT_LEN: usize = 12;

/// Redacted bearer token keeping the credential out of logs.
///
/// The client never inspects token structure; validity is only ever decided by the
/// remote validation endpoint.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// `Authorization` header value for this token.
	pub fn header_value(&self) -> String {
		format!("Bearer {}", self.0)
	}

	/// Short, non-reversible tag for correlating a token across log lines.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(self.0.as_bytes());
		let mut encoded = STANDARD_NO_PAD.encode(digest);

		encoded.truncate(FINGERPRINT_LEN);

		encoded
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = BearerToken::new("eyJhbGciOiJIUzI1NiJ9.payload.sig");

		assert_eq!(format!("{token:?}"), "BearerToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.header_value(), "Bearer eyJhbGciOiJIUzI1NiJ9.payload.sig");
	}

	#[test]
	fn fingerprint_is_stable_and_short() {
		let a = BearerToken::new("token-a");
		let b = BearerToken::new("token-b");

		assert_eq!(a.fingerprint(), BearerToken::new("token-a").fingerprint());
		assert_eq!(a.fingerprint().len(), FINGERPRINT_LEN);
		assert_ne!(a.fingerprint(), b.fingerprint());
		assert!(!a.fingerprint().contains("token-a"));
	}
}
