//! Storage contract and built-in backends for the persisted auth session.
//!
//! A session is three key-value entries (`auth_token`, `user_id`, `user_email`). Backends
//! hold them behind a single lock so [`TokenStore::put`] and [`TokenStore::clear`] are
//! observed as one step by every reader.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::BearerToken};

/// Persisted key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Persisted key holding the user id.
pub const USER_ID_KEY: &str = "user_id";
/// Persisted key holding the user email.
pub const EMAIL_KEY: &str = "user_email";

/// Storage backend contract for the client's auth session.
///
/// Reads never fail: a missing or blank entry reads as `None`. Writes report backend
/// failures through [`StoreError`].
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns a consistent snapshot of all three entries.
	fn snapshot(&self) -> StoredSession;

	/// Replaces all three entries in one step.
	fn put(&self, token: &BearerToken, user_id: &str, email: &str) -> Result<(), StoreError>;

	/// Removes all three entries in one step.
	fn clear(&self) -> Result<(), StoreError>;

	/// Returns the stored bearer token, if any.
	fn token(&self) -> Option<BearerToken> {
		self.snapshot().token
	}

	/// Returns the stored user id, if any.
	fn user_id(&self) -> Option<String> {
		self.snapshot().user_id
	}

	/// Returns the stored email, if any.
	fn email(&self) -> Option<String> {
		self.snapshot().email
	}

	/// Returns true when a bearer token is stored.
	fn is_present(&self) -> bool {
		self.token().is_some()
	}
}

/// Snapshot of the persisted session entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
	/// Bearer token (`auth_token`).
	#[serde(rename = "auth_token", default, skip_serializing_if = "Option::is_none")]
	pub token: Option<BearerToken>,
	/// User id (`user_id`).
	#[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// User email (`user_email`).
	#[serde(rename = "user_email", default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}
impl StoredSession {
	/// Builds a complete session from a token and the identity that produced it.
	pub fn new(token: &BearerToken, user_id: &str, email: &str) -> Self {
		Self {
			token: Some(token.clone()),
			user_id: Some(user_id.to_owned()),
			email: Some(email.to_owned()),
		}
		.normalized()
	}

	/// Builds a session carrying identity material only (no token yet).
	pub fn identity_only(user_id: Option<&str>, email: Option<&str>) -> Self {
		Self { token: None, user_id: user_id.map(Into::into), email: email.map(Into::into) }
			.normalized()
	}

	/// Returns true when no entry is present.
	pub fn is_empty(&self) -> bool {
		self.token.is_none() && self.user_id.is_none() && self.email.is_none()
	}

	/// Drops blank entries so they read as absent.
	pub fn normalized(self) -> Self {
		Self {
			token: self.token.filter(|t| !t.expose().trim().is_empty()),
			user_id: non_blank(self.user_id),
			email: non_blank(self.email),
		}
	}
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}
