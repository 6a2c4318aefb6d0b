//! Identity material used to request bearer tokens.
//!
//! Every caller that needs an [`Identity`] (the request protocol, its recovery pass, and the
//! session helpers) goes through [`resolve_identity`], so the fallback rules for partial
//! local state live in exactly one place.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, store::StoredSession};

const USER_ID_PREFIX: &str = "user-";
const PLACEHOLDER_DOMAIN: &str = "example.com";

/// The `(user id, email, display name)` tuple exchanged for a bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
	/// Stable user identifier.
	pub user_id: String,
	/// Account email.
	pub email: String,
	/// Display name sent to the token endpoint as `name`.
	#[serde(rename = "name")]
	pub display_name: String,
}
impl Identity {
	/// Builds an identity from explicit parts.
	pub fn new(
		user_id: impl Into<String>,
		email: impl Into<String>,
		display_name: impl Into<String>,
	) -> Self {
		Self { user_id: user_id.into(), email: email.into(), display_name: display_name.into() }
	}

	/// Builds the identity for an email address using the deterministic user id mapping.
	pub fn from_email(email: &str) -> Self {
		let email = email.trim();

		Self::new(derive_user_id(email), email, display_name_for(email))
	}

	/// Builds an identity for a known user id whose email was lost.
	pub fn from_user_id(user_id: &str) -> Self {
		let user_id = user_id.trim();

		Self::new(user_id, format!("{user_id}@{PLACEHOLDER_DOMAIN}"), format!("User {user_id}"))
	}

	/// Builds a throwaway identity keyed by the provided instant.
	///
	/// Only the recovery pass uses this, when the store holds no identity material at all.
	pub fn synthetic(now: OffsetDateTime) -> Self {
		let millis = now.unix_timestamp_nanos() / 1_000_000;

		Self::from_user_id(&format!("{USER_ID_PREFIX}{millis}"))
	}
}

/// Maps an email to its stable user id (`user-` + alphanumeric base64 of the address).
pub fn derive_user_id(email: &str) -> String {
	let encoded = STANDARD.encode(email.as_bytes());
	let mut id = String::with_capacity(USER_ID_PREFIX.len() + encoded.len());

	id.push_str(USER_ID_PREFIX);
	id.extend(encoded.chars().filter(char::is_ascii_alphanumeric));

	id
}

/// Local part of an email address, used as the default display name.
pub fn display_name_for(email: &str) -> String {
	email.split('@').next().unwrap_or_default().to_owned()
}

/// Resolves the identity implied by persisted session state, if any.
///
/// - user id + email: both kept, display name from the email
/// - email only: user id derived from the email
/// - user id only: placeholder email under `example.com`
/// - neither: `None`
pub fn resolve_identity(stored: &StoredSession) -> Option<Identity> {
	match (stored.user_id.as_deref(), stored.email.as_deref()) {
		(Some(user_id), Some(email)) => Some(Identity::new(user_id, email, display_name_for(email))),
		(None, Some(email)) => Some(Identity::from_email(email)),
		(Some(user_id), None) => Some(Identity::from_user_id(user_id)),
		(None, None) => None,
	}
}
