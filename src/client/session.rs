//! Session bootstrap and account helpers sharing the request protocol's identity rules.

// self
use crate::{
	_prelude::*,
	auth::{self, Identity},
	client::TaskClient,
	http::HttpTransport,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in user profile as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User id.
	pub id: String,
	/// Account email.
	pub email: String,
	/// Display name.
	pub name: String,
}
impl From<Identity> for User {
	fn from(identity: Identity) -> Self {
		Self { id: identity.user_id, email: identity.email, name: identity.display_name }
	}
}

impl<C> TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Signs in with an email and password, persisting a freshly issued token.
	pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
		if email.trim().is_empty() || password.is_empty() {
			return Err(Error::InvalidCredentials { reason: "Invalid credentials".into() });
		}

		self.establish(email, "sign_in").await
	}

	/// Registers with an email and password, persisting a freshly issued token.
	pub async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
		if email.trim().is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
			return Err(Error::InvalidCredentials { reason: "Invalid registration data".into() });
		}

		self.establish(email, "sign_up").await
	}

	/// Clears the stored session.
	pub fn sign_out(&self) -> Result<()> {
		self.store.clear()?;

		Ok(())
	}

	/// Restores the stored session if the backend still accepts its token.
	///
	/// An invalid token clears the store. Missing token or user id yields `Ok(None)`
	/// without any network call.
	pub async fn restore_session(&self) -> Result<Option<User>> {
		const KIND: CallKind = CallKind::Session;

		let stored = self.store.snapshot();
		let (Some(token), Some(_)) = (stored.token.as_ref(), stored.user_id.as_deref()) else {
			return Ok(None);
		};
		let span = CallSpan::new(KIND, "restore_session");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let validation = span.instrument(self.issuer.validate_token(token)).await;

		if !validation.success {
			self.store.clear()?;
			obs::record_call_outcome(KIND, CallOutcome::Failure);

			return Ok(None);
		}

		obs::record_call_outcome(KIND, CallOutcome::Success);

		Ok(auth::resolve_identity(&stored).map(User::from))
	}

	/// Returns the user implied by the stored session, without contacting the backend.
	pub fn current_user(&self) -> Option<User> {
		auth::resolve_identity(&self.store.snapshot()).map(User::from)
	}

	async fn establish(&self, email: &str, stage: &'static str) -> Result<User> {
		const KIND: CallKind = CallKind::Session;

		let span = CallSpan::new(KIND, stage);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let identity = Identity::from_email(email);
				let token = self.issuer.issue_token(&identity).await?;

				self.store.put(&token, &identity.user_id, &identity.email)?;

				Ok::<_, Error>(User::from(identity))
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
