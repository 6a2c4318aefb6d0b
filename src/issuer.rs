//! Token issuance and validation against the remote auth endpoints.
//!
//! [`TokenIssuer::issue_token`] exchanges an [`Identity`] for a signed bearer token and
//! reports every failure as [`Error::Issuance`]. [`TokenIssuer::validate_token`] is a pure
//! boolean probe: network failures, non-2xx statuses, and unreadable bodies all collapse
//! into `success = false` so the recovery pass can always make a decision.

// self
use crate::{
	_prelude::*,
	api::ErrorPayload,
	auth::{BearerToken, Identity},
	config::ClientConfig,
	http::{ApiRequest, HttpTransport, Method},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Result of probing a token against the validation endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidation {
	/// Whether the backend accepted the token.
	#[serde(default)]
	pub success: bool,
	/// Subject echoed by the backend, when accepted.
	#[serde(default)]
	pub user_id: Option<String>,
	/// Email claim echoed by the backend, when accepted.
	#[serde(default)]
	pub email: Option<String>,
	/// Name claim echoed by the backend, when accepted.
	#[serde(default)]
	pub name: Option<String>,
}
impl TokenValidation {
	/// Rejected probe with no claims.
	pub fn rejected() -> Self {
		Self::default()
	}
}

#[derive(Debug, Deserialize)]
struct IssuedToken {
	#[serde(default)]
	success: bool,
	#[serde(default)]
	token: Option<String>,
}

#[derive(Serialize)]
struct ValidateBody<'a> {
	token: &'a str,
}

/// Issues and validates bearer tokens over a shared [`HttpTransport`].
pub struct TokenIssuer<C>
where
	C: ?Sized + HttpTransport,
{
	http_client: Arc<C>,
	config: ClientConfig,
}
impl<C> TokenIssuer<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates an issuer for the configured base URL.
	pub fn new(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Exchanges `identity` for a bearer token.
	pub async fn issue_token(&self, identity: &Identity) -> Result<BearerToken> {
		const KIND: CallKind = CallKind::Issue;

		let span = CallSpan::new(KIND, "issue_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoint(["auth", "generate-token"]);
				let request = ApiRequest::new(Method::Post, url)
					.with_json(identity)
					.map_err(|e| Error::Issuance { message: format!("Invalid identity: {e}") })?;
				let response = self.http_client.send(request).await.map_err(|e| {
					Error::Issuance {
						message: format!("Network error while requesting a token: {e}"),
					}
				})?;

				if !response.is_success() {
					let payload = ErrorPayload::parse(&response.body);
					let message = payload.message().map(ToOwned::to_owned).unwrap_or_else(|| {
						format!("Token generation failed with status {}", response.status)
					});

					return Err(Error::Issuance { message });
				}

				let issued: IssuedToken = response.json().map_err(|e| Error::Issuance {
					message: format!("Token endpoint returned an unreadable body: {e}"),
				})?;

				match issued.token.filter(|t| !t.trim().is_empty()) {
					Some(token) if issued.success => Ok(BearerToken::new(token)),
					_ => Err(Error::Issuance {
						message: "Token endpoint did not report success".into(),
					}),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Probes `token` against the validation endpoint. Never fails.
	pub async fn validate_token(&self, token: &BearerToken) -> TokenValidation {
		const KIND: CallKind = CallKind::Validate;

		let span = CallSpan::new(KIND, "validate_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoint(["auth", "validate-token"]);
				let request = ApiRequest::new(Method::Post, url)
					.with_json(&ValidateBody { token: token.expose() })
					.map_err(|e| Error::from(crate::error::ConfigError::from(e)))?;
				let response = self.http_client.send(request).await?;

				if !response.is_success() {
					return Ok(TokenValidation::rejected());
				}

				response.json::<TokenValidation>()
			})
			.await;

		match result {
			Ok(validation) => {
				let outcome =
					if validation.success { CallOutcome::Success } else { CallOutcome::Failure };

				obs::record_call_outcome(KIND, outcome);

				validation
			},
			Err(e) => {
				obs::note_swallowed(KIND, "validate_token", &e);
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				TokenValidation::rejected()
			},
		}
	}
}
impl<C> Clone for TokenIssuer<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for TokenIssuer<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenIssuer").field("base_url", &self.config.base_url.as_str()).finish()
	}
}
