//! The authenticated request protocol.
//!
//! Every call walks the same states:
//!
//! 1. Acquire a token: use the stored one, or resolve an identity from the stored session and
//!    issue a fresh token. With no identity material, or when issuance fails, the call ends with
//!    [`Error::AuthenticationRequired`] before any task request is sent.
//! 2. Send the request with `Authorization: Bearer <token>`.
//! 3. On 401/403, run a single recovery pass: validate the stored token; if the backend rejects
//!    it, clear the store, re-issue for the resolved (or synthetic) identity, persist, and resend
//!    once. Any failure inside the pass, or a failed resend, surfaces the first-attempt error.
//! 4. Map other non-2xx responses through [`ErrorPayload`]; decode 2xx bodies as JSON.

// self
use crate::{
	_prelude::*,
	api::ErrorPayload,
	auth::{self, BearerToken, Identity},
	client::TaskClient,
	http::{ApiRequest, ApiResponse, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<C> TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Sends `request` with a bearer token attached and decodes the JSON response.
	///
	/// Any bearer already set on `request` is replaced by the token this call acquires.
	pub async fn execute<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "execute");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span
			.instrument(async move {
				let token = self.acquire_token().await?;
				let request = request.with_bearer(token);
				let first = self.http_client.send(request.clone()).await?;
				let response = if first.is_auth_failure() {
					match self.recover(&request).await {
						Ok(Some(retried)) if retried.is_success() => retried,
						Ok(Some(retried)) => {
							obs::note_swallowed(KIND, "retry", &retried.status);

							return Err(response_error(&first));
						},
						Ok(None) => return Err(response_error(&first)),
						Err(e) => {
							obs::note_swallowed(KIND, "recover", &e);

							return Err(response_error(&first));
						},
					}
				} else {
					first
				};

				if !response.is_success() {
					return Err(response_error(&response));
				}

				response.json::<T>()
			})
			.await;

		match &result {
			Ok(_) => {
				self.metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);
			},
			Err(_) => {
				self.metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		result
	}

	/// Returns the stored token, issuing and persisting one when the store has none.
	pub(crate) async fn acquire_token(&self) -> Result<BearerToken> {
		let stored = self.store.snapshot();

		if let Some(token) = stored.token {
			return Ok(token);
		}

		let identity = auth::resolve_identity(&stored).ok_or(Error::AuthenticationRequired)?;
		let token = self.issuer.issue_token(&identity).await.map_err(|e| {
			obs::note_swallowed(CallKind::Request, "acquire_token", &e);

			Error::AuthenticationRequired
		})?;

		self.store.put(&token, &identity.user_id, &identity.email)?;

		Ok(token)
	}

	/// Single recovery pass after a 401/403. `Ok(None)` means the stored token was either
	/// missing or still accepted by the backend, so there is nothing to retry with.
	async fn recover(&self, request: &ApiRequest) -> Result<Option<ApiResponse>> {
		let stored = self.store.snapshot();
		let Some(current) = stored.token.as_ref() else {
			return Ok(None);
		};

		self.metrics.record_recovery();

		if self.issuer.validate_token(current).await.success {
			return Ok(None);
		}

		obs::note_swallowed(
			CallKind::Request,
			"recover",
			&format!("stored token {} rejected; re-issuing", current.fingerprint()),
		);
		self.store.clear()?;

		let identity = auth::resolve_identity(&stored)
			.unwrap_or_else(|| Identity::synthetic(OffsetDateTime::now_utc()));
		let token = self.issuer.issue_token(&identity).await?;

		self.store.put(&token, &identity.user_id, &identity.email)?;

		let retried = self.http_client.send(request.clone().with_bearer(token)).await?;

		Ok(Some(retried))
	}
}

fn response_error(response: &ApiResponse) -> Error {
	ErrorPayload::parse(&response.body).into_error(response.status)
}
