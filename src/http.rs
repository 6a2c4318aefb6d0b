//! Transport primitives for task API calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. Requests and
//! responses are plain crate-owned values ([`ApiRequest`], [`ApiResponse`]) so custom
//! transports (or test doubles) never need to touch reqwest types. Transports report
//! every HTTP status as a successful [`ApiResponse`]; only network-level failures are
//! returned as [`TransportError`].

// self
use crate::{_prelude::*, auth::BearerToken, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing task API requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// the request client and the token issuer behind an `Arc`.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request and returns the raw response.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_, ApiResponse>;
}

/// HTTP methods used by the task API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request handed to an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Fully resolved endpoint URL, including any query string.
	pub url: Url,
	/// Bearer token sent in the `Authorization` header, if any.
	pub bearer: Option<BearerToken>,
	/// JSON body bytes, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request without credentials or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, bearer: None, body: None }
	}

	/// Attaches a JSON body.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self, serde_json::Error>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body)?);

		Ok(self)
	}

	/// Attaches (or replaces) the bearer token.
	pub fn with_bearer(mut self, token: BearerToken) -> Self {
		self.bearer = Some(token);

		self
	}
}

/// Raw response captured by an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns true when the API rejected the credentials (401 or 403).
	pub fn is_auth_failure(&self) -> bool {
		matches!(self.status, 401 | 403)
	}

	/// Decodes a JSON body, treating an empty body as `null`.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let bytes: &[u8] =
			if self.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &self.body };
		let mut de = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { source, status: Some(self.status) })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	fn method(method: Method) -> reqwest::Method {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_, ApiResponse> {
		use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client
				.request(Self::method(request.method), request.url)
				.header(ACCEPT, "application/json");

			if let Some(token) = &request.bearer {
				builder = builder.header(AUTHORIZATION, token.header_value());
			}
			if let Some(body) = request.body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
