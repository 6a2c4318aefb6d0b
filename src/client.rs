//! Authenticated task API client.
//!
//! [`TaskClient`] owns the transport, the session store, and a [`TokenIssuer`] sharing the
//! same transport. The store is passed in explicitly: nothing in the client reads ambient
//! state, so every token read and write made by a call goes through the handle supplied at
//! construction time.

mod metrics;
mod request;
mod session;
mod tasks;

pub use metrics::RequestMetrics;
pub use session::User;

// self
use crate::{
	_prelude::*, config::ClientConfig, http::HttpTransport, issuer::TokenIssuer, store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestTaskClient = TaskClient<ReqwestHttpClient>;

/// Issues authenticated task API calls and recovers once from rejected credentials.
///
/// Cloning is cheap; clones share the transport, store, and metrics. Concurrent calls
/// may observe each other's store writes.
pub struct TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Session store holding the bearer token and identity material.
	pub store: Arc<dyn TokenStore>,
	/// Validated configuration.
	pub config: ClientConfig,
	/// Token issuer sharing the transport and base URL.
	pub issuer: TokenIssuer<C>,
	/// Shared counters for request outcomes.
	pub metrics: Arc<RequestMetrics>,
}
impl<C> TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		store: Arc<dyn TokenStore>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let http_client = http_client.into();
		let issuer = TokenIssuer::new(config.clone(), http_client.clone());

		Self { http_client, store, config, issuer, metrics: Default::default() }
	}
}
#[cfg(feature = "reqwest")]
impl TaskClient<ReqwestHttpClient> {
	/// Creates a client with its own reqwest-backed transport.
	pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
		Self::with_http_client(config, store, ReqwestHttpClient::default())
	}
}
impl<C> Clone for TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			issuer: self.issuer.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TaskClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("token_present", &self.store.is_present())
			.finish()
	}
}
