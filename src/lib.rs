//! Authenticated task API client: durable bearer-token storage, token issuance, and a
//! request protocol that recovers once from an authentication failure before surfacing it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod issuer;
pub mod obs;
pub mod store;
pub mod task;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and client builders shared by unit and integration tests.
	//!
	//! The builders report configuration problems as [`ConfigError`] instead of panicking, so
	//! they are safe to call from any build that enables `reqwest`.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::TaskClient,
		config::ClientConfig,
		error::ConfigError,
		http::ReqwestHttpClient,
		store::{MemoryStore, StoredSession, TokenStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = TaskClient<ReqwestHttpClient>;

	/// Builds a [`ClientConfig`] pointing at the provided mock server base URL.
	pub fn test_config(base_url: &str) -> Result<ClientConfig, ConfigError> {
		ClientConfig::builder().base_url_str(base_url)?.build()
	}

	/// Constructs a [`TaskClient`] backed by an in-memory store seeded with `session` and the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		session: StoredSession,
	) -> Result<(ReqwestTestClient, Arc<MemoryStore>), ConfigError> {
		let store_backend = Arc::new(MemoryStore::with_session(session));
		let store: Arc<dyn TokenStore> = store_backend.clone();
		let client = TaskClient::with_http_client(
			test_config(base_url)?,
			store,
			ReqwestHttpClient::default(),
		);

		Ok((client, store_backend))
	}

}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
