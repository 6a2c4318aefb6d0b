//! Client configuration: the task API base URL and how endpoint URLs hang off it.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "TASK_API_BASE_URL";
/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL every endpoint path is appended to (e.g. `https://host/api`).
	pub base_url: Url,
}
impl ClientConfig {
	/// Creates a new builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Reads the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		let raw = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());

		Self::builder().base_url_str(&raw)?.build()
	}

	/// Builds an endpoint URL by appending path segments to the base URL.
	///
	/// Segments are percent-encoded individually, so user ids can never escape their
	/// path position.
	pub fn endpoint<I, S>(&self, segments: I) -> Url
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut url = self.base_url.clone();

		// Validated in `build`: the base URL always supports path segments.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty();

			for segment in segments {
				path.push(segment.as_ref());
			}
		}

		url
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Base URL for the task API.
	pub base_url: Option<Url>,
}
impl ClientConfigBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the base URL.
	pub fn base_url_str(self, raw: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(self.base_url(url))
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		validate_base_url(&base_url)?;

		Ok(ClientConfig { base_url })
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { scheme: url.scheme().to_owned() });
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ConfigError::UnexpectedQuery { url: url.to_string() });
	}

	Ok(())
}
