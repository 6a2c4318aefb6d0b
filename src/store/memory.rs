//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	store::{StoreError, StoredSession, TokenStore},
};

/// Thread-safe storage backend that keeps the session in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<StoredSession>>);
impl MemoryStore {
	/// Creates a store pre-seeded with the provided session entries.
	pub fn with_session(session: StoredSession) -> Self {
		Self(Arc::new(RwLock::new(session.normalized())))
	}
}
impl TokenStore for MemoryStore {
	fn snapshot(&self) -> StoredSession {
		self.0.read().clone()
	}

	fn put(&self, token: &BearerToken, user_id: &str, email: &str) -> Result<(), StoreError> {
		*self.0.write() = StoredSession::new(token, user_id, email);

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		*self.0.write() = StoredSession::default();

		Ok(())
	}
}
