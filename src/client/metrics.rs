// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for authenticated requests.
#[derive(Debug, Default)]
pub struct RequestMetrics {
	attempts: AtomicU64,
	recoveries: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
}
impl RequestMetrics {
	/// Returns the total number of requests started.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of recovery passes entered after a 401/403.
	pub fn recoveries(&self) -> u64 {
		self.recoveries.load(Ordering::Relaxed)
	}

	/// Returns the number of requests that produced a 2xx response.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of requests that failed.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_recovery(&self) {
		self.recoveries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
