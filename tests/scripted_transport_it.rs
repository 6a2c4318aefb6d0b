// std
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use parking_lot::Mutex;
// self
use task_session_client::{
	auth::BearerToken,
	client::TaskClient,
	config::ClientConfig,
	error::{Error, TransportError},
	http::{ApiRequest, ApiResponse, HttpTransport, Method, TransportFuture},
	store::{FileStore, MemoryStore, StoredSession, TokenStore},
	task::TaskQuery,
};

type Step = Result<ApiResponse, TransportError>;

/// Replays scripted responses in order and records every request it receives.
#[derive(Default)]
struct ScriptedTransport {
	steps: Mutex<VecDeque<Step>>,
	seen: Mutex<Vec<ApiRequest>>,
}
impl ScriptedTransport {
	fn new(steps: impl IntoIterator<Item = Step>) -> Self {
		Self { steps: Mutex::new(steps.into_iter().collect()), seen: Default::default() }
	}

	fn seen(&self) -> Vec<(Method, String, Option<String>)> {
		self.seen
			.lock()
			.iter()
			.map(|r| {
				(r.method, r.url.path().to_owned(), r.bearer.as_ref().map(|t| t.expose().to_owned()))
			})
			.collect()
	}
}
impl HttpTransport for ScriptedTransport {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_, ApiResponse> {
		self.seen.lock().push(request);

		let step = self.steps.lock().pop_front().unwrap_or_else(|| Ok(ApiResponse::new(599, "")));

		Box::pin(async move { step })
	}
}

/// Counts how many times the transport was called without ever answering.
#[derive(Default)]
struct Refusing(AtomicUsize);
impl HttpTransport for Refusing {
	fn send(&self, _request: ApiRequest) -> TransportFuture<'_, ApiResponse> {
		self.0.fetch_add(1, Ordering::SeqCst);

		Box::pin(async {
			Err(TransportError::Io(std::io::Error::new(
				std::io::ErrorKind::ConnectionRefused,
				"connection refused",
			)))
		})
	}
}

fn ok(body: &str) -> Step {
	Ok(ApiResponse::new(200, body.as_bytes().to_vec()))
}

fn status(code: u16, body: &str) -> Step {
	Ok(ApiResponse::new(code, body.as_bytes().to_vec()))
}

fn refused() -> Step {
	Err(TransportError::Io(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused")))
}

fn config() -> ClientConfig {
	ClientConfig::builder()
		.base_url_str("https://tasks.example.com/api")
		.expect("Fixture URL should parse.")
		.build()
		.expect("Fixture URL should validate.")
}

#[tokio::test]
async fn token_without_identity_recovers_with_synthetic_identity() {
	let transport = Arc::new(ScriptedTransport::new([
		status(401, r#"{"detail":"Invalid token"}"#),
		status(401, r#"{"detail":"Invalid token"}"#),
		ok(r#"{"success":true,"token":"synthetic-token"}"#),
		ok(r#"{"success":true,"data":[]}"#),
	]));
	let store = Arc::new(MemoryStore::with_session(StoredSession {
		token: Some(BearerToken::new("orphan")),
		..Default::default()
	}));
	let client: TaskClient<ScriptedTransport> =
		TaskClient::with_http_client(
			config(),
			store.clone() as Arc<dyn TokenStore>,
			transport.clone(),
		);
	let tasks = client
		.list("user-any", &TaskQuery::default())
		.await
		.expect("Synthetic identity should allow recovery.");

	assert!(tasks.is_empty());

	let seen = transport.seen();

	assert_eq!(seen.len(), 4);
	assert_eq!(
		seen[0],
		(Method::Get, String::from("/api/user-any/tasks"), Some(String::from("orphan")))
	);
	assert_eq!(seen[1].1, "/api/auth/validate-token");
	assert_eq!(seen[2].1, "/api/auth/generate-token");
	assert_eq!(
		seen[3],
		(Method::Get, String::from("/api/user-any/tasks"), Some(String::from("synthetic-token")))
	);

	let snapshot = store.snapshot();
	let user_id = snapshot.user_id.expect("Synthetic user id should be persisted.");

	assert!(user_id.starts_with("user-"));
	assert_eq!(snapshot.email, Some(format!("{user_id}@example.com")));
	assert_eq!(snapshot.token.as_ref().map(BearerToken::expose), Some("synthetic-token"));
}

#[tokio::test]
async fn unreachable_validation_counts_as_rejection() {
	let transport = Arc::new(ScriptedTransport::new([
		status(403, r#"{"detail":"Token has expired"}"#),
		refused(),
		ok(r#"{"success":true,"token":"second"}"#),
		ok(r#"{"success":true,"message":"Task deleted successfully"}"#),
	]));
	let store = Arc::new(MemoryStore::with_session(StoredSession::new(
		&BearerToken::new("first"),
		"user-9",
		"nine@tasks.dev",
	)));
	let client: TaskClient<ScriptedTransport> =
		TaskClient::with_http_client(
			config(),
			store.clone() as Arc<dyn TokenStore>,
			transport.clone(),
		);
	let ack = client.delete("user-9", 12).await.expect("Retry after re-issue should succeed.");

	assert!(ack.success);
	assert_eq!(transport.seen()[3].2.as_deref(), Some("second"));
	assert_eq!(store.user_id().as_deref(), Some("user-9"));
}

#[tokio::test]
async fn network_failure_on_first_attempt_skips_recovery() {
	let transport = Arc::new(ScriptedTransport::new([refused()]));
	let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::with_session(StoredSession::new(
		&BearerToken::new("tok"),
		"user-1",
		"one@tasks.dev",
	)));
	let client: TaskClient<ScriptedTransport> =
		TaskClient::with_http_client(config(), store, transport.clone());
	let err = client.get("user-1", 1).await.expect_err("Network failures must surface.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(transport.seen().len(), 1);
	assert_eq!(client.metrics.recoveries(), 0);
}

#[tokio::test]
async fn empty_store_never_touches_transport() {
	let transport = Arc::new(Refusing::default());
	let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());
	let client: TaskClient<Refusing> = TaskClient::with_http_client(config(), store, transport.clone());
	let err = client
		.list("user-1", &TaskQuery::default())
		.await
		.expect_err("Missing identity must fail before any call.");

	assert!(matches!(err, Error::AuthenticationRequired));
	assert_eq!(transport.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn file_store_persists_issued_token() {
	let dir = std::env::temp_dir().join(format!("task-session-client-it-{}", std::process::id()));
	let path = dir.join("session.json");

	std::fs::create_dir_all(&dir).expect("Temp directory should be creatable.");
	std::fs::write(&path, r#"{"user_id":"user-f","user_email":"f@tasks.dev"}"#)
		.expect("Seed file should be writable.");

	let transport = Arc::new(ScriptedTransport::new([
		ok(r#"{"success":true,"token":"persisted"}"#),
		ok(r#"{"success":true,"data":{"id":5,"user_id":"user-f","title":"Backup","created_at":"2026-01-01T00:00:00","updated_at":"2026-01-01T00:00:00"}}"#),
	]));
	let store: Arc<dyn TokenStore> =
		Arc::new(FileStore::open(&path).expect("Seeded file store should open."));
	let client: TaskClient<ScriptedTransport> =
		TaskClient::with_http_client(config(), store, transport);
	let task = client.get("user-f", 5).await.expect("Fetching after issuance should succeed.");

	assert_eq!(task.title, "Backup");

	let reopened = FileStore::open(&path).expect("File store should reopen after issuance.");

	assert_eq!(reopened.token().as_ref().map(BearerToken::expose), Some("persisted"));
	assert_eq!(reopened.user_id().as_deref(), Some("user-f"));
	assert_eq!(reopened.email().as_deref(), Some("f@tasks.dev"));

	let _ = std::fs::remove_dir_all(&dir);
}
