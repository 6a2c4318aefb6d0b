#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use task_session_client::{
	_preludet::*,
	auth::BearerToken,
	store::StoredSession,
	task::{Category, Priority, SortKey, StatusFilter, TaskDraft, TaskPatch, TaskQuery},
};

const USER_ID: &str = "user-ops";
const EMAIL: &str = "ops@tasks.dev";
const BEARER: &str = "Bearer ops-token";

fn client(server: &MockServer) -> ReqwestTestClient {
	let session = StoredSession::new(&BearerToken::new("ops-token"), USER_ID, EMAIL);

	build_reqwest_test_client(&server.url("/api"), session)
		.expect("Test client should build.").0
}

fn task_json(id: i64, title: &str, completed: bool) -> serde_json::Value {
	json!({
		"id": id,
		"user_id": USER_ID,
		"title": title,
		"description": "from the mock",
		"completed": completed,
		"priority": "high",
		"category": "work",
		"due_date": "2026-03-01T00:00:00",
		"created_at": "2026-02-01T09:30:00",
		"updated_at": "2026-02-02T10:00:00",
	})
}

#[tokio::test]
async fn list_sends_filters_sorting_and_paging() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(format!("/api/{USER_ID}/tasks"))
				.header("authorization", BEARER)
				.query_param("status", "pending")
				.query_param("priority_filter", "high")
				.query_param("category_filter", "work")
				.query_param("sort", "due_date")
				.query_param("page", "2")
				.query_param("limit", "25");
			then.status(200).json_body(json!({
				"success": true,
				"data": [task_json(7, "Ship release", false), task_json(8, "Write notes", false)],
			}));
		})
		.await;
	let query = TaskQuery::default()
		.status(StatusFilter::Pending)
		.priority(Priority::High)
		.category(Category::Work)
		.sort(SortKey::DueDate)
		.page(2, 25);
	let tasks = client.list(USER_ID, &query).await.expect("Filtered listing should succeed.");

	list.assert_async().await;

	assert_eq!(tasks.len(), 2);
	assert_eq!(tasks[0].priority, Priority::High);
	assert_eq!(tasks[1].category, Category::Work);
}

#[tokio::test]
async fn create_widens_bare_due_date_to_midnight() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(format!("/api/{USER_ID}/tasks"))
				.header("authorization", BEARER)
				.json_body(json!({
					"title": "Ship release",
					"priority": "high",
					"category": "work",
					"due_date": "2026-03-01T00:00:00",
				}));
			then.status(201).json_body(json!({ "success": true, "data": task_json(7, "Ship release", false) }));
		})
		.await;
	let draft = TaskDraft::new("Ship release")
		.priority(Priority::High)
		.category(Category::Work)
		.due_date("2026-03-01");
	let task = client.create(USER_ID, draft).await.expect("Creating a task should succeed.");

	create.assert_async().await;

	assert_eq!(task.id, 7);
	assert_eq!(task.due_date.as_deref(), Some("2026-03-01T00:00:00"));
}

#[tokio::test]
async fn update_keeps_full_timestamps_untouched() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(format!("/api/{USER_ID}/tasks/7"))
				.json_body(json!({ "title": "Ship release v2", "due_date": "2026-03-02T17:45:00" }));
			then.status(200).json_body(json!({ "success": true, "data": task_json(7, "Ship release v2", false) }));
		})
		.await;
	let patch = TaskPatch {
		title: Some("Ship release v2".into()),
		due_date: Some("2026-03-02T17:45:00".into()),
		..Default::default()
	};
	let task = client.update(USER_ID, 7, patch).await.expect("Updating a task should succeed.");

	update.assert_async().await;

	assert_eq!(task.title, "Ship release v2");
}

#[tokio::test]
async fn toggle_complete_patches_completion_flag() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let toggle = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path(format!("/api/{USER_ID}/tasks/7/complete"))
				.header("authorization", BEARER)
				.json_body(json!({ "completed": true }));
			then.status(200).json_body(json!({ "success": true, "data": task_json(7, "Ship release", true) }));
		})
		.await;
	let task =
		client.toggle_complete(USER_ID, 7, true).await.expect("Toggling completion should succeed.");

	toggle.assert_async().await;

	assert!(task.completed);
}

#[tokio::test]
async fn delete_and_profile_image_return_acknowledgements() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path(format!("/api/{USER_ID}/tasks/7"));
			then.status(200).json_body(json!({ "success": true, "message": "Task deleted successfully" }));
		})
		.await;
	let image = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(format!("/api/{USER_ID}/profile/image"))
				.json_body(json!({ "image": "https://cdn.tasks.dev/ops.png" }));
			then.status(200).json_body(json!({ "success": true, "message": "Profile image updated" }));
		})
		.await;
	let deleted = client.delete(USER_ID, 7).await.expect("Deleting a task should succeed.");
	let updated = client
		.update_profile_image(USER_ID, "https://cdn.tasks.dev/ops.png")
		.await
		.expect("Updating the profile image should succeed.");

	delete.assert_async().await;
	image.assert_async().await;

	assert!(deleted.success);
	assert_eq!(deleted.message.as_deref(), Some("Task deleted successfully"));
	assert!(updated.success);
}

#[tokio::test]
async fn malformed_success_body_reports_decode_error() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let _get = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/api/{USER_ID}/tasks/3"));
			then.status(200).json_body(json!({ "success": true, "data": { "id": "three" } }));
		})
		.await;
	let err = client.get(USER_ID, 3).await.expect_err("Malformed task bodies should fail decoding.");

	assert!(matches!(err, Error::Decode { status: Some(200), .. }));
}
