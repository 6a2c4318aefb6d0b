//! Typed task operations built on [`TaskClient::execute`].

// self
use crate::{
	_prelude::*,
	api::{Acknowledgement, ApiEnvelope},
	client::TaskClient,
	error::ConfigError,
	http::{ApiRequest, HttpTransport, Method},
	task::{Completion, Task, TaskDraft, TaskPatch, TaskQuery},
};

#[derive(Serialize)]
struct ProfileImage<'a> {
	image: &'a str,
}

impl<C> TaskClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Lists the user's tasks, applying the query's filters, sorting, and paging.
	pub async fn list(&self, user_id: &str, query: &TaskQuery) -> Result<Vec<Task>> {
		let mut url = self.tasks_url(user_id, None, None);

		query.apply(&mut url);

		self.data(ApiRequest::new(Method::Get, url)).await
	}

	/// Creates a task. A bare due date is widened to midnight before sending.
	pub async fn create(&self, user_id: &str, draft: TaskDraft) -> Result<Task> {
		let url = self.tasks_url(user_id, None, None);
		let request = ApiRequest::new(Method::Post, url)
			.with_json(&draft.normalized())
			.map_err(ConfigError::from)?;

		self.data(request).await
	}

	/// Fetches a single task.
	pub async fn get(&self, user_id: &str, task_id: i64) -> Result<Task> {
		let url = self.tasks_url(user_id, Some(task_id), None);

		self.data(ApiRequest::new(Method::Get, url)).await
	}

	/// Updates a task. A bare due date is widened to midnight before sending.
	pub async fn update(&self, user_id: &str, task_id: i64, patch: TaskPatch) -> Result<Task> {
		let url = self.tasks_url(user_id, Some(task_id), None);
		let request = ApiRequest::new(Method::Put, url)
			.with_json(&patch.normalized())
			.map_err(ConfigError::from)?;

		self.data(request).await
	}

	/// Deletes a task.
	pub async fn delete(&self, user_id: &str, task_id: i64) -> Result<Acknowledgement> {
		let url = self.tasks_url(user_id, Some(task_id), None);

		self.execute(ApiRequest::new(Method::Delete, url)).await
	}

	/// Sets the completion state of a task.
	pub async fn toggle_complete(&self, user_id: &str, task_id: i64, completed: bool) -> Result<Task> {
		let url = self.tasks_url(user_id, Some(task_id), Some("complete"));
		let request = ApiRequest::new(Method::Patch, url)
			.with_json(&Completion { completed })
			.map_err(ConfigError::from)?;

		self.data(request).await
	}

	/// Replaces the user's profile image (data URL or remote URL).
	pub async fn update_profile_image(&self, user_id: &str, image: &str) -> Result<Acknowledgement> {
		let url = self.config.endpoint([user_id, "profile", "image"]);
		let request = ApiRequest::new(Method::Put, url)
			.with_json(&ProfileImage { image })
			.map_err(ConfigError::from)?;

		self.execute(request).await
	}

	fn tasks_url(&self, user_id: &str, task_id: Option<i64>, action: Option<&str>) -> Url {
		let id = task_id.map(|id| id.to_string());
		let segments = [Some(user_id), Some("tasks"), id.as_deref(), action];

		self.config.endpoint(segments.into_iter().flatten())
	}

	async fn data<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let envelope: ApiEnvelope<T> = self.execute(request).await?;

		Ok(envelope.data)
	}
}
