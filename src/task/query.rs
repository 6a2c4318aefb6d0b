//! Filters, sorting, and paging for the task list endpoint.

// self
use crate::{
	_prelude::*,
	task::{Category, Priority},
};

/// Completion-state filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
	/// Every task.
	#[default]
	All,
	/// Incomplete tasks only.
	Pending,
	/// Completed tasks only.
	Completed,
}
impl StatusFilter {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			StatusFilter::All => "all",
			StatusFilter::Pending => "pending",
			StatusFilter::Completed => "completed",
		}
	}
}

/// Sort key accepted by the list endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
	/// Creation time.
	#[default]
	Created,
	/// Title.
	Title,
	/// Due date.
	DueDate,
	/// Priority.
	Priority,
}
impl SortKey {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			SortKey::Created => "created",
			SortKey::Title => "title",
			SortKey::DueDate => "due_date",
			SortKey::Priority => "priority",
		}
	}
}

/// Query parameters for [`TaskClient::list`](crate::client::TaskClient::list).
///
/// Unset fields are omitted, leaving the server defaults in charge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
	/// Completion-state filter.
	pub status: Option<StatusFilter>,
	/// Priority filter.
	pub priority: Option<Priority>,
	/// Category filter.
	pub category: Option<Category>,
	/// Sort key.
	pub sort: Option<SortKey>,
	/// 1-based page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
}
impl TaskQuery {
	/// Sets the completion-state filter.
	pub fn status(mut self, status: StatusFilter) -> Self {
		self.status = Some(status);

		self
	}

	/// Sets the priority filter.
	pub fn priority(mut self, priority: Priority) -> Self {
		self.priority = Some(priority);

		self
	}

	/// Sets the category filter.
	pub fn category(mut self, category: Category) -> Self {
		self.category = Some(category);

		self
	}

	/// Sets the sort key.
	pub fn sort(mut self, sort: SortKey) -> Self {
		self.sort = Some(sort);

		self
	}

	/// Sets the page number and size.
	pub fn page(mut self, page: u32, limit: u32) -> Self {
		self.page = Some(page);
		self.limit = Some(limit);

		self
	}

	/// Query pairs in wire order. Zero page or limit values are treated as unset.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(status) = self.status {
			pairs.push(("status", status.as_str().to_owned()));
		}
		if let Some(priority) = self.priority {
			pairs.push(("priority_filter", priority.as_str().to_owned()));
		}
		if let Some(category) = self.category {
			pairs.push(("category_filter", category.as_str().to_owned()));
		}
		if let Some(sort) = self.sort {
			pairs.push(("sort", sort.as_str().to_owned()));
		}
		if let Some(page) = self.page.filter(|p| *p > 0) {
			pairs.push(("page", page.to_string()));
		}
		if let Some(limit) = self.limit.filter(|l| *l > 0) {
			pairs.push(("limit", limit.to_string()));
		}

		pairs
	}

	/// Appends the query pairs to `url`.
	pub fn apply(&self, url: &mut Url) {
		let pairs = self.to_pairs();

		if pairs.is_empty() {
			return;
		}

		url.query_pairs_mut().extend_pairs(pairs);
	}
}
