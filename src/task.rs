//! Task models exchanged with the API and the request bodies that create or modify them.

pub mod query;

pub use query::*;

// self
use crate::_prelude::*;

/// Task urgency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	/// Low priority.
	Low,
	/// Medium priority.
	#[default]
	Medium,
	/// High priority.
	High,
	/// Urgent priority.
	Urgent,
}
impl Priority {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Priority::Low => "low",
			Priority::Medium => "medium",
			Priority::High => "high",
			Priority::Urgent => "urgent",
		}
	}
}
impl Display for Priority {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Task category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// Work.
	Work,
	/// Personal.
	Personal,
	/// Health.
	Health,
	/// Finance.
	Finance,
	/// Education.
	Education,
	/// Anything else.
	#[default]
	Other,
}
impl Category {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Category::Work => "work",
			Category::Personal => "personal",
			Category::Health => "health",
			Category::Finance => "finance",
			Category::Education => "education",
			Category::Other => "other",
		}
	}
}
impl Display for Category {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Task as returned by the API. Timestamps are kept as the ISO-8601 strings the API emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
	/// Server-assigned identifier.
	pub id: i64,
	/// Owner.
	pub user_id: String,
	/// Title.
	pub title: String,
	/// Optional free-form description.
	#[serde(default)]
	pub description: Option<String>,
	/// Completion flag.
	#[serde(default)]
	pub completed: bool,
	/// Priority; missing values read as medium.
	#[serde(default)]
	pub priority: Priority,
	/// Category; missing values read as other.
	#[serde(default)]
	pub category: Category,
	/// Optional due date.
	#[serde(default)]
	pub due_date: Option<String>,
	/// Creation timestamp.
	pub created_at: String,
	/// Last update timestamp.
	pub updated_at: String,
}

/// Body for creating a task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
	/// Title (required).
	pub title: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Optional priority (server default: medium).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub priority: Option<Priority>,
	/// Optional category (server default: other).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
	/// Optional due date; a bare `YYYY-MM-DD` is widened before sending.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub due_date: Option<String>,
}
impl TaskDraft {
	/// Creates a draft with only a title.
	pub fn new(title: impl Into<String>) -> Self {
		Self { title: title.into(), description: None, priority: None, category: None, due_date: None }
	}

	/// Sets the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the priority.
	pub fn priority(mut self, priority: Priority) -> Self {
		self.priority = Some(priority);

		self
	}

	/// Sets the category.
	pub fn category(mut self, category: Category) -> Self {
		self.category = Some(category);

		self
	}

	/// Sets the due date (date or date-time string).
	pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
		self.due_date = Some(due_date.into());

		self
	}

	pub(crate) fn normalized(mut self) -> Self {
		self.due_date = normalize_due_date(self.due_date.as_deref());

		self
	}
}

/// Body for updating a task; `None` fields are left untouched by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
	/// New title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// New description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// New priority.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub priority: Option<Priority>,
	/// New category.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
	/// New due date; a bare `YYYY-MM-DD` is widened before sending.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub due_date: Option<String>,
}
impl TaskPatch {
	pub(crate) fn normalized(mut self) -> Self {
		self.due_date = normalize_due_date(self.due_date.as_deref());

		self
	}
}

/// Body for the completion toggle endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
	/// Desired completion state.
	pub completed: bool,
}

/// Widens a bare calendar date to a midnight timestamp.
///
/// Values that already carry a time component (`T`) pass through unchanged, so the
/// function is idempotent. Missing or blank values normalize to `None`.
pub fn normalize_due_date(value: Option<&str>) -> Option<String> {
	let value = value.map(str::trim).filter(|v| !v.is_empty())?;

	if value.contains('T') { Some(value.to_owned()) } else { Some(format!("{value}T00:00:00")) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn due_date_normalization_widens_bare_dates() {
		assert_eq!(normalize_due_date(Some("2026-01-29")).as_deref(), Some("2026-01-29T00:00:00"));
		assert_eq!(
			normalize_due_date(Some("2026-01-29T10:30:00")).as_deref(),
			Some("2026-01-29T10:30:00")
		);
		assert_eq!(normalize_due_date(None), None);
		assert_eq!(normalize_due_date(Some("")), None);
		assert_eq!(normalize_due_date(Some("   ")), None);
	}

	#[test]
	fn due_date_normalization_is_idempotent() {
		for input in ["2026-01-29", "2026-01-29T10:30:00", "2026-01-29T10:30:00Z", "2030-12-31"] {
			let once = normalize_due_date(Some(input));
			let twice = normalize_due_date(once.as_deref());

			assert_eq!(once, twice, "Normalization must be idempotent for {input}.");
		}
	}

	#[test]
	fn draft_omits_unset_fields_and_normalizes() {
		let draft = TaskDraft::new("Pay rent").category(Category::Finance).due_date("2026-02-01");
		let value = serde_json::to_value(draft.normalized()).expect("Draft should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"title": "Pay rent",
				"category": "finance",
				"due_date": "2026-02-01T00:00:00",
			})
		);
	}

	#[test]
	fn task_fills_defaults_for_missing_fields() {
		let task: Task = serde_json::from_str(
			r#"{"id":3,"user_id":"user-1","title":"Stretch","created_at":"2026-01-01T08:00:00","updated_at":"2026-01-01T08:00:00"}"#,
		)
		.expect("Minimal task payload should deserialize.");

		assert_eq!(task.priority, Priority::Medium);
		assert_eq!(task.category, Category::Other);
		assert!(!task.completed);
		assert_eq!(task.due_date, None);
	}

	#[test]
	fn enums_use_lowercase_labels() {
		assert_eq!(serde_json::to_string(&Priority::Urgent).expect("Priority should serialize."), "\"urgent\"");
		assert_eq!(Category::Education.to_string(), "education");
	}
}
