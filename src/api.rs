//! Wire-level envelopes and error payloads exchanged with the task API.
//!
//! Successful responses arrive wrapped as `{"success": true, "data": ...}`. Failures use
//! either `{"error": {"message": ...}}`, a FastAPI-style `{"detail": "..."}`, or the
//! structured validation shape `{"detail": [{"loc": [...], "msg": ..., "type": ...}]}`.
//! [`ErrorPayload::into_error`] folds all of them into the crate [`Error`] taxonomy.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Success envelope wrapping every task API payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
	/// Success indicator reported by the API.
	#[serde(default)]
	pub success: bool,
	/// Wrapped payload.
	pub data: T,
}

/// Acknowledgement returned by endpoints without a data payload (e.g. deletes).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
	/// Success indicator reported by the API.
	#[serde(default)]
	pub success: bool,
	/// Optional human-readable message.
	#[serde(default)]
	pub message: Option<String>,
}

/// One segment of a validation issue location (`body`, `title`, or an array index).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
	/// Named field segment.
	Field(String),
	/// Positional segment inside an array.
	Index(u64),
}
impl Display for LocSegment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Field(name) => f.write_str(name),
			Self::Index(idx) => write!(f, "{idx}"),
		}
	}
}

/// Single per-field issue reported by the API's request validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
	/// Location path of the offending field.
	#[serde(default)]
	pub loc: Vec<LocSegment>,
	/// Human-readable message.
	pub msg: String,
	/// Machine-readable issue type.
	#[serde(rename = "type", default)]
	pub kind: String,
}
impl ValidationIssue {
	/// Returns the location path joined with `.` (e.g. `body.title`).
	pub fn path(&self) -> String {
		self.loc.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
	}
}
impl Display for ValidationIssue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {} ({})", self.path(), self.msg, self.kind)
	}
}

/// `detail` member of an error payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
	/// Structured validation issues.
	Issues(Vec<ValidationIssue>),
	/// Plain message.
	Message(String),
}
impl ErrorDetail {
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::String(message) => Some(Self::Message(message.clone())),
			Value::Array(items) => {
				let issues = items
					.iter()
					.filter_map(|item| ValidationIssue::deserialize(item).ok())
					.collect::<Vec<_>>();

				(!issues.is_empty()).then_some(Self::Issues(issues))
			},
			_ => None,
		}
	}
}

/// `error` member of an error payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Optional machine-readable code.
	#[serde(default)]
	pub code: Option<String>,
	/// Human-readable message.
	#[serde(default)]
	pub message: Option<String>,
}
impl ErrorBody {
	fn from_value(value: &Value) -> Option<Self> {
		if let Value::String(message) = value {
			return Some(Self { code: None, message: Some(message.clone()) });
		}

		let code = value.get("code").and_then(|code| match code {
			Value::String(code) => Some(code.clone()),
			Value::Null => None,
			other => Some(other.to_string()),
		});
		let message = value.get("message").and_then(Value::as_str).map(ToOwned::to_owned);

		Some(Self { code, message })
	}
}

/// Error payload returned with non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
	/// Envelope-style error object.
	#[serde(default)]
	pub error: Option<ErrorBody>,
	/// FastAPI-style detail (string or issue list).
	#[serde(default)]
	pub detail: Option<ErrorDetail>,
}
impl ErrorPayload {
	/// Parses an error body member by member.
	///
	/// `error` and `detail` are read independently, so a sibling of an unexpected shape
	/// never hides a usable message. Non-JSON bodies yield an empty payload.
	pub fn parse(body: &[u8]) -> Self {
		let Ok(value) = serde_json::from_slice::<Value>(body) else {
			return Self::default();
		};

		Self {
			error: value.get("error").and_then(ErrorBody::from_value),
			detail: value.get("detail").and_then(ErrorDetail::from_value),
		}
	}

	/// Returns the most specific plain message carried by the payload.
	pub fn message(&self) -> Option<&str> {
		let from_error = self.error.as_ref().and_then(|e| e.message.as_deref());
		let from_detail = match &self.detail {
			Some(ErrorDetail::Message(message)) => Some(message.as_str()),
			_ => None,
		};

		from_error.or(from_detail).filter(|m| !m.trim().is_empty())
	}

	/// Folds the payload into the client error taxonomy for the given status.
	pub fn into_error(self, status: u16) -> Error {
		match &self.detail {
			Some(ErrorDetail::Issues(issues)) if !issues.is_empty() => {
				let message = render_issues(issues);

				return Error::Validation { message, issues: issues.clone() };
			},
			_ => (),
		}

		let message = self
			.message()
			.map(ToOwned::to_owned)
			.unwrap_or_else(|| format!("Request failed with status {status}"));

		Error::RequestFailed { status, message }
	}
}

/// Renders every issue into a single aggregated message.
pub fn render_issues(issues: &[ValidationIssue]) -> String {
	let rendered = issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");

	format!("Validation failed: {rendered}")
}
