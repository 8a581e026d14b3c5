//! Wire types for the Scale task API.
//!
//! Task payloads are deliberately opaque: the server's business schema
//! evolves independently of this crate, so a task is carried as the JSON
//! object the server returned, verbatim, plus typed accessors for the
//! handful of fields every task has (`task_id`, `status`, `type`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Parameter mapping for task creation: flat string-keyed JSON.
pub type TaskParams = Map<String, Value>;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Submitted, not yet worked on.
    Pending,
    /// Finished by annotators; results are available.
    Completed,
    /// Cancelled before completion.
    Canceled,
    /// The service failed to process the task.
    Error,
}

impl TaskStatus {
    /// Get the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of annotation work a task asks for.
///
/// Each type accepts its own creation parameter set; see
/// [`crate::schema::allowed_fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Pick one (or more) of a fixed set of categories.
    Categorization,
    /// Transcribe fields from an attachment.
    Transcription,
    /// Compare two or more attachments.
    Comparison,
    /// Bounding-box annotation.
    Annotation,
    /// Polygon annotation.
    Polygonannotation,
    /// Line/spline annotation.
    Lineannotation,
    /// Keypoint annotation.
    Pointannotation,
    /// Full-image segmentation.
    Segmentannotation,
    /// Free-form data collection from an attachment.
    Datacollection,
    /// Audio transcription.
    Audiotranscription,
    /// Named-entity labeling over text.
    Namedentityrecognition,
    /// Frame-by-frame video playback annotation.
    Videoplaybackannotation,
}

impl TaskType {
    /// Every supported task type, in wire order.
    pub const ALL: [TaskType; 12] = [
        Self::Categorization,
        Self::Transcription,
        Self::Comparison,
        Self::Annotation,
        Self::Polygonannotation,
        Self::Lineannotation,
        Self::Pointannotation,
        Self::Segmentannotation,
        Self::Datacollection,
        Self::Audiotranscription,
        Self::Namedentityrecognition,
        Self::Videoplaybackannotation,
    ];

    /// Get the type as its wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categorization => "categorization",
            Self::Transcription => "transcription",
            Self::Comparison => "comparison",
            Self::Annotation => "annotation",
            Self::Polygonannotation => "polygonannotation",
            Self::Lineannotation => "lineannotation",
            Self::Pointannotation => "pointannotation",
            Self::Segmentannotation => "segmentannotation",
            Self::Datacollection => "datacollection",
            Self::Audiotranscription => "audiotranscription",
            Self::Namedentityrecognition => "namedentityrecognition",
            Self::Videoplaybackannotation => "videoplaybackannotation",
        }
    }

    /// Creation endpoint path segment for this type.
    ///
    /// The API routes categorization through `task/categorize`; every other
    /// type uses its tag verbatim.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Categorization => "categorize",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| Error::validation(format!("unknown task type '{s}'")))
    }
}

/// A task as returned by the service: the response object carried verbatim.
///
/// Records are never mutated field-by-field; a refresh replaces the whole
/// field set (see [`crate::Client::refresh_task`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRecord {
    fields: Map<String, Value>,
}

impl TaskRecord {
    /// Build a record from a decoded response body.
    ///
    /// The body must be a JSON object carrying a string `task_id`; anything
    /// else means the server broke its response contract.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(Error::malformed("task response is not a JSON object"));
        };
        if !fields.get("task_id").is_some_and(Value::is_string) {
            return Err(Error::malformed("task response is missing 'task_id'"));
        }
        Ok(Self { fields })
    }

    /// The server-issued task identifier.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("task_id").and_then(Value::as_str)
    }

    /// The task's current status, when the record carries one.
    pub fn status(&self) -> Option<TaskStatus> {
        self.fields
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The task's type tag, when the record carries one.
    pub fn task_type(&self) -> Option<TaskType> {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Look up an arbitrary field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, in the order the server sent them.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Replace this record's entire field set with another record's.
    pub fn replace(&mut self, other: TaskRecord) {
        self.fields = other.fields;
    }
}

/// Envelope of a `tasks` listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    /// The tasks on this page.
    pub docs: Vec<TaskRecord>,
    /// Total number of tasks matching the filters, when reported.
    #[serde(default)]
    pub total: u64,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u64,
    /// Offset of this page within the full collection.
    #[serde(default)]
    pub offset: u64,
    /// Whether more tasks exist past this page.
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
    /// Continuation token for token-style pagination, when supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Filter parameters for task listing.
///
/// Builder-style; unset filters are simply omitted from the query string.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use scaleapi::{ListParams, TaskStatus, TaskType};
///
/// let params = ListParams::new()
///     .task_type(TaskType::Annotation)
///     .status(TaskStatus::Completed)
///     .project("cool_project_name")
///     .completed_after(Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    completed_after: Option<DateTime<Utc>>,
    completed_before: Option<DateTime<Utc>>,
    status: Option<TaskStatus>,
    task_type: Option<TaskType>,
    project: Option<String>,
    batch: Option<String>,
}

impl ListParams {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only tasks created at or after this instant.
    pub fn start_time(mut self, t: DateTime<Utc>) -> Self {
        self.start_time = Some(t);
        self
    }

    /// Only tasks created at or before this instant.
    pub fn end_time(mut self, t: DateTime<Utc>) -> Self {
        self.end_time = Some(t);
        self
    }

    /// Only tasks completed at or after this instant.
    pub fn completed_after(mut self, t: DateTime<Utc>) -> Self {
        self.completed_after = Some(t);
        self
    }

    /// Only tasks completed at or before this instant.
    pub fn completed_before(mut self, t: DateTime<Utc>) -> Self {
        self.completed_before = Some(t);
        self
    }

    /// Only tasks in the given status.
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only tasks of the given type.
    pub fn task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Only tasks in the given project.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Only tasks in the given batch.
    pub fn batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Render the set filters as query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        fn iso(t: &DateTime<Utc>) -> String {
            t.to_rfc3339_opts(SecondsFormat::Millis, true)
        }

        let mut query = Vec::new();
        if let Some(t) = &self.start_time {
            query.push(("start_time".into(), iso(t)));
        }
        if let Some(t) = &self.end_time {
            query.push(("end_time".into(), iso(t)));
        }
        if let Some(t) = &self.completed_after {
            query.push(("completed_after".into(), iso(t)));
        }
        if let Some(t) = &self.completed_before {
            query.push(("completed_before".into(), iso(t)));
        }
        if let Some(status) = &self.status {
            query.push(("status".into(), status.as_str().into()));
        }
        if let Some(task_type) = &self.task_type {
            query.push(("type".into(), task_type.as_str().into()));
        }
        if let Some(project) = &self.project {
            query.push(("project".into(), project.clone()));
        }
        if let Some(batch) = &self.batch {
            query.push(("batch".into(), batch.clone()));
        }
        query
    }
}
