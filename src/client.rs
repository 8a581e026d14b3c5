//! The task API client.
//!
//! A [`Client`] owns an immutable credential and a [`Gateway`] and exposes
//! one method per operation: typed creation methods per task type, fetch,
//! refresh, cancel, single-page listing, and bounded paginated export.
//! Creation parameters are allow-list validated locally before any network
//! traffic; a validation failure therefore has zero remote side effects.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::gateway::{Gateway, GatewayConfig};
use crate::pagination::{
    collect, CollectOutcome, CursorStrategy, PageRequest, TaskLister, TaskPage, MAX_PAGE_SIZE,
};
use crate::schema;
use crate::types::{ListParams, TaskList, TaskParams, TaskRecord, TaskType};

/// Filter keys the `tasks` listing endpoint understands.
const LISTING_FIELDS: &[&str] = &[
    "start_time",
    "end_time",
    "completed_after",
    "completed_before",
    "status",
    "type",
    "project",
    "batch",
    "limit",
    "offset",
    "next_token",
];

macro_rules! create_task_methods {
    ($(($method:ident, $variant:ident, $tag:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Create a ", $tag, " task.")]
            ///
            /// Equivalent to [`Client::create_task`] with the matching
            /// [`TaskType`].
            pub async fn $method(&self, params: TaskParams) -> Result<TaskRecord> {
                self.create_task(TaskType::$variant, params).await
            }
        )*
    };
}

/// Asynchronous client for the task service.
///
/// # Examples
///
/// ```rust,no_run
/// use serde_json::json;
/// use scaleapi::Client;
///
/// # async fn run() -> scaleapi::Result<()> {
/// let client = Client::new("live_xxxxx")?;
/// let task = client
///     .create_categorization_task(scaleapi::params(json!({
///         "callback_url": "http://www.example.com/callback",
///         "instruction": "Is this company public or private?",
///         "attachment_type": "website",
///         "attachment": "http://www.google.com/",
///         "categories": ["public", "private"],
///     }))?)
///     .await?;
/// println!("created {:?}", task.id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    gateway: Gateway,
}

impl Client {
    /// Create a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(GatewayConfig::new(api_key)?),
        })
    }

    /// Create a client against an alternate base URL (staging, mock server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(GatewayConfig::with_base_url(api_key, base_url)?),
        })
    }

    /// Create a task of the given type.
    ///
    /// `params` is checked against the type's allow-list first; an illegal
    /// key fails locally and nothing is submitted.
    pub async fn create_task(
        &self,
        task_type: TaskType,
        params: TaskParams,
    ) -> Result<TaskRecord> {
        schema::validate(task_type, &params)?;
        let path = format!("task/{}", task_type.endpoint());
        let body = Value::Object(params);
        let response = self.gateway.post(&path, &body).await?;
        TaskRecord::from_value(response)
    }

    create_task_methods! {
        (create_categorization_task, Categorization, "categorization"),
        (create_transcription_task, Transcription, "transcription"),
        (create_comparison_task, Comparison, "comparison"),
        (create_annotation_task, Annotation, "bounding-box annotation"),
        (create_polygonannotation_task, Polygonannotation, "polygon annotation"),
        (create_lineannotation_task, Lineannotation, "line annotation"),
        (create_pointannotation_task, Pointannotation, "point annotation"),
        (create_segmentannotation_task, Segmentannotation, "segmentation"),
        (create_datacollection_task, Datacollection, "data collection"),
        (create_audiotranscription_task, Audiotranscription, "audio transcription"),
        (create_namedentityrecognition_task, Namedentityrecognition, "named-entity recognition"),
        (create_videoplaybackannotation_task, Videoplaybackannotation, "video playback annotation"),
    }

    /// Fetch a task by its identifier.
    pub async fn fetch_task(&self, task_id: &str) -> Result<TaskRecord> {
        let path = self.task_path(task_id, "")?;
        let response = self.gateway.get(&path, &[]).await?;
        TaskRecord::from_value(response)
    }

    /// Re-fetch a task and replace the record's entire field set in place.
    pub async fn refresh_task(&self, record: &mut TaskRecord) -> Result<()> {
        let id = record
            .id()
            .ok_or_else(|| Error::validation("task record has no 'task_id'"))?
            .to_owned();
        let fresh = self.fetch_task(&id).await?;
        record.replace(fresh);
        Ok(())
    }

    /// Cancel a task by its identifier.
    ///
    /// The service refuses to cancel tasks that have already completed;
    /// that refusal surfaces as an [`Error::Service`].
    pub async fn cancel_task(&self, task_id: &str) -> Result<TaskRecord> {
        let path = self.task_path(task_id, "/cancel")?;
        let response = self.gateway.post(&path, &Value::Object(Map::new())).await?;
        TaskRecord::from_value(response)
    }

    /// Fetch one page of the task listing with typed filters.
    ///
    /// `limit` is clamped to the server's page cap ([`MAX_PAGE_SIZE`]).
    pub async fn tasks(
        &self,
        filters: &ListParams,
        limit: usize,
        offset: usize,
    ) -> Result<TaskList> {
        let mut query = filters.to_query();
        query.push(("limit".into(), MAX_PAGE_SIZE.min(limit).to_string()));
        query.push(("offset".into(), offset.to_string()));
        let response = self.gateway.get("tasks", &query).await?;
        decode_task_list(response)
    }

    /// Fetch one page of the task listing from a raw parameter mapping.
    ///
    /// Mirrors the wire interface directly: keys are allow-list checked
    /// against the recognized listing filters and an unknown key fails
    /// locally, before any network call.
    pub async fn tasks_raw(&self, params: &TaskParams) -> Result<TaskList> {
        let mut query = Vec::with_capacity(params.len());
        for (key, value) in params {
            if !LISTING_FIELDS.contains(&key.as_str()) {
                return Err(Error::validation(format!(
                    "illegal parameter '{key}' for task listing"
                )));
            }
            query.push((key.clone(), query_value(value)));
        }
        let response = self.gateway.get("tasks", &query).await?;
        decode_task_list(response)
    }

    /// Collect up to `max_items` tasks by paging through the listing.
    ///
    /// Uses offset-style pagination; see [`crate::pagination::collect`] for
    /// the termination and partial-failure contract. For token-style
    /// servers call `collect` directly with [`CursorStrategy::Token`].
    pub async fn list_all(&self, filters: &ListParams, max_items: usize) -> CollectOutcome {
        collect(self, filters, max_items, CursorStrategy::Offset).await
    }

    fn task_path(&self, task_id: &str, suffix: &str) -> Result<String> {
        if task_id.is_empty() {
            return Err(Error::validation("missing task id"));
        }
        Ok(format!("task/{task_id}{suffix}"))
    }
}

#[async_trait]
impl TaskLister for Client {
    async fn list_page(&self, page: PageRequest) -> Result<TaskPage> {
        let response = self.gateway.get("tasks", &page.to_query()).await?;
        let list = decode_task_list(response)?;
        Ok(TaskPage {
            tasks: list.docs,
            next_token: list.next_token,
        })
    }
}

fn decode_task_list(response: Value) -> Result<TaskList> {
    serde_json::from_value(response)
        .map_err(|e| Error::malformed(format!("unexpected listing shape: {e}")))
}

/// Render a raw filter value the way it appears on the query string.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_task_id_is_rejected_locally() {
        let client = Client::new("key").unwrap();
        assert!(client.task_path("", "").unwrap_err().is_validation());
        assert_eq!(
            client.task_path("abc", "/cancel").unwrap(),
            "task/abc/cancel"
        );
    }

    #[test]
    fn raw_query_values_render_unquoted() {
        assert_eq!(query_value(&Value::String("pending".into())), "pending");
        assert_eq!(query_value(&serde_json::json!(25)), "25");
        assert_eq!(query_value(&serde_json::json!(true)), "true");
    }
}
