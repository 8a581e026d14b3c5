//! Async Rust client for the Scale human-annotation task API.
//!
//! The service turns attachments (images, audio, websites, text, video)
//! into annotation work items called *tasks*. This crate wraps its REST
//! interface: one typed creation method per task type, plus fetch, refresh,
//! cancel, single-page listing, and bounded paginated export.
//!
//! Design points:
//!
//! - **Local validation first.** Creation payloads are checked against a
//!   per-type allow-list before any network call; a bad key costs no round
//!   trip and has no remote side effect.
//! - **Classified failures.** Every error is one of three kinds — local
//!   validation, remote service (with status code), or malformed response —
//!   as a [`Error`] sum type. Nothing is retried or swallowed.
//! - **Opaque payloads.** Tasks are carried as the JSON objects the server
//!   returned; the business schema stays on the server where it evolves.
//! - **Single-attempt transport.** One call is one round trip. Retry,
//!   backoff, and deadline policy belong to the caller.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use scaleapi::{Client, ListParams, TaskStatus};
//!
//! # async fn run() -> scaleapi::Result<()> {
//! let client = Client::new("live_xxxxx")?;
//!
//! // Create a task.
//! let task = client
//!     .create_annotation_task(scaleapi::params(json!({
//!         "callback_url": "http://www.example.com/callback",
//!         "instruction": "Draw a box around each **cow**",
//!         "attachment_type": "image",
//!         "attachment": "http://i.imgur.com/v4cBreD.jpg",
//!         "objects_to_annotate": ["cow"],
//!     }))?)
//!     .await?;
//!
//! // Export up to 1000 completed tasks, page by page.
//! let filters = ListParams::new().status(TaskStatus::Completed);
//! let outcome = client.list_all(&filters, 1000).await;
//! println!("fetched {} tasks", outcome.tasks.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod schema;
pub mod types;

pub use client::Client;
pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use pagination::{
    collect, CollectOutcome, Cursor, CursorStrategy, PageRequest, TaskLister, TaskPage,
    MAX_PAGE_SIZE,
};
pub use types::{ListParams, TaskList, TaskParams, TaskRecord, TaskStatus, TaskType};

use serde_json::Value;

/// Production endpoint of the task service.
pub const DEFAULT_BASE_URL: &str = "https://api.scaleapi.com/v1/";

/// Convert a JSON value into a creation parameter mapping.
///
/// Convenience for building [`TaskParams`] with `serde_json::json!`.
///
/// # Errors
///
/// [`Error::Validation`] when `value` is not a JSON object.
pub fn params(value: Value) -> Result<TaskParams> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::validation(format!(
            "task parameters must be a JSON object, got {other}"
        ))),
    }
}
