//! Bounded collection over an unbounded remote listing.
//!
//! The service caps each listing response at [`MAX_PAGE_SIZE`] items and
//! reports no authoritative total, so the only reliable exhaustion signal
//! is a short page: a response with fewer items than were requested. The
//! [`collect`] loop pages until the output buffer is full or the collection
//! runs dry, and on a page-fetch failure hands back everything gathered so
//! far together with the error rather than discarding it.
//!
//! Pagination is strictly sequential — each page's cursor depends on the
//! previous result — so there is nothing to parallelize here.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{ListParams, TaskRecord};

/// Maximum number of items the server returns per listing call.
pub const MAX_PAGE_SIZE: usize = 100;

/// Which cursor paradigm a collection run uses.
///
/// Historical server versions paginate by numeric offset; newer ones hand
/// out opaque continuation tokens. A single run uses exactly one paradigm,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStrategy {
    /// Legacy: skip as many items as have already been collected.
    Offset,
    /// Current: pass back the token the previous page returned.
    Token,
}

/// Position of the next page within the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Numeric offset from the start of the collection.
    Offset(usize),
    /// Continuation token from the previous page; `None` on the first page.
    Token(Option<String>),
}

/// One listing call's worth of parameters.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Filter parameters, already rendered to query pairs.
    pub filters: Vec<(String, String)>,
    /// Requested page size, at most [`MAX_PAGE_SIZE`].
    pub limit: usize,
    /// Where this page starts.
    pub cursor: Cursor,
}

impl PageRequest {
    /// Render filters, limit, and cursor as query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.filters.clone();
        query.push(("limit".into(), self.limit.to_string()));
        match &self.cursor {
            Cursor::Offset(offset) => query.push(("offset".into(), offset.to_string())),
            Cursor::Token(Some(token)) => query.push(("next_token".into(), token.clone())),
            Cursor::Token(None) => {}
        }
        query
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Default)]
pub struct TaskPage {
    /// Tasks on this page, in server order.
    pub tasks: Vec<TaskRecord>,
    /// Continuation token for the next page, when the server issues one.
    pub next_token: Option<String>,
}

/// Source of listing pages.
///
/// [`crate::Client`] implements this over the live `tasks` endpoint; tests
/// substitute canned page sequences.
#[async_trait]
pub trait TaskLister: Send + Sync {
    /// Fetch a single page.
    async fn list_page(&self, page: PageRequest) -> Result<TaskPage>;
}

/// What a collection run produced.
///
/// A failed page fetch stops the run but keeps its partial harvest: `tasks`
/// holds everything gathered before the failure and `error` reports it.
#[derive(Debug)]
pub struct CollectOutcome {
    /// Collected tasks, at most the run's `max_items`.
    pub tasks: Vec<TaskRecord>,
    /// The error that stopped the run early, if any.
    pub error: Option<Error>,
}

impl CollectOutcome {
    /// Whether the run finished without a page-fetch failure.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse into a plain result, dropping partial tasks on failure.
    ///
    /// # Errors
    ///
    /// The error that stopped the run, when there was one.
    pub fn into_result(self) -> Result<Vec<TaskRecord>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tasks),
        }
    }
}

/// Page through a listing until `max_items` are collected or it runs dry.
///
/// Each page requests `min(MAX_PAGE_SIZE, remaining)` items; a page shorter
/// than its request signals exhaustion and ends the run. With
/// [`CursorStrategy::Token`], a missing continuation token ends the run as
/// well. `max_items == 0` returns immediately without calling the lister.
///
/// Termination is guaranteed only for finite `max_items`: against a lister
/// that always fills its pages, the run stops exactly when the buffer is
/// full.
pub async fn collect<L>(
    lister: &L,
    filters: &ListParams,
    max_items: usize,
    strategy: CursorStrategy,
) -> CollectOutcome
where
    L: TaskLister + ?Sized,
{
    let filters = filters.to_query();
    let mut tasks: Vec<TaskRecord> = Vec::new();
    let mut next_token: Option<String> = None;
    let mut error = None;

    while tasks.len() < max_items {
        let remaining = max_items - tasks.len();
        let limit = MAX_PAGE_SIZE.min(remaining);
        let cursor = match strategy {
            CursorStrategy::Offset => Cursor::Offset(tasks.len()),
            CursorStrategy::Token => Cursor::Token(next_token.take()),
        };
        let request = PageRequest {
            filters: filters.clone(),
            limit,
            cursor,
        };

        match lister.list_page(request).await {
            Ok(page) => {
                let page_len = page.tasks.len();
                tasks.extend(page.tasks);
                next_token = page.next_token;
                tracing::debug!(page_len, collected = tasks.len(), "fetched page");
                if page_len < limit {
                    break;
                }
                if strategy == CursorStrategy::Token && next_token.is_none() {
                    break;
                }
            },
            Err(err) => {
                tracing::warn!(collected = tasks.len(), error = %err, "pagination aborted");
                error = Some(err);
                break;
            },
        }
    }

    // A server overshooting its limit must not overshoot the caller's buffer.
    tasks.truncate(max_items);
    CollectOutcome { tasks, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_cursor_renders_as_offset_param() {
        let request = PageRequest {
            filters: vec![("status".into(), "completed".into())],
            limit: 50,
            cursor: Cursor::Offset(200),
        };
        assert_eq!(
            request.to_query(),
            vec![
                ("status".to_string(), "completed".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("offset".to_string(), "200".to_string()),
            ]
        );
    }

    #[test]
    fn first_token_page_sends_no_cursor() {
        let request = PageRequest {
            filters: vec![],
            limit: 100,
            cursor: Cursor::Token(None),
        };
        assert_eq!(
            request.to_query(),
            vec![("limit".to_string(), "100".to_string())]
        );
    }

    #[test]
    fn continuation_token_renders_as_next_token() {
        let request = PageRequest {
            filters: vec![],
            limit: 100,
            cursor: Cursor::Token(Some("abc".into())),
        };
        assert!(request
            .to_query()
            .contains(&("next_token".to_string(), "abc".to_string())));
    }
}
