//! Bulk task cancellation under bounded concurrency.
//!
//! Cancels every task id in the list, at most `CONCURRENCY` requests in
//! flight at a time. Per-item failures (e.g. already-completed tasks) are
//! reported and the rest of the batch keeps going.
//!
//! Usage: SCALE_API_KEY=live_xxxxx cargo run --example bulk_cancel_tasks

use anyhow::Context;
use futures::stream::{self, StreamExt};
use scaleapi::Client;

const DO_DRY_RUN: bool = true;
const CONCURRENCY: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SCALE_API_KEY").context("SCALE_API_KEY is not set")?;
    let client = Client::new(api_key)?;

    // Task ids to cancel; server ids are 24 hex chars.
    let rows: Vec<&str> = vec!["5d4121900591c138750aaaaa"];
    let rows: Vec<&str> = rows.into_iter().filter(|id| id.len() == 24).collect();
    eprintln!("rows found: {}", rows.len());

    let mut failures = 0;
    let results: Vec<_> = stream::iter(rows)
        .map(|id| {
            let client = client.clone();
            async move {
                if DO_DRY_RUN {
                    eprintln!("would cancel task id: {id}");
                    return (id, Ok(()));
                }
                (id, client.cancel_task(id).await.map(drop))
            }
        })
        .buffer_unordered(CONCURRENCY)
        .collect()
        .await;

    for (id, result) in results {
        if let Err(err) = result {
            failures += 1;
            eprintln!("failed to cancel {id}: {err}");
        }
    }
    eprintln!("finished running script ({failures} failures)");
    Ok(())
}
