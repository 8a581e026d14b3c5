//! Bulk task creation under bounded concurrency.
//!
//! Submits one annotation task per attachment URL, at most `CONCURRENCY`
//! requests in flight at a time. Failures are reported per item and the
//! rest of the batch keeps going.
//!
//! Usage: SCALE_API_KEY=live_xxxxx cargo run --example bulk_create_tasks

use anyhow::Context;
use futures::stream::{self, StreamExt};
use serde_json::json;
use scaleapi::Client;

const DO_DRY_RUN: bool = true;
const CONCURRENCY: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SCALE_API_KEY").context("SCALE_API_KEY is not set")?;
    let client = Client::new(api_key)?;

    // Attachment URLs to create tasks from, one task per row.
    let rows = vec!["https://www.scale.com/img/is/awesome.jpg"];
    eprintln!("rows found: {}", rows.len());

    let results: Vec<_> = stream::iter(rows)
        .map(|row| {
            let client = client.clone();
            async move {
                if DO_DRY_RUN {
                    eprintln!("would create task for {row}");
                    return (row, Ok(None));
                }
                let result = client
                    .create_annotation_task(
                        scaleapi::params(json!({
                            "callback_url": "http://www.example.com/callback",
                            "project": "coolest_project_name",
                            "objects_to_annotate": ["person", "land vehicle"],
                            "with_labels": true,
                            "attachment": row,
                            "attachment_type": "image",
                        }))
                        .expect("creation payload is an object"),
                    )
                    .await;
                (row, result.map(Some))
            }
        })
        .buffer_unordered(CONCURRENCY)
        .collect()
        .await;

    let mut failures = 0;
    for (row, result) in results {
        match result {
            Ok(Some(task)) => eprintln!("task created: {}", task.id().unwrap_or("?")),
            Ok(None) => {},
            Err(err) => {
                failures += 1;
                eprintln!("failed for {row}: {err}");
            },
        }
    }
    eprintln!("finished running script ({failures} failures)");
    Ok(())
}
