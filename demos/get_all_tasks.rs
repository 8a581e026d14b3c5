//! Paginated task export.
//!
//! Pages through every task matching the filters below, up to
//! `MAX_TASKS_TO_RETURN`, and prints the result as a JSON array on stdout.
//! A page-fetch failure keeps whatever was already collected.
//!
//! Usage: SCALE_API_KEY=live_xxxxx cargo run --example get_all_tasks

use anyhow::Context;
use chrono::{TimeZone, Utc};
use scaleapi::{Client, ListParams, TaskStatus, TaskType};

const MAX_TASKS_TO_RETURN: usize = 100_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SCALE_API_KEY").context("SCALE_API_KEY is not set")?;
    let client = Client::new(api_key)?;

    // All filters optional; trim to taste.
    let filters = ListParams::new()
        .task_type(TaskType::Annotation)
        .status(TaskStatus::Completed)
        .project("cool_project_name")
        .completed_after(Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap());

    let outcome = client.list_all(&filters, MAX_TASKS_TO_RETURN).await;
    eprintln!("fetched {} tasks", outcome.tasks.len());
    if let Some(err) = &outcome.error {
        eprintln!("export stopped early: {err}");
    }

    println!("{}", serde_json::to_string_pretty(&outcome.tasks)?);
    Ok(())
}
