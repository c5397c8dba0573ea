use std::sync::Arc;

use futures::future::join_all;

use crate::app::Result;
use crate::cache::AssetStore;
use crate::domain::{BatchReport, FetchOutcome, FetchTask};
use crate::fetcher::{FetchResult, Fetcher};

/// Downloads tasks in consecutive chunks of at most `concurrency` tasks.
///
/// Every task of a chunk runs concurrently; the next chunk starts only once
/// all of them have settled. A failing task is logged and counted but never
/// stops its siblings or later chunks.
pub struct BulkFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    store: Arc<dyn AssetStore + Send + Sync>,
    concurrency: usize,
}

impl BulkFetcher {
    /// A concurrency of zero is treated as one.
    pub fn with_concurrency(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn AssetStore + Send + Sync>,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            store,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn run_batch(&self, tasks: Vec<FetchTask>) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, chunk) in partition(tasks, self.concurrency).into_iter().enumerate() {
            tracing::debug!("Starting chunk {} ({} tasks)", index + 1, chunk.len());

            let mut handles = Vec::with_capacity(chunk.len());
            for task in chunk {
                let fetcher = self.fetcher.clone();
                let store = self.store.clone();

                let handle = tokio::spawn(async move {
                    let outcome = fetch_single_task(fetcher.as_ref(), store.as_ref(), &task).await;
                    log_outcome(&task, &outcome);
                    outcome
                });

                handles.push(handle);
            }

            for joined in join_all(handles).await {
                match joined {
                    Ok(outcome) => report.record(&outcome),
                    Err(e) => {
                        tracing::error!("Task join error: {}", e);
                        report.record(&FetchOutcome::Errored {
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }

    /// Tasks whose destination is not cached yet, in input order.
    pub async fn pending(&self, tasks: Vec<FetchTask>) -> Result<Vec<FetchTask>> {
        let mut pending = Vec::new();
        for task in tasks {
            if !self.store.exists(&task.destination).await? {
                pending.push(task);
            }
        }
        Ok(pending)
    }
}

/// Split `items` into consecutive chunks of `size`; the last may be shorter.
pub fn partition<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::new();
    let mut rest = items.into_iter().peekable();

    while rest.peek().is_some() {
        chunks.push(rest.by_ref().take(size).collect());
    }

    chunks
}

async fn fetch_single_task(
    fetcher: &(dyn Fetcher + Send + Sync),
    store: &(dyn AssetStore + Send + Sync),
    task: &FetchTask,
) -> FetchOutcome {
    match try_fetch(fetcher, store, task).await {
        Ok(outcome) => outcome,
        Err(e) => FetchOutcome::Errored {
            message: e.to_string(),
        },
    }
}

async fn try_fetch(
    fetcher: &(dyn Fetcher + Send + Sync),
    store: &(dyn AssetStore + Send + Sync),
    task: &FetchTask,
) -> Result<FetchOutcome> {
    if store.exists(&task.destination).await? {
        return Ok(FetchOutcome::Skipped);
    }

    match fetcher.fetch(&task.source_url).await? {
        FetchResult::Rejected { status } => Ok(FetchOutcome::Failed { status }),
        FetchResult::Content { body } => {
            let bytes = body.len();
            store.write(&task.destination, body).await?;
            Ok(FetchOutcome::Downloaded { bytes })
        }
    }
}

fn log_outcome(task: &FetchTask, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Downloaded { bytes } => {
            tracing::info!("Downloaded {} {} ({} bytes)", task.kind, task.id, bytes)
        }
        FetchOutcome::Skipped => {
            tracing::debug!("Skipping {} {} (already exists)", task.kind, task.id)
        }
        FetchOutcome::Failed { status } => {
            tracing::warn!("Failed to download {} {}: {}", task.kind, task.id, status)
        }
        FetchOutcome::Errored { message } => {
            tracing::error!("Error downloading {} {}: {}", task.kind, task.id, message)
        }
    }
}
