use crate::{Error, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, Utc};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::{
    sync::mpsc,
    task::{JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// One accepted webhook delivery, signature already verified.
#[derive(Debug, Clone)]
pub struct WebhookJob {
    pub id: Uuid,
    pub body: Bytes,
    pub received_at: DateTime<Utc>,
}

impl WebhookJob {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            id: Uuid::new_v4(),
            body: body.into(),
            received_at: Utc::now(),
        }
    }
}

/// Work performed for every submitted job.
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, job: WebhookJob);
}

/// Fire-and-forget handoff between the HTTP handler and background dispatch.
///
/// `submit` never waits on the job. Each job runs as its own task, so jobs may
/// finish in any order; a panicking job is logged and does not take the
/// worker down. The worker exits after every clone of the queue is dropped
/// and the in-flight jobs have finished.
#[derive(Clone)]
pub struct DispatchQueue {
    sender: mpsc::UnboundedSender<WebhookJob>,
    submitted: Arc<AtomicU64>,
}

impl DispatchQueue {
    pub fn start(handler: Arc<dyn JobHandler>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(receiver, handler));

        (
            Self {
                sender,
                submitted: Arc::new(AtomicU64::new(0)),
            },
            worker,
        )
    }

    pub fn submit(&self, job: WebhookJob) -> Result<()> {
        let id = job.id;
        self.sender
            .send(job)
            .map_err(|_| Error::internal("dispatch worker is not running"))?;
        self.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(job_id = %id, "Job queued for dispatch");
        Ok(())
    }

    /// Number of jobs accepted since start.
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<WebhookJob>,
    handler: Arc<dyn JobHandler>,
) {
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            job = receiver.recv() => match job {
                Some(job) => {
                    let handler = Arc::clone(&handler);
                    tasks.spawn(async move { handler.handle(job).await });
                }
                None => break,
            },
            Some(outcome) = tasks.join_next(), if !tasks.is_empty() => report(outcome),
        }
    }

    debug!("Dispatch queue closed, draining {} job(s)", tasks.len());
    while let Some(outcome) = tasks.join_next().await {
        report(outcome);
    }
}

fn report(outcome: std::result::Result<(), JoinError>) {
    match outcome {
        Ok(()) => {}
        Err(e) if e.is_panic() => error!("Dispatch task panicked: {}", e),
        Err(e) => warn!("Dispatch task did not complete: {}", e),
    }
}
