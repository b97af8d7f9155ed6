//! Batch Orchestrator — drives every candidate through acquisition,
//! scoring, and matching under a bounded worker pool, and streams progress
//! to a sink in completion order.
//!
//! Workers never touch the counters: they push `Started`/`Finished`
//! messages into one channel, and a single consumer loop assigns `current`,
//! accumulates results, and emits the terminal `Done` event. That loop is
//! the only point of serialization in the batch.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::batch::sink::EventSink;
use crate::extract::TextSource;
use crate::llm_client::CascadeClient;
use crate::models::candidate::{Candidate, JobDescription};
use crate::models::events::{BatchProgressEvent, CandidateStatus};
use crate::models::score::ScoreResult;
use crate::scoring::multi_jd;

/// Default number of candidates processed simultaneously.
pub const DEFAULT_CONCURRENCY: usize = 15;

/// The only failure mode of a batch as a whole: a request that is malformed
/// before any worker is dispatched. Per-candidate failures become data.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("malformed batch: {0}")]
    Malformed(&'static str),
}

enum WorkerMsg {
    Started {
        candidate: String,
    },
    Finished {
        candidate: String,
        status: CandidateStatus,
        result: ScoreResult,
    },
}

pub struct BatchOrchestrator {
    cascade: Arc<CascadeClient>,
    text_source: Arc<dyn TextSource>,
    concurrency: usize,
}

impl BatchOrchestrator {
    pub fn new(
        cascade: Arc<CascadeClient>,
        text_source: Arc<dyn TextSource>,
        concurrency: usize,
    ) -> Self {
        Self {
            cascade,
            text_source,
            concurrency: concurrency.max(1),
        }
    }

    /// Runs one batch to completion. Emits a `Progress` event when a worker
    /// picks up a candidate, exactly one terminal `Result` event per
    /// candidate in completion order, and exactly one trailing `Done`.
    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        jds: Vec<JobDescription>,
        sink: Arc<dyn EventSink>,
    ) -> Result<(), BatchError> {
        if candidates.is_empty() {
            return Err(BatchError::Malformed("no candidates"));
        }
        if jds.is_empty() {
            return Err(BatchError::Malformed("no job descriptions"));
        }

        let batch_id = Uuid::new_v4();
        let total = candidates.len();
        info!(
            "batch {batch_id}: {} candidates x {} job descriptions, {} workers",
            total,
            jds.len(),
            self.concurrency
        );

        let jds: Arc<[JobDescription]> = jds.into();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel::<WorkerMsg>();

        for candidate in candidates {
            let tx = tx.clone();
            let semaphore = semaphore.clone();
            let jds = jds.clone();
            let cascade = self.cascade.clone();
            let text_source = self.text_source.clone();

            tokio::spawn(async move {
                // The semaphore is never closed while workers hold clones.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let name = candidate.name.clone();
                let _ = tx.send(WorkerMsg::Started {
                    candidate: name.clone(),
                });
                let (status, result) =
                    process_candidate(candidate, &jds, &cascade, text_source.as_ref()).await;
                let _ = tx.send(WorkerMsg::Finished {
                    candidate: name,
                    status,
                    result,
                });
            });
        }
        // Workers hold the remaining senders; the channel closes when the
        // last one finishes.
        drop(tx);

        let mut completed = 0usize;
        let mut results = Vec::with_capacity(total);
        while let Some(msg) = rx.recv().await {
            match msg {
                WorkerMsg::Started { candidate } => {
                    sink.send(BatchProgressEvent::Progress {
                        current: completed,
                        total,
                        candidate,
                    })
                    .await;
                }
                WorkerMsg::Finished {
                    candidate,
                    status,
                    result,
                } => {
                    completed += 1;
                    results.push(result.clone());
                    sink.send(BatchProgressEvent::Result {
                        current: completed,
                        total,
                        candidate,
                        status,
                        data: result,
                    })
                    .await;
                }
            }
        }

        info!("batch {batch_id}: done, {completed}/{total} candidates scored");
        sink.send(BatchProgressEvent::Done { total, results }).await;
        Ok(())
    }
}

/// Runs one candidate end-to-end. The scoring path never errors; the only
/// failure recorded here is the text source refusing to produce a resume.
async fn process_candidate(
    candidate: Candidate,
    jds: &[JobDescription],
    cascade: &CascadeClient,
    text_source: &dyn TextSource,
) -> (CandidateStatus, ScoreResult) {
    let resume_text = match text_source.acquire_text(&candidate.resume).await {
        Ok(text) => text,
        Err(e) => {
            warn!("extraction failed for {}: {e}", candidate.name);
            let mut result = ScoreResult::failed(format!("Failed: {e}"));
            result.candidate_name = Some(candidate.name);
            return (CandidateStatus::Failed, result);
        }
    };

    let mut result = multi_jd::match_best(&resume_text, jds, cascade).await;

    // Seed identity fields from the submitted row where the scorer found
    // nothing better in the resume itself.
    if result.candidate_name.is_none() {
        result.candidate_name = Some(candidate.name);
    }
    if result.email.is_none() {
        result.email = candidate.email;
    }
    if result.phone.is_none() {
        result.phone = candidate.phone;
    }

    (CandidateStatus::Complete, result)
}
