//! Batch analysis endpoint. Accepts a candidate batch and streams scoring
//! progress back as Server-Sent Events, one JSON event per line, closing
//! the connection after the terminal done event.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::error;

use crate::batch::{BatchOrchestrator, ChannelSink};
use crate::errors::AppError;
use crate::llm_client::{CascadeClient, ProviderKeys};
use crate::models::candidate::{Candidate, JobDescription, ResumeRef};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateSpec>,
    #[serde(default)]
    pub job_descriptions: Vec<JdSpec>,
    pub openai_key: Option<String>,
    pub gemini_key: Option<String>,
}

/// One submitted candidate row. Rows with neither a resume link nor inline
/// text are dropped, mirroring how spreadsheet rows without a resume column
/// are skipped.
#[derive(Debug, Deserialize)]
pub struct CandidateSpec {
    pub name: Option<String>,
    pub resume_url: Option<String>,
    pub resume_text: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JdSpec {
    pub label: Option<String>,
    pub text: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, AppError> {
    let candidates = build_candidates(req.candidates);
    if candidates.is_empty() {
        return Err(AppError::Validation(
            "At least one candidate with a resume link or resume text is required.".to_string(),
        ));
    }

    let jds = build_job_descriptions(req.job_descriptions);
    if jds.is_empty() {
        return Err(AppError::Validation(
            "Job description is required. Provide at least one with non-empty text.".to_string(),
        ));
    }

    // Per-request keys override configured defaults.
    let defaults = state.config.provider_keys();
    let keys = ProviderKeys {
        openai: req.openai_key.filter(|k| !k.trim().is_empty()).or(defaults.openai),
        gemini: req.gemini_key.filter(|k| !k.trim().is_empty()).or(defaults.gemini),
    };

    let cascade = Arc::new(CascadeClient::from_keys(state.http.clone(), &keys));
    let orchestrator = BatchOrchestrator::new(
        cascade,
        state.text_source.clone(),
        state.config.batch_concurrency,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let sink = Arc::new(ChannelSink::new(tx));
    tokio::spawn(async move {
        // Inputs were validated above; a failure here is a bug worth logging.
        if let Err(e) = orchestrator.run(candidates, jds, sink).await {
            error!("batch aborted: {e}");
        }
    });

    let stream = UnboundedReceiverStream::new(rx).map(|event| {
        let payload = serde_json::to_string(&event).unwrap_or_else(|e| {
            error!("failed to serialize progress event: {e}");
            String::new()
        });
        Ok(SseEvent::default().data(payload))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn build_candidates(specs: Vec<CandidateSpec>) -> Vec<Candidate> {
    specs
        .into_iter()
        .enumerate()
        .filter_map(|(idx, spec)| {
            let resume = match (&spec.resume_text, &spec.resume_url) {
                (Some(text), _) if !text.trim().is_empty() => {
                    ResumeRef::Inline(text.trim().to_string())
                }
                (_, Some(url)) if !url.trim().is_empty() => ResumeRef::Url(url.trim().to_string()),
                _ => return None,
            };
            let name = spec
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Candidate {}", idx + 1));
            Some(Candidate {
                name,
                resume,
                email: spec.email,
                phone: spec.phone,
            })
        })
        .collect()
}

fn build_job_descriptions(specs: Vec<JdSpec>) -> Vec<JobDescription> {
    specs
        .into_iter()
        .enumerate()
        .filter_map(|(idx, spec)| {
            let text = spec.text.trim();
            if text.is_empty() {
                return None;
            }
            let label = spec
                .label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| format!("JD {}", idx + 1));
            Some(JobDescription::new(label, text))
        })
        .collect()
}
