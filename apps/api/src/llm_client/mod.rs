/// LLM Cascade Client — the single point of entry for all external scoring
/// calls in Screener.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through this module.
///
/// Providers are tried strictly in priority order (OpenAI, then Gemini);
/// the first success wins and lower-priority providers are never invoked.
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::score::{Engine, Recommendation, ScoreResult};

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Retries per provider after the first attempt.
const MAX_RETRIES: u32 = 2;
/// Per-request timeout applied by the shared HTTP client.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Provider credentials. Absent keys disable the corresponding provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub openai: Option<String>,
    pub gemini: Option<String>,
}

/// Failure classification for a single provider attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Rate limit, timeout, or transient server failure. Worth retrying.
    #[error("transient provider error: {0}")]
    Retryable(String),

    /// Auth failure or a response that does not match the expected schema.
    /// Retrying the same provider cannot help.
    #[error("permanent provider error: {0}")]
    Permanent(String),
}

/// Structured assessment a provider must return. Mirrors the JSON schema in
/// the scoring prompt; unknown or missing optional fields are tolerated, a
/// missing or non-numeric score is not.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmAssessment {
    pub overall_score: f64,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub missing_requirements: Vec<String>,
    #[serde(default)]
    pub job_description_summary: Option<String>,
    #[serde(default)]
    pub target_job_role: Option<String>,
    #[serde(default)]
    pub best_fit_role: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// A single external scoring strategy. The cascade is agnostic to how many
/// providers exist or what they talk to; adding one means implementing this
/// trait and registering it in priority order.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    fn engine(&self) -> Engine;

    async fn invoke(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<LlmAssessment, ProviderError>;
}

/// Ordered cascade over external scoring providers with per-provider retry.
///
/// `score` never returns an error: provider exhaustion degrades into a
/// `Failed`-tagged result that the blender turns into a keyword-only score.
pub struct CascadeClient {
    providers: Vec<Arc<dyn ScoreProvider>>,
}

impl CascadeClient {
    /// Builds the production cascade from configured keys. Providers with no
    /// key are skipped entirely.
    pub fn from_keys(http: reqwest::Client, keys: &ProviderKeys) -> Self {
        let mut providers: Vec<Arc<dyn ScoreProvider>> = Vec::new();
        if let Some(key) = &keys.openai {
            providers.push(Arc::new(OpenAiProvider::new(http.clone(), key.clone())));
        }
        if let Some(key) = &keys.gemini {
            providers.push(Arc::new(GeminiProvider::new(http.clone(), key.clone())));
        }
        Self { providers }
    }

    /// Builds a cascade from an explicit provider list, in priority order.
    pub fn with_providers(providers: Vec<Arc<dyn ScoreProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Scores a resume against one job description. Tries each provider in
    /// order, retrying transient failures up to the cap with exponential
    /// backoff, and returns the first valid structured result.
    pub async fn score(&self, resume_text: &str, jd_text: &str) -> ScoreResult {
        if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            return ScoreResult::failed("Empty resume or job description text.");
        }

        for provider in &self.providers {
            let engine = provider.engine();

            'attempts: for attempt in 0..=MAX_RETRIES {
                if attempt > 0 {
                    // Exponential backoff: 1s, 2s
                    let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                    warn!(
                        "{} attempt {} failed, retrying after {}ms...",
                        engine.as_str(),
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }

                match provider.invoke(resume_text, jd_text).await {
                    Ok(assessment) => match validate(assessment, engine) {
                        Ok(result) => {
                            debug!("{} scored candidate at {}", engine.as_str(), result.score);
                            return result;
                        }
                        Err(e) => {
                            warn!("{} returned invalid assessment: {e}", engine.as_str());
                            break 'attempts;
                        }
                    },
                    Err(ProviderError::Retryable(msg)) => {
                        warn!("{} transient failure: {msg}", engine.as_str());
                        continue;
                    }
                    Err(ProviderError::Permanent(msg)) => {
                        warn!(
                            "{} failed permanently: {msg}. Advancing to next provider.",
                            engine.as_str()
                        );
                        break 'attempts;
                    }
                }
            }
        }

        ScoreResult::failed("All scoring providers failed or no provider key is configured.")
    }
}

/// Converts a raw assessment into a `ScoreResult`, rejecting scores outside
/// [0,100] as schema violations so the cascade advances to the next provider.
fn validate(assessment: LlmAssessment, engine: Engine) -> Result<ScoreResult, ProviderError> {
    let score = assessment.overall_score;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(ProviderError::Permanent(format!(
            "overall_score {score} outside [0,100]"
        )));
    }

    let recommendation = Some(Recommendation::parse(
        assessment.recommendation.as_deref().unwrap_or("Maybe"),
    ));

    Ok(ScoreResult {
        score,
        engine,
        summary: assessment.summary.unwrap_or_default(),
        missing_requirements: assessment.missing_requirements,
        recommendation,
        candidate_name: found(assessment.candidate_name),
        email: found(assessment.email),
        phone: found(assessment.phone_number),
        jd_summary: found(assessment.job_description_summary),
        target_role: found(assessment.target_job_role),
        best_fit_role: found(assessment.best_fit_role),
        matched_jd: None,
    })
}

/// Providers are prompted to answer "Not Found" for absent fields; collapse
/// that sentinel (and empty strings) to `None`.
fn found(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("not found")
    })
}
