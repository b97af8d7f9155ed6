use serde::{Deserialize, Serialize};

/// Which scoring strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Gpt,
    Gemini,
    Keyword,
    Failed,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Gpt => "gpt",
            Engine::Gemini => "gemini",
            Engine::Keyword => "keyword",
            Engine::Failed => "failed",
        }
    }
}

/// Hiring recommendation attached to a scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    No,
    Maybe,
}

impl Recommendation {
    /// Normalizes a free-text recommendation. Anything that is not a clear
    /// yes/no maps to `Maybe`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" => Recommendation::Yes,
            "no" => Recommendation::No,
            _ => Recommendation::Maybe,
        }
    }
}

/// The terminal outcome recorded for one candidate.
///
/// Invariant: `engine == Failed` implies `score == 0.0` and no
/// recommendation; every other engine implies `0.0 <= score <= 100.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub engine: Engine,
    pub summary: String,
    pub missing_requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_fit_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_jd: Option<String>,
}

impl ScoreResult {
    /// A zero-score terminal result for candidates that could not be scored
    /// at all. The summary explains what went wrong.
    pub fn failed(summary: impl Into<String>) -> Self {
        ScoreResult {
            score: 0.0,
            engine: Engine::Failed,
            summary: summary.into(),
            missing_requirements: Vec::new(),
            recommendation: None,
            candidate_name: None,
            email: None,
            phone: None,
            jd_summary: None,
            target_role: None,
            best_fit_role: None,
            matched_jd: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.engine == Engine::Failed
    }
}
