//! Multi-JD Matcher — scores one candidate against every job description
//! and keeps the best match.
//!
//! Each (resume, JD) pair is scored independently through the cascade and
//! the keyword matcher, then blended; nothing is shared or cached across
//! pairs. JDs fan out concurrently, so per-candidate latency tracks the
//! slowest single JD rather than the sum.

use futures::future::join_all;
use tracing::debug;

use crate::llm_client::CascadeClient;
use crate::models::candidate::JobDescription;
use crate::models::score::ScoreResult;
use crate::scoring::{blend, keyword};

/// `matched_jd` value reported when only one JD was supplied.
pub const SINGLE_JD_MARKER: &str = "Single JD";

/// Scores `resume_text` against every JD and returns the result for the
/// best-scoring one, labelled with that JD. Ties break toward the earliest
/// JD in input order. Never fails: with all providers down every per-JD
/// result degrades to a keyword-only score.
pub async fn match_best(
    resume_text: &str,
    jds: &[JobDescription],
    cascade: &CascadeClient,
) -> ScoreResult {
    if let [jd] = jds {
        let mut result = score_one(resume_text, jd, cascade).await;
        result.matched_jd = Some(SINGLE_JD_MARKER.to_string());
        return result;
    }

    let scored = join_all(
        jds.iter()
            .map(|jd| async move { score_one(resume_text, jd, cascade).await }),
    )
    .await;

    let mut best: Option<(usize, ScoreResult)> = None;
    for (idx, result) in scored.into_iter().enumerate() {
        let better = match &best {
            Some((_, current)) => result.score > current.score,
            None => true,
        };
        if better {
            best = Some((idx, result));
        }
    }

    match best {
        Some((idx, mut result)) => {
            debug!(
                "best match: {} at {}",
                jds[idx].label, result.score
            );
            result.matched_jd = Some(jds[idx].label.clone());
            result
        }
        // Unreachable for non-empty input; the orchestrator validates that.
        None => ScoreResult::failed("No job descriptions supplied."),
    }
}

/// One (resume, JD) pair: keyword matching plus the provider cascade,
/// blended into a single result.
async fn score_one(
    resume_text: &str,
    jd: &JobDescription,
    cascade: &CascadeClient,
) -> ScoreResult {
    let keyword_score = keyword::score(resume_text, &jd.text);
    let cascade_result = cascade.score(resume_text, &jd.text).await;
    blend::blend(cascade_result, &keyword_score)
}
