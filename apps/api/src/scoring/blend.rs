//! Score Blender — combines the cascade result with the keyword score into
//! the single result recorded for a (candidate, JD) pair.
//!
//! A successful cascade contributes 70% of the final score and all narrative
//! fields; the keyword matcher contributes the remaining 30%. When the
//! cascade is exhausted the keyword score stands alone, so every candidate
//! gets a bounded score even under total provider outage.

use crate::models::score::{Engine, Recommendation, ScoreResult};
use crate::scoring::keyword::KeywordScore;

pub const LLM_WEIGHT: f64 = 0.7;
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Summary used when no provider produced a semantic assessment.
const KEYWORD_ONLY_SUMMARY: &str =
    "No semantic analysis was available; scored via keyword matching only.";

pub fn blend(cascade: ScoreResult, keyword: &KeywordScore) -> ScoreResult {
    if cascade.is_failed() {
        return ScoreResult {
            score: keyword.score,
            engine: Engine::Keyword,
            summary: KEYWORD_ONLY_SUMMARY.to_string(),
            missing_requirements: keyword.missing_skills.clone(),
            recommendation: Some(Recommendation::Maybe),
            candidate_name: None,
            email: None,
            phone: None,
            jd_summary: None,
            target_role: None,
            best_fit_role: None,
            matched_jd: None,
        };
    }

    let blended = LLM_WEIGHT * cascade.score + KEYWORD_WEIGHT * keyword.score;
    ScoreResult {
        score: round1(blended.clamp(0.0, 100.0)),
        ..cascade
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(score: f64) -> KeywordScore {
        KeywordScore {
            score,
            matched_skills: vec!["rust".to_string()],
            missing_skills: vec!["kafka".to_string()],
        }
    }

    fn cascade(score: f64, engine: Engine) -> ScoreResult {
        ScoreResult {
            score,
            engine,
            summary: "Strong systems background.".to_string(),
            missing_requirements: vec!["GraphQL".to_string()],
            recommendation: Some(Recommendation::Yes),
            candidate_name: Some("Jane Doe".to_string()),
            email: None,
            phone: None,
            jd_summary: None,
            target_role: None,
            best_fit_role: Some("Platform Engineer".to_string()),
            matched_jd: None,
        }
    }

    #[test]
    fn test_blend_weights_llm_70_keyword_30() {
        let result = blend(cascade(72.0, Engine::Gemini), &keyword(50.0));
        assert_eq!(result.score, 65.4);
        assert_eq!(result.engine, Engine::Gemini);
    }

    #[test]
    fn test_blend_keeps_cascade_narrative() {
        let result = blend(cascade(80.0, Engine::Gpt), &keyword(40.0));
        assert_eq!(result.summary, "Strong systems background.");
        assert_eq!(result.missing_requirements, vec!["GraphQL".to_string()]);
        assert_eq!(result.recommendation, Some(Recommendation::Yes));
        assert_eq!(result.best_fit_role.as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_failed_cascade_falls_back_to_keyword_only() {
        let result = blend(ScoreResult::failed("providers down"), &keyword(57.5));
        assert_eq!(result.score, 57.5);
        assert_eq!(result.engine, Engine::Keyword);
        assert_eq!(result.summary, KEYWORD_ONLY_SUMMARY);
        assert_eq!(result.missing_requirements, vec!["kafka".to_string()]);
        assert_eq!(result.recommendation, Some(Recommendation::Maybe));
    }

    #[test]
    fn test_keyword_fallback_is_exact_passthrough() {
        for s in [0.0, 33.3, 100.0] {
            let result = blend(ScoreResult::failed("x"), &keyword(s));
            assert_eq!(result.score, s);
        }
    }

    #[test]
    fn test_blended_score_stays_bounded() {
        let result = blend(cascade(100.0, Engine::Gpt), &keyword(100.0));
        assert_eq!(result.score, 100.0);
        let result = blend(cascade(0.0, Engine::Gpt), &keyword(0.0));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_blend_rounds_to_one_decimal() {
        // 0.7*83 + 0.3*41.1 = 70.43
        let result = blend(cascade(83.0, Engine::Gpt), &keyword(41.1));
        assert_eq!(result.score, 70.4);
    }
}
