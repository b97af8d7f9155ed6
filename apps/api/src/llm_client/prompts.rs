// Shared prompt constants for the scoring providers.
// Both providers receive the same prompt; only transport and response
// envelopes differ.

/// System prompt fragment that enforces JSON-only output.
pub const SCORING_SYSTEM: &str = "You are an expert ATS evaluator. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// JD text beyond this many characters is truncated before prompting.
const JD_PROMPT_LIMIT: usize = 3000;
/// Resume text beyond this many characters is truncated before prompting.
const RESUME_PROMPT_LIMIT: usize = 4000;

/// Builds the shared scoring prompt for one (resume, JD) pair.
pub fn build_scoring_prompt(resume_text: &str, jd_text: &str) -> String {
    format!(
        r#"You are an objective ATS evaluator. Score the resume against the JD.
RETURN JSON ONLY. No markdown.

Rules:
- Evaluate strictly on objective alignment between resume and JD
- No bias regarding gender, race, age, or formatting
- Evidence-based only. Do not infer unstated skills

FORMAT:
{{
  "candidate_name": "<full name from resume>",
  "overall_score": <0-100>,
  "phone_number": "<from resume or 'Not Found'>",
  "email": "<from resume or 'Not Found'>",
  "summary": "<2-3 sentence background overview>",
  "missing_requirements": ["<gap1>", "<gap2>"],
  "job_description_summary": "<1-2 sentence JD summary>",
  "target_job_role": "<position title from JD>",
  "best_fit_role": "<ideal role for candidate based on resume>",
  "recommendation": "<Yes | No | Maybe>"
}}

JD: {}
RESUME: {}"#,
        truncate_chars(jd_text, JD_PROMPT_LIMIT),
        truncate_chars(resume_text, RESUME_PROMPT_LIMIT),
    )
}

/// Truncates to at most `limit` characters on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
