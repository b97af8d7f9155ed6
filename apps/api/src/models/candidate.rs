use serde::{Deserialize, Serialize};

/// Where a candidate's resume comes from: a fetchable link or text pasted
/// directly into the batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeRef {
    Url(String),
    Inline(String),
}

/// One candidate in a batch. Identity fields are seed values from the
/// submitted row; the scorer may override them with values extracted from
/// the resume itself.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub resume: ResumeRef,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A job description to score against. Immutable for the duration of a
/// batch and shared read-only by all workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub label: String,
    pub text: String,
}

impl JobDescription {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_ref_variants_are_distinct() {
        let url = ResumeRef::Url("https://example.com/cv.pdf".to_string());
        let inline = ResumeRef::Inline("plain resume text".to_string());
        assert_ne!(url, inline);
    }

    #[test]
    fn test_job_description_new() {
        let jd = JobDescription::new("Backend Engineer", "Rust required");
        assert_eq!(jd.label, "Backend Engineer");
        assert_eq!(jd.text, "Rust required");
    }
}
