//! Keyword Matcher — deterministic, offline lexical scorer.
//!
//! Combines two signals for a (resume, JD) pair:
//! 1. skill overlap: fraction of JD skills found in the resume, where skills
//!    come from a fixed vocabulary plus capitalized technology tokens;
//! 2. TF-IDF cosine similarity over unigrams and bigrams.
//!
//! `score = (overlap * 0.6 + cosine * 0.4) * 100`, rounded to one decimal.
//! Pure and total: no I/O, no hidden state, empty input scores 0.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

const OVERLAP_WEIGHT: f64 = 0.6;
const COSINE_WEIGHT: f64 = 0.4;
/// Cap on reported missing skills, matching the report column width.
const MISSING_SKILLS_CAP: usize = 10;

/// Skills recognized regardless of capitalization in either text.
const COMMON_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "ruby",
    "go",
    "php",
    "swift",
    "kotlin",
    "r",
    "scala",
    "rust",
    "react",
    "angular",
    "vue",
    "django",
    "flask",
    "fastapi",
    "node",
    "express",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "elasticsearch",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "machine learning",
    "deep learning",
    "nlp",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
    "communication",
    "leadership",
    "agile",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for", "from", "has", "have",
    "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "my", "no", "not", "of", "on",
    "or", "our", "she", "so", "such", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "was", "we", "were", "will", "with", "you", "your",
];

static TECH_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tech_pattern() -> &'static Regex {
    TECH_PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-zA-Z0-9+#.]*\b").expect("technology token pattern is valid")
    })
}

/// Output of the keyword matcher for one (resume, JD) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore {
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Scores `resume_text` against `jd_text`. Deterministic; never fails.
pub fn score(resume_text: &str, jd_text: &str) -> KeywordScore {
    let jd_skills = extract_skills(jd_text);
    let resume_skills = extract_skills(resume_text);

    let matched: Vec<String> = jd_skills.intersection(&resume_skills).cloned().collect();
    let missing: Vec<String> = jd_skills
        .difference(&resume_skills)
        .take(MISSING_SKILLS_CAP)
        .cloned()
        .collect();

    let match_ratio = if jd_skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 / jd_skills.len() as f64
    };

    let cosine = tfidf_similarity(resume_text, jd_text);
    let combined = (match_ratio * OVERLAP_WEIGHT + cosine * COSINE_WEIGHT) * 100.0;

    KeywordScore {
        score: round1(combined.clamp(0.0, 100.0)),
        matched_skills: matched,
        missing_skills: missing,
    }
}

/// Skills mentioned in a text: common-vocabulary hits plus capitalized
/// technology tokens longer than two characters, all lowercased.
/// Single-token vocabulary skills must match a whole word ("r" must not hit
/// every text containing the letter); multi-token skills match as phrases.
fn extract_skills(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    let words: BTreeSet<&str> = text_lower
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut found: BTreeSet<String> = COMMON_SKILLS
        .iter()
        .filter(|skill| {
            if skill.chars().all(|c| c.is_alphanumeric() || c == '+' || c == '#') {
                words.contains(*skill)
            } else {
                text_lower.contains(*skill)
            }
        })
        .map(|skill| skill.to_string())
        .collect();

    for token in tech_pattern().find_iter(text) {
        let word = token.as_str();
        if word.chars().count() > 2 {
            found.insert(word.to_lowercase());
        }
    }
    found
}

/// TF-IDF cosine similarity between the two texts over unigrams + bigrams.
/// The corpus is exactly the two documents; smooth IDF keeps shared terms
/// from vanishing.
fn tfidf_similarity(a: &str, b: &str) -> f64 {
    let terms_a = terms(a);
    let terms_b = terms(b);
    if terms_a.is_empty() || terms_b.is_empty() {
        return 0.0;
    }

    let tf_a = frequencies(&terms_a);
    let tf_b = frequencies(&terms_b);

    let n_docs = 2.0;
    let idf = |term: &str| -> f64 {
        let df = tf_a.contains_key(term) as u8 + tf_b.contains_key(term) as u8;
        ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0
    };

    let weigh = |tf: &HashMap<String, usize>| -> HashMap<String, f64> {
        tf.iter()
            .map(|(term, count)| (term.clone(), *count as f64 * idf(term)))
            .collect()
    };

    cosine(&weigh(&tf_a), &weigh(&tf_b))
}

/// Unigrams and bigrams after lowercasing, stop-word removal, and dropping
/// single-character tokens.
fn terms(text: &str) -> Vec<String> {
    let unigrams: Vec<String> = tokenize(text);
    let mut all = unigrams.clone();
    all.extend(
        unigrams
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1])),
    );
    all
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

fn frequencies(terms: &[String]) -> HashMap<String, usize> {
    let mut tf = HashMap::new();
    for term in terms {
        *tf.entry(term.clone()).or_insert(0) += 1;
    }
    tf
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();
    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Senior engineer with eight years of Python and Rust. \
        Built streaming pipelines on AWS with Docker and Kubernetes. \
        Led a team of five; strong communication.";

    const JD: &str = "Backend Engineer. Required: Python, Rust, Docker, Kubernetes, AWS. \
        Nice to have: Terraform, leadership experience.";

    #[test]
    fn test_score_is_deterministic() {
        let a = score(RESUME, JD);
        let b = score(RESUME, JD);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_is_bounded() {
        let s = score(RESUME, JD);
        assert!(s.score >= 0.0 && s.score <= 100.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score("", JD).score, 0.0);
        assert_eq!(score(RESUME, "").score, 0.0);
        assert_eq!(score("", "").score, 0.0);
    }

    #[test]
    fn test_identical_texts_score_high() {
        let s = score(JD, JD);
        assert!(s.score > 90.0, "identical texts scored {}", s.score);
        assert!(s.missing_skills.is_empty());
    }

    #[test]
    fn test_disjoint_texts_score_low() {
        let s = score(
            "gardening flower arranging watering cans",
            "quantum compiler verification in Haskell",
        );
        assert!(s.score < 20.0, "disjoint texts scored {}", s.score);
    }

    #[test]
    fn test_matched_skills_found() {
        let s = score(RESUME, JD);
        assert!(s.matched_skills.contains(&"python".to_string()));
        assert!(s.matched_skills.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_missing_skills_reported() {
        let s = score(RESUME, JD);
        assert!(s.missing_skills.contains(&"terraform".to_string()));
    }

    #[test]
    fn test_missing_skills_capped_at_ten() {
        let jd = "Required: Alpha1x Beta2x Gamma3x Delta4x Epsilon5x Zeta6x Eta7x \
            Theta8x Iota9x Kappa10x Lambda11x Mu12x Nu13x";
        let s = score("unrelated resume text", jd);
        assert!(s.missing_skills.len() <= 10);
    }

    #[test]
    fn test_extract_skills_keeps_symbolic_names() {
        let skills = extract_skills("Expert in C++ and C# development");
        assert!(skills.contains("c++"));
        assert!(skills.contains("c#"));
    }

    #[test]
    fn test_extract_skills_vocabulary_catches_short_names() {
        let skills = extract_skills("We use Go at ACME");
        // "Go" is two chars, below the capitalized-token threshold, but the
        // vocabulary still catches it.
        assert!(skills.contains("go"));
        assert!(skills.contains("acme"));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(65.44), 65.4);
        assert_eq!(round1(65.45), 65.5);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors_is_zero() {
        let a = HashMap::from([("x".to_string(), 1.0)]);
        let b = HashMap::from([("y".to_string(), 1.0)]);
        assert_eq!(cosine(&a, &b), 0.0);
    }
}
