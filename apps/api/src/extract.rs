//! Text Source Adapter — turns a resume reference into plain text.
//!
//! This is a collaborator boundary: the orchestrator only sees the
//! `TextSource` trait. `HttpTextSource` is the thin production adapter
//! (direct download + PDF extraction); tests substitute their own.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::models::candidate::ResumeRef;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("download failed: {0}")]
    Download(String),

    #[error("unreadable document: {0}")]
    Parse(String),

    #[error("no text could be extracted")]
    Empty,
}

#[async_trait]
pub trait TextSource: Send + Sync {
    async fn acquire_text(&self, resume: &ResumeRef) -> Result<String, ExtractionError>;
}

/// Fetches resumes over HTTP and extracts plain text. PDFs are detected by
/// content type, extension, or magic bytes; anything else is treated as
/// UTF-8 text.
pub struct HttpTextSource {
    client: reqwest::Client,
}

impl HttpTextSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
        let url = rewrite_share_link(url);
        debug!("downloading resume from {url}");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
            .send()
            .await
            .map_err(|e| ExtractionError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Download(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractionError::Download(e.to_string()))?;

        if is_pdf(&url, &content_type, &body) {
            extract_pdf_text(&body)
        } else {
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
    }
}

#[async_trait]
impl TextSource for HttpTextSource {
    async fn acquire_text(&self, resume: &ResumeRef) -> Result<String, ExtractionError> {
        let text = match resume {
            ResumeRef::Inline(text) => text.clone(),
            ResumeRef::Url(url) => self.fetch(url).await?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text.to_string())
    }
}

fn extract_pdf_text(body: &Bytes) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(body).map_err(|e| ExtractionError::Parse(e.to_string()))
}

fn is_pdf(url: &str, content_type: &str, body: &[u8]) -> bool {
    content_type.contains("pdf") || url.to_lowercase().ends_with(".pdf") || body.starts_with(b"%PDF")
}

/// Dropbox share links point at an HTML viewer; rewrite them to the direct
/// download host. Other URLs pass through untouched.
fn rewrite_share_link(url: &str) -> String {
    if !url.contains("www.dropbox.com") {
        return url.to_string();
    }
    let direct = url.replace("www.dropbox.com", "dl.dropboxusercontent.com");
    if direct.contains("dl=0") {
        direct.replace("dl=0", "dl=1")
    } else if direct.contains('?') {
        format!("{direct}&dl=1")
    } else {
        format!("{direct}?dl=1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inline_text_passes_through_trimmed() {
        let source = HttpTextSource::new(reqwest::Client::new());
        let text = source
            .acquire_text(&ResumeRef::Inline("  ten years of Rust  ".to_string()))
            .await
            .unwrap();
        assert_eq!(text, "ten years of Rust");
    }

    #[tokio::test]
    async fn test_inline_whitespace_is_empty_error() {
        let source = HttpTextSource::new(reqwest::Client::new());
        let err = source
            .acquire_text(&ResumeRef::Inline("   \n ".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn test_is_pdf_by_magic_bytes() {
        assert!(is_pdf("https://x/cv", "", b"%PDF-1.7 rest"));
        assert!(!is_pdf("https://x/cv", "", b"plain text"));
    }

    #[test]
    fn test_is_pdf_by_extension_and_content_type() {
        assert!(is_pdf("https://x/cv.PDF", "", b""));
        assert!(is_pdf("https://x/cv", "application/pdf", b""));
    }

    #[test]
    fn test_dropbox_link_rewritten_to_direct_download() {
        let rewritten = rewrite_share_link("https://www.dropbox.com/s/abc/cv.pdf?dl=0");
        assert_eq!(
            rewritten,
            "https://dl.dropboxusercontent.com/s/abc/cv.pdf?dl=1"
        );
    }

    #[test]
    fn test_dropbox_link_without_query_gets_dl_param() {
        let rewritten = rewrite_share_link("https://www.dropbox.com/s/abc/cv.pdf");
        assert_eq!(
            rewritten,
            "https://dl.dropboxusercontent.com/s/abc/cv.pdf?dl=1"
        );
    }

    #[test]
    fn test_other_urls_untouched() {
        let url = "https://example.com/cv.pdf";
        assert_eq!(rewrite_share_link(url), url);
    }
}
