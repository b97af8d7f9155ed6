use std::sync::Arc;

use crate::config::Config;
use crate::extract::TextSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// One HTTP client shared by every provider call and resume download.
    pub http: reqwest::Client,
    /// Pluggable resume text source. Default: HttpTextSource.
    pub text_source: Arc<dyn TextSource>,
}
