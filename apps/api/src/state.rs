use std::sync::Arc;

use crate::analysis::CvAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the lexicon built at startup. Read-only, shared by every request.
    pub analyzer: Arc<CvAnalyzer>,
    pub config: Config,
}
