// CV content analysis: lexicon-driven scoring, deterministic rewriting and
// context detection. Pure and synchronous; handlers call it inline.

pub mod analyzer;
pub mod detection;
pub mod handlers;
pub mod lexicon;
pub mod models;
pub mod rewrite;

// Re-export the public API consumed by main and the handlers.
pub use analyzer::CvAnalyzer;
pub use lexicon::Lexicon;
