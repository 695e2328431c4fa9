//! Infers an [`AnalysisContext`] from raw CV content by keyword counting.

use serde::Deserialize;

use crate::analysis::lexicon::{count_present, Lexicon};
use crate::analysis::models::{AnalysisContext, CvContent, CvData, Industry, Language, Level};

/// Explicit caller-supplied values. Anything set here wins over detection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOverrides {
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub target_role: Option<String>,
}

/// Picks the industry whose keywords occur most often in the serialized
/// content. Stable argmax over [`Industry::ALL`]: ties, including all-zero
/// counts, go to the earlier industry.
pub fn detect_industry(lexicon: &Lexicon, content: &CvContent, language: Language) -> Industry {
    let haystack = serialized_lowercase(content);

    let mut best = (Industry::ALL[0], 0usize);
    for industry in Industry::ALL {
        let count: usize = lexicon
            .industry_keywords(language, industry)
            .iter()
            .map(|keyword| haystack.matches(keyword).count())
            .sum();
        if count > best.1 {
            best = (industry, count);
        }
    }
    best.0
}

/// Estimates seniority from the number of roles (two years each) and the
/// seniority vocabulary present in the content.
pub fn detect_level(lexicon: &Lexicon, content: &CvContent) -> Level {
    let haystack = serialized_lowercase(content);
    let years = content.experience.len() * 2;
    let seniority_matches = count_present(&haystack, lexicon.seniority_keywords());

    if seniority_matches >= 3 || years >= 10 {
        Level::Executive
    } else if seniority_matches >= 2 || years >= 5 {
        Level::Senior
    } else if years >= 2 {
        Level::Mid
    } else {
        Level::Entry
    }
}

/// Resolves the context used for one request.
///
/// Language: override, then the CV's own language, then `default_language`.
/// Industry and level: override, else detected. Both are always set.
pub fn build_context(
    lexicon: &Lexicon,
    cv: &CvData,
    overrides: &ContextOverrides,
    default_language: Language,
) -> AnalysisContext {
    let language = overrides
        .language
        .or(cv.language)
        .unwrap_or(default_language);

    let industry = overrides
        .industry
        .unwrap_or_else(|| detect_industry(lexicon, &cv.content, language));
    let level = overrides
        .level
        .unwrap_or_else(|| detect_level(lexicon, &cv.content));

    let target_role = overrides
        .target_role
        .as_deref()
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string);

    AnalysisContext {
        industry: Some(industry),
        level: Some(level),
        target_role,
        language,
    }
}

fn serialized_lowercase(content: &CvContent) -> String {
    // Serializing plain data with string keys cannot fail.
    serde_json::to_string(content)
        .unwrap_or_default()
        .to_lowercase()
}
