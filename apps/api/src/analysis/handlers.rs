//! Axum route handlers for the CV analysis API.

use std::fmt;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::detection::{build_context, ContextOverrides};
use crate::analysis::models::{
    null_as_default, AnalysisContext, CvData, FullCvAnalysis, ImprovedContent,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Experience,
    Skills,
    Full,
}

impl Section {
    /// Exact, case-sensitive match on the wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "summary" => Some(Section::Summary),
            "experience" => Some(Section::Experience),
            "skills" => Some(Section::Skills),
            "full" => Some(Section::Full),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Full => "full",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv_data: CvData,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(flatten)]
    pub overrides: ContextOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv_data: CvData,
    #[serde(flatten)]
    pub overrides: ContextOverrides,
}

/// Section analysis without the improved content, which is returned separately.
#[derive(Debug, Serialize)]
pub struct SectionScore {
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub success: bool,
    pub improvement: Option<ImprovedContent>,
    pub section: Section,
    pub analysis: SectionScore,
    pub context: AnalysisContext,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FullResponse {
    pub success: bool,
    pub analysis: FullCvAnalysis,
    pub context: AnalysisContext,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImproveResponse {
    Section(SectionResponse),
    Full(FullResponse),
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub context: AnalysisContext,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/improve
///
/// Scores one CV section (or the whole CV with `section: "full"`) and returns
/// the rewritten content alongside the feedback.
pub async fn handle_improve(
    State(state): State<AppState>,
    payload: Result<Json<ImproveRequest>, JsonRejection>,
) -> Result<Json<ImproveResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedBody(e.body_text()))?;

    let section = request
        .section
        .as_deref()
        .and_then(Section::parse)
        .ok_or(AppError::InvalidSection)?;

    let analyzer = &state.analyzer;
    let context = build_context(
        analyzer.lexicon(),
        &request.cv_data,
        &request.overrides,
        state.config.default_language,
    );
    info!(
        %section,
        industry = ?context.industry,
        level = ?context.level,
        language = ?context.language,
        "Analyzing CV"
    );

    let content = &request.cv_data.content;
    let analysis = match section {
        Section::Full => {
            let analysis = analyzer.analyze_full_cv(&request.cv_data, &context);
            let message = format!(
                "CV analysis complete. Overall score: {}/100",
                analysis.overall_score
            );
            return Ok(Json(ImproveResponse::Full(FullResponse {
                success: true,
                analysis,
                context,
                message,
            })));
        }
        Section::Summary => analyzer.analyze_summary(&content.summary, &context),
        Section::Experience => analyzer.analyze_experience(&content.experience, &context),
        Section::Skills => analyzer.analyze_skills(&content.skills, &context),
    };

    let message = score_message(section, analysis.score);
    Ok(Json(ImproveResponse::Section(SectionResponse {
        success: true,
        improvement: analysis.improved_content,
        section,
        analysis: SectionScore {
            score: analysis.score,
            strengths: analysis.strengths,
            weaknesses: analysis.weaknesses,
            suggestions: analysis.suggestions,
        },
        context,
        message,
    })))
}

/// POST /api/v1/ai/context
///
/// Returns the context `/improve` would use for the same body.
pub async fn handle_detect_context(
    State(state): State<AppState>,
    payload: Result<Json<ContextRequest>, JsonRejection>,
) -> Result<Json<ContextResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedBody(e.body_text()))?;
    let context = build_context(
        state.analyzer.lexicon(),
        &request.cv_data,
        &request.overrides,
        state.config.default_language,
    );
    Ok(Json(ContextResponse { context }))
}

/// Feedback line chosen by score band: 80 and up, 60 and up, below 60.
fn score_message(section: Section, score: u32) -> String {
    if score >= 80 {
        format!("Excellent! Your {section} scored {score}/100. Minor refinements applied.")
    } else if score >= 60 {
        format!("Good {section}, with room for improvement. Score: {score}/100")
    } else {
        format!("Significant improvements made to your {section}. Score: {score}/100")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::models::Language;
    use crate::analysis::{CvAnalyzer, Lexicon};
    use crate::config::Config;
    use crate::errors::RETRY_MESSAGE;
    use crate::routes::build_router;

    fn app() -> Router {
        let state = AppState {
            analyzer: Arc::new(CvAnalyzer::new(Arc::new(Lexicon::builtin().unwrap()))),
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                default_language: Language::En,
            },
        };
        build_router(state)
    }

    async fn post_raw(uri: &str, body: String) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(uri, body.to_string()).await
    }

    fn cv() -> Value {
        json!({
            "content": {
                "summary": "Led a team of 6 engineers building react and node services on aws for 2M users.",
                "experience": [
                    {
                        "position": "Engineering Manager",
                        "company": "Acme",
                        "description": "Responsible for software delivery across three product teams and hiring."
                    }
                ],
                "skills": ["React", "Node", "AWS", "Docker"]
            }
        })
    }

    #[tokio::test]
    async fn test_summary_section_response_shape() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": cv(), "section": "summary", "targetRole": "Staff Engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["section"], "summary");
        assert_eq!(body["analysis"]["score"], 100);
        assert!(body["analysis"].get("improvedContent").is_none());
        assert!(body["improvement"].is_string());
        assert_eq!(body["context"]["industry"], "tech");
        assert_eq!(body["context"]["targetRole"], "Staff Engineer");
        assert!(body["message"].as_str().unwrap().starts_with("Excellent!"));
    }

    #[tokio::test]
    async fn test_experience_section_returns_rewritten_entries() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": cv(), "section": "experience"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // 40 + 20 length, weak phrase, no metrics
        assert_eq!(body["analysis"]["score"], 60);
        assert_eq!(
            body["improvement"][0]["description"],
            "managed and delivered scalable software solutions delivery across three product teams and hiring."
        );
        assert!(body["message"].as_str().unwrap().starts_with("Good experience"));
    }

    #[tokio::test]
    async fn test_empty_skills_message_band() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": {"content": {}}, "section": "skills"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["score"], 0);
        assert_eq!(body["analysis"]["weaknesses"][0], "No skills listed");
        assert!(body["improvement"].is_null());
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Significant improvements"));
    }

    #[tokio::test]
    async fn test_full_section_returns_aggregate() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": cv(), "section": "full"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let sections = body["analysis"]["sectionAnalyses"].as_object().unwrap();
        assert_eq!(sections.len(), 3);
        let sum: u64 = sections
            .values()
            .map(|s| s["score"].as_u64().unwrap())
            .sum();
        let expected = (sum as f64 / 3.0).round() as u64;
        assert_eq!(body["analysis"]["overallScore"], expected);
        assert!(body.get("section").is_none());
    }

    #[tokio::test]
    async fn test_null_summary_takes_too_short_path() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": {"content": {"summary": null}}, "section": "summary"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["score"], 20);
        assert_eq!(
            body["analysis"]["weaknesses"][0],
            "Summary is too short or missing"
        );
    }

    #[tokio::test]
    async fn test_null_experience_and_nameless_skill_are_empty() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({
                "cvData": {"content": {
                    "experience": [{"position": "Dev", "description": null}],
                    "skills": [{"level": "expert"}]
                }},
                "section": "full"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // empty description: 40 base + 20 for no weak phrase
        assert_eq!(body["analysis"]["sectionAnalyses"]["experience"]["score"], 60);
        assert_eq!(body["analysis"]["sectionAnalyses"]["skills"]["score"], 60);
    }

    #[tokio::test]
    async fn test_keyword_free_cv_falls_back_to_first_industry() {
        let (status, body) = post(
            "/api/v1/ai/context",
            json!({"cvData": {"content": {"summary": "gardening and poetry"}}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"]["industry"], "tech");
    }

    #[tokio::test]
    async fn test_unknown_section_is_400() {
        let (status, body) = post(
            "/api/v1/ai/improve",
            json!({"cvData": cv(), "section": "education"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid section specified"}));
    }

    #[tokio::test]
    async fn test_missing_section_is_400() {
        let (status, _) = post("/api/v1/ai/improve", json!({"cvData": cv()})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_generic_500() {
        let (status, body) = post_raw("/api/v1/ai/improve", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": RETRY_MESSAGE}));
    }

    #[tokio::test]
    async fn test_context_endpoint_honours_overrides() {
        let (status, body) = post(
            "/api/v1/ai/context",
            json!({"cvData": cv(), "industry": "sales", "language": "de"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"]["industry"], "sales");
        assert_eq!(body["context"]["language"], "de");
        // one role (two years) and a single seniority word
        assert_eq!(body["context"]["level"], "mid");
    }

    #[test]
    fn test_score_message_thresholds() {
        assert!(score_message(Section::Summary, 80).starts_with("Excellent!"));
        assert!(score_message(Section::Summary, 79).starts_with("Good summary"));
        assert!(score_message(Section::Skills, 60).contains("60/100"));
        assert!(score_message(Section::Skills, 59).starts_with("Significant"));
    }

    #[test]
    fn test_section_parse_is_exact() {
        assert_eq!(Section::parse("full"), Some(Section::Full));
        assert_eq!(Section::parse("Summary"), None);
        assert_eq!(Section::parse(""), None);
    }
}
