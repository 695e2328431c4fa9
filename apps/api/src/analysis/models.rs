use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Tech,
    Marketing,
    Finance,
    Healthcare,
    Sales,
}

impl Industry {
    /// Fixed iteration order. Detection ties resolve to the earliest entry.
    pub const ALL: [Industry; 5] = [
        Industry::Tech,
        Industry::Marketing,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Tech => "tech",
            Industry::Marketing => "marketing",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Sales => "sales",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Entry,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Es, Language::Fr, Language::De];
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

/// Industry, seniority and language used to tailor scoring.
/// `Default` is the "no context supplied" case: English, nothing else known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub industry: Option<Industry>,
    pub level: Option<Level>,
    pub target_role: Option<String>,
    #[serde(default)]
    pub language: Language,
}

// ────────────────────────────────────────────────────────────────────────────
// CV input
// ────────────────────────────────────────────────────────────────────────────

/// Reads an explicit JSON `null` as the type's default. Pair with
/// `#[serde(default)]` so absent fields default too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Skills arrive either as bare strings or as `{ "name": .., "level": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillEntry {
    Name(String),
    Detailed {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<String>,
    },
}

impl SkillEntry {
    pub fn name(&self) -> &str {
        match self {
            SkillEntry::Name(name) => name,
            SkillEntry::Detailed { name, .. } => name,
        }
    }
}

impl From<&str> for SkillEntry {
    fn from(name: &str) -> Self {
        SkillEntry::Name(name.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillEntry>,
    /// Personal info, education and anything else the editor stores.
    /// Not scored, but part of what context detection scans.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: CvContent,
    #[serde(default)]
    pub language: Option<Language>,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImprovedContent {
    Text(String),
    Experience(Vec<ExperienceEntry>),
    Skills(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvAnalysis {
    /// 0 – 100
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_content: Option<ImprovedContent>,
}

impl CvAnalysis {
    pub(crate) fn suggest(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCvAnalysis {
    pub overall_score: u32,
    pub section_analyses: BTreeMap<String, CvAnalysis>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_from_str_is_case_insensitive() {
        assert_eq!("DE".parse::<Language>().unwrap(), Language::De);
        assert_eq!(" es ".parse::<Language>().unwrap(), Language::Es);
        assert!("pt".parse::<Language>().is_err());
    }

    #[test]
    fn test_context_serializes_camel_case_lowercase_enums() {
        let ctx = AnalysisContext {
            industry: Some(Industry::Tech),
            level: Some(Level::Senior),
            target_role: Some("Staff Engineer".to_string()),
            language: Language::Fr,
        };
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(
            value,
            json!({
                "industry": "tech",
                "level": "senior",
                "targetRole": "Staff Engineer",
                "language": "fr"
            })
        );
    }

    #[test]
    fn test_cv_data_defaults_missing_fields() {
        let cv: CvData = serde_json::from_value(json!({})).unwrap();
        assert!(cv.content.summary.is_empty());
        assert!(cv.content.experience.is_empty());
        assert!(cv.content.skills.is_empty());
        assert!(cv.language.is_none());
    }

    #[test]
    fn test_skills_accept_strings_and_objects() {
        let content: CvContent = serde_json::from_value(json!({
            "skills": ["Rust", {"name": "Docker", "level": "expert"}],
            "education": [{"degree": "BSc"}]
        }))
        .unwrap();
        let names: Vec<&str> = content.skills.iter().map(SkillEntry::name).collect();
        assert_eq!(names, vec!["Rust", "Docker"]);
        assert!(content.extra.contains_key("education"));
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let cv: CvData = serde_json::from_value(json!({
            "content": {
                "summary": null,
                "experience": [{"position": null, "description": null}],
                "skills": [{"level": "expert"}, {"name": null}]
            }
        }))
        .unwrap();
        assert!(cv.content.summary.is_empty());
        assert_eq!(cv.content.experience[0], ExperienceEntry::default());
        let names: Vec<&str> = cv.content.skills.iter().map(SkillEntry::name).collect();
        assert_eq!(names, vec!["", ""]);

        let cv: CvData = serde_json::from_value(json!({"content": null})).unwrap();
        assert_eq!(cv.content, CvContent::default());
    }

    #[test]
    fn test_improved_content_is_untagged() {
        let text = serde_json::to_value(ImprovedContent::Text("x".into())).unwrap();
        assert_eq!(text, json!("x"));
        let skills =
            serde_json::to_value(ImprovedContent::Skills(vec!["Leadership".into()])).unwrap();
        assert_eq!(skills, json!(["Leadership"]));
    }

    #[test]
    fn test_suggest_deduplicates_in_order() {
        let mut analysis = CvAnalysis::default();
        analysis.suggest("a");
        analysis.suggest("b");
        analysis.suggest("a");
        assert_eq!(analysis.suggestions, vec!["a", "b"]);
    }
}
