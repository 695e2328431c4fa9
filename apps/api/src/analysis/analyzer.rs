//! Rule-based CV content analysis.
//!
//! Each section analyzer is a pure function of its input, the context and the
//! injected [`Lexicon`]: base score, fixed bonuses per satisfied check, and a
//! deterministic rewrite of the content as `improved_content`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::analysis::lexicon::{contains_any, Lexicon};
use crate::analysis::models::{
    AnalysisContext, CvAnalysis, CvData, ExperienceEntry, FullCvAnalysis, ImprovedContent,
    SkillEntry,
};
use crate::analysis::rewrite::rewrite_text;

const MIN_SUMMARY_CHARS: usize = 50;
const MIN_DESCRIPTION_CHARS: usize = 50;
const MIN_SKILL_COUNT: usize = 8;
const MIN_SUMMARY_INDUSTRY_KEYWORDS: usize = 2;
const MIN_INDUSTRY_SKILLS: usize = 3;
const MAX_SUGGESTED_SKILLS: usize = 5;

pub const SUMMARY_SECTION: &str = "summary";
pub const EXPERIENCE_SECTION: &str = "experience";
pub const SKILLS_SECTION: &str = "skills";

/// Stateless analyzer over a shared [`Lexicon`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CvAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl CvAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Scores a professional summary.
    ///
    /// Under 50 characters short-circuits to a fixed score of 20. Otherwise:
    /// base 50, +20 power word, +15 any digit, +15 two or more industry
    /// keywords, capped at 100.
    pub fn analyze_summary(&self, summary: &str, ctx: &AnalysisContext) -> CvAnalysis {
        let mut analysis = CvAnalysis::default();

        if summary.chars().count() < MIN_SUMMARY_CHARS {
            analysis.score = 20;
            analysis
                .weaknesses
                .push("Summary is too short or missing".to_string());
            analysis
                .suggestions
                .push("Add a compelling professional summary (100-150 words)".to_string());
            debug!(section = SUMMARY_SECTION, score = analysis.score, "summary too short");
            return analysis;
        }

        let lower = summary.to_lowercase();
        let mut score: u32 = 50;

        if contains_any(&lower, self.lexicon.power_words(ctx.language)) {
            score += 20;
            analysis.strengths.push("Uses strong action words".to_string());
        } else {
            analysis.weaknesses.push("Lacks strong action words".to_string());
            analysis.suggest("Start sentences with powerful action verbs like 'led', 'achieved' or 'implemented'");
        }

        if summary.chars().any(|c| c.is_ascii_digit()) {
            score += 15;
            analysis
                .strengths
                .push("Includes quantifiable achievements".to_string());
        } else {
            analysis.suggest("Add specific numbers or percentages to quantify your achievements");
        }

        if let Some(industry) = ctx.industry {
            let keywords = self.lexicon.industry_keywords(ctx.language, industry);
            let found = keywords.iter().filter(|k| lower.contains(*k)).count();
            if found >= MIN_SUMMARY_INDUSTRY_KEYWORDS {
                score += 15;
                analysis
                    .strengths
                    .push(format!("Contains relevant {industry} industry keywords"));
            } else {
                analysis.suggest(format!(
                    "Include more {industry}-specific keywords relevant to your target role"
                ));
            }
        }

        analysis.score = score.min(100);
        analysis.improved_content = Some(ImprovedContent::Text(self.improve_text(summary, ctx)));

        debug!(section = SUMMARY_SECTION, score = analysis.score, "summary analyzed");
        analysis
    }

    /// Scores work experience entries independently and averages them.
    ///
    /// Per entry: base 40, +20 description of 50+ characters, +20 no weak
    /// phrase, +20 measurable outcome. An empty description contains no weak
    /// phrase and so still earns that bonus.
    pub fn analyze_experience(
        &self,
        experiences: &[ExperienceEntry],
        ctx: &AnalysisContext,
    ) -> CvAnalysis {
        let mut analysis = CvAnalysis::default();

        if experiences.is_empty() {
            analysis
                .weaknesses
                .push("No work experience listed".to_string());
            analysis
                .suggestions
                .push("Add your work experience with detailed descriptions".to_string());
            debug!(section = EXPERIENCE_SECTION, score = 0, "no experience entries");
            return analysis;
        }

        let weak_phrases = self.lexicon.weak_phrases(ctx.language);
        let mut total: u32 = 0;

        for entry in experiences {
            let position = display_position(entry);
            let lower = entry.description.to_lowercase();
            let mut entry_score: u32 = 40;

            if entry.description.chars().count() >= MIN_DESCRIPTION_CHARS {
                entry_score += 20;
            } else {
                analysis
                    .weaknesses
                    .push(format!("Description for {position} is too brief"));
                analysis.suggest("Expand each role description to at least 2-3 sentences");
            }

            if contains_any(&lower, weak_phrases) {
                analysis
                    .weaknesses
                    .push(format!("Uses weak or passive phrases in {position}"));
                analysis.suggest("Replace passive phrases like 'responsible for' with strong action verbs");
            } else {
                entry_score += 20;
            }

            if self.lexicon.has_metrics(&entry.description) {
                entry_score += 20;
                analysis
                    .strengths
                    .push(format!("Quantified impact in {position}"));
            } else {
                analysis.suggest("Add measurable results (percentages, revenue, time saved) to each role");
            }

            total += entry_score;
        }

        analysis.score = mean_rounded(total, experiences.len()).min(100);
        if analysis.score >= 80 {
            analysis
                .strengths
                .push("Experience descriptions are detailed and results-oriented".to_string());
        }

        let improved = experiences
            .iter()
            .map(|entry| ExperienceEntry {
                description: self.improve_text(&entry.description, ctx),
                ..entry.clone()
            })
            .collect();
        analysis.improved_content = Some(ImprovedContent::Experience(improved));

        debug!(
            section = EXPERIENCE_SECTION,
            entries = experiences.len(),
            score = analysis.score,
            "experience analyzed"
        );
        analysis
    }

    /// Scores a skills list: base 60, +20 for 8 or more skills, +20 when at
    /// least 3 skill names contain an industry keyword.
    pub fn analyze_skills(&self, skills: &[SkillEntry], ctx: &AnalysisContext) -> CvAnalysis {
        let mut analysis = CvAnalysis::default();

        if skills.is_empty() {
            analysis.weaknesses.push("No skills listed".to_string());
            analysis
                .suggestions
                .push("Add relevant technical and soft skills".to_string());
            debug!(section = SKILLS_SECTION, score = 0, "no skills");
            return analysis;
        }

        let names: Vec<String> = skills.iter().map(|s| s.name().to_lowercase()).collect();
        let mut score: u32 = 60;

        if skills.len() >= MIN_SKILL_COUNT {
            score += 20;
            analysis
                .strengths
                .push("Comprehensive skill set".to_string());
        } else {
            analysis.suggest(format!(
                "Add more skills (at least {MIN_SKILL_COUNT} recommended)"
            ));
        }

        let industry_keywords = ctx
            .industry
            .map(|industry| self.lexicon.industry_keywords(ctx.language, industry))
            .unwrap_or_default();

        if let Some(industry) = ctx.industry {
            let relevant = names
                .iter()
                .filter(|name| contains_any(name, industry_keywords))
                .count();
            if relevant >= MIN_INDUSTRY_SKILLS {
                score += 20;
                analysis
                    .strengths
                    .push(format!("Skills are well aligned with the {industry} industry"));
            } else {
                analysis.suggest(format!("Add more {industry}-specific skills"));
            }
        }

        analysis.score = score.min(100);

        let suggested: Vec<String> = industry_keywords
            .iter()
            .copied()
            .chain(self.lexicon.generic_skills().iter().copied())
            .filter(|candidate| {
                let candidate = candidate.to_lowercase();
                !names.iter().any(|name| *name == candidate)
            })
            .take(MAX_SUGGESTED_SKILLS)
            .map(str::to_string)
            .collect();
        analysis.improved_content = Some(ImprovedContent::Skills(suggested));

        debug!(section = SKILLS_SECTION, score = analysis.score, "skills analyzed");
        analysis
    }

    /// Runs every section analyzer and aggregates the results.
    ///
    /// Recommendations depend only on the overall score: two below 60, two
    /// more below 80.
    pub fn analyze_full_cv(&self, cv: &CvData, ctx: &AnalysisContext) -> FullCvAnalysis {
        let content = &cv.content;
        let summary = self.analyze_summary(&content.summary, ctx);
        let experience = self.analyze_experience(&content.experience, ctx);
        let skills = self.analyze_skills(&content.skills, ctx);

        let total = summary.score + experience.score + skills.score;
        let overall_score = mean_rounded(total, 3);

        let mut recommendations = Vec::new();
        if overall_score < 60 {
            recommendations
                .push("Add more quantifiable achievements and metrics throughout your CV".to_string());
            recommendations
                .push("Use stronger action verbs to describe your experience".to_string());
        }
        if overall_score < 80 {
            recommendations
                .push("Tailor your CV content to match the target role requirements".to_string());
            recommendations.push(
                "Include more industry-specific keywords to pass applicant tracking systems"
                    .to_string(),
            );
        }

        let mut section_analyses = BTreeMap::new();
        section_analyses.insert(SUMMARY_SECTION.to_string(), summary);
        section_analyses.insert(EXPERIENCE_SECTION.to_string(), experience);
        section_analyses.insert(SKILLS_SECTION.to_string(), skills);

        debug!(overall_score, "full CV analyzed");
        FullCvAnalysis {
            overall_score,
            section_analyses,
            recommendations,
        }
    }

    fn improve_text(&self, text: &str, ctx: &AnalysisContext) -> String {
        rewrite_text(text, self.lexicon.rewrites_for(ctx.industry))
    }
}

fn display_position(entry: &ExperienceEntry) -> &str {
    let position = entry.position.trim();
    if position.is_empty() {
        "an untitled position"
    } else {
        position
    }
}

/// Integer mean rounded half up. `count` must be non-zero.
fn mean_rounded(total: u32, count: usize) -> u32 {
    (f64::from(total) / count as f64).round() as u32
}
