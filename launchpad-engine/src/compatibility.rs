//! Candidate-to-startup compatibility scoring.
//!
//! The score starts from a base match score and adds bonuses for filling
//! open gaps and for general stage relevance. A skill that is both an open
//! gap and a stage requirement earns both bonuses; the two are stacked on
//! purpose and the result is only clamped, never re-weighted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_model::catalog::{primary_role_for_skill, stage_appeal, stage_focus, stage_priority_skills};
use launchpad_model::{Profile, SkillSet, Startup};

use crate::config::CompatibilityConfig;
use crate::skill_gap::{SkillGapAnalyzer, SkillGapReport};
use crate::types::with_article;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Role used when the startup has no open gaps and the candidate's own skills
/// map to nothing in the catalog.
const FALLBACK_ROLE: &str = "Founding Team Member";

/// Four-tier match quality shared by every surface that shows a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Below 40
    Potential,
    /// 40-59
    Fair,
    /// 60-79
    Good,
    /// 80 and above
    Excellent,
}

impl QualityTier {
    /// Tier for a 0-100 compatibility score.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Fair
        } else {
            Self::Potential
        }
    }

    /// Emoji badge
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Excellent => "🔥",
            Self::Good => "✨",
            Self::Fair => "👍",
            Self::Potential => "🌱",
        }
    }

    /// Text label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Good => "Good Match",
            Self::Fair => "Fair Match",
            Self::Potential => "Potential Match",
        }
    }

    /// Emoji and label together, e.g. "🔥 Excellent Match"
    pub fn badge(&self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }
}

/// The role a candidate would most likely take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct RecommendedRole {
    /// Role title
    pub title: String,
    /// What the role would own
    pub responsibility: String,
}

/// How the compatibility score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ScoreComponents {
    /// Starting score
    pub base: f64,
    /// Bonus for open gaps filled
    pub gap_fill_bonus: u32,
    /// Bonus for stage-required skills held
    pub relevance_bonus: u32,
    /// Sum before clamping
    pub raw: f64,
}

/// Full explanation of a candidate/startup match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CompatibilityAnalysis {
    /// Clamped 0-100
    pub compatibility_score: u8,
    /// Tier derived from the score
    pub quality: QualityTier,
    /// One-sentence summary
    pub fit_summary: String,
    /// Why the candidate fits
    pub strengths: Vec<String>,
    /// One entry per gap the candidate leaves open (uncapped)
    pub risks: Vec<String>,
    /// Most likely role
    pub recommended_role: RecommendedRole,
    /// Open gaps the candidate fills
    pub skill_gaps_covered: Vec<String>,
    /// Open gaps still open if the candidate joins
    pub skill_gaps_remaining: Vec<String>,
    /// Required skills the candidate has, gap or not
    pub relevant_skills: Vec<String>,
    /// Projected effect on team coverage
    pub team_impact_prediction: String,
    /// Coverage after the candidate joins (0-100)
    pub projected_completion: u8,
    /// Extra note when the candidate covers a stage priority
    pub optional_insight: Option<String>,
    /// Score arithmetic
    pub components: ScoreComponents,
}

/// Result of the lightweight talent-side fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct QuickFit {
    /// Clamped 0-100
    pub score: u8,
    /// Tier derived from the score
    pub quality: QualityTier,
}

/// Scores how well a candidate fits a startup.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    config: CompatibilityConfig,
    analyzer: SkillGapAnalyzer,
}

impl CompatibilityScorer {
    /// Create a scorer with the given weights.
    pub fn new(config: CompatibilityConfig) -> Self {
        Self {
            config,
            analyzer: SkillGapAnalyzer::new(),
        }
    }

    /// Score `candidate` against `startup`.
    ///
    /// `existing_team_skills` are counted as already on the team when the
    /// gap report is built. `base_match_score` replaces the configured base
    /// score when given.
    pub fn score<S: AsRef<str>>(
        &self,
        candidate: &Profile,
        startup: &Startup,
        existing_team_skills: &[S],
        base_match_score: Option<f64>,
    ) -> CompatibilityAnalysis {
        let report = self.analyzer.analyze(startup, existing_team_skills);
        self.score_with_report(candidate, startup, &report, base_match_score)
    }

    /// Score against a gap report the caller already has.
    pub fn score_with_report(
        &self,
        candidate: &Profile,
        startup: &Startup,
        report: &SkillGapReport,
        base_match_score: Option<f64>,
    ) -> CompatibilityAnalysis {
        let candidate_skills: SkillSet = candidate.skills.iter().collect();

        let matched: Vec<String> = report
            .missing_skills
            .iter()
            .filter(|gap| candidate_skills.contains(gap))
            .cloned()
            .collect();
        let remaining: Vec<String> = report
            .missing_skills
            .iter()
            .filter(|gap| !candidate_skills.contains(gap))
            .cloned()
            .collect();
        let relevant: Vec<String> = report
            .required_skills
            .iter()
            .filter(|req| candidate_skills.contains(req))
            .cloned()
            .collect();

        let components = self.components(base_match_score, matched.len(), relevant.len());
        let score = clamp_score(components.raw);
        let quality = QualityTier::from_score(score);

        let strengths = strengths(&candidate_skills, startup, &matched);
        let risks = remaining
            .iter()
            .map(|skill| format!("No one on the team covers {skill} yet."))
            .collect();
        let recommended_role = recommended_role(report, &candidate_skills, startup);
        let projected_completion = report.projected_completion(matched.len());
        let team_impact_prediction = team_impact(report, &matched, projected_completion);
        let optional_insight = priority_note(report, &matched);

        let fit_summary = fit_summary(candidate, startup, quality, &matched, &relevant);

        debug!(
            candidate_id = %candidate.id,
            startup_id = %startup.id,
            score = score,
            raw = components.raw,
            matched = matched.len(),
            relevant = relevant.len(),
            "Compatibility scored"
        );

        CompatibilityAnalysis {
            compatibility_score: score,
            quality,
            fit_summary,
            strengths,
            risks,
            recommended_role,
            skill_gaps_covered: matched,
            skill_gaps_remaining: remaining,
            relevant_skills: relevant,
            team_impact_prediction,
            projected_completion,
            optional_insight,
            components,
        }
    }

    /// The lightweight fit shown on talent browse cards: the founder is the
    /// whole team and no base match score is known.
    pub fn quick_fit(&self, candidate: &Profile, startup: &Startup) -> QuickFit {
        let report = self.analyzer.analyze::<&str>(startup, &[]);
        let candidate_skills: SkillSet = candidate.skills.iter().collect();
        let matched = report
            .missing_skills
            .iter()
            .filter(|gap| candidate_skills.contains(gap))
            .count();
        let relevant = report
            .required_skills
            .iter()
            .filter(|req| candidate_skills.contains(req))
            .count();
        let score = clamp_score(self.components(None, matched, relevant).raw);
        QuickFit {
            score,
            quality: QualityTier::from_score(score),
        }
    }

    fn components(&self, base: Option<f64>, matched: usize, relevant: usize) -> ScoreComponents {
        let base = base
            .filter(|b| b.is_finite())
            .unwrap_or(self.config.base_score);
        let gap_fill_bonus = self.config.gap_fill_bonus.saturating_mul(matched as u32);
        let relevance_bonus = self.config.relevance_bonus.saturating_mul(relevant as u32);
        ScoreComponents {
            base,
            gap_fill_bonus,
            relevance_bonus,
            raw: base + gap_fill_bonus as f64 + relevance_bonus as f64,
        }
    }
}

fn clamp_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

fn strengths(candidate_skills: &SkillSet, startup: &Startup, matched: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    if !matched.is_empty() {
        out.push(format!("Fills open skill gaps: {}.", matched.join(", ")));
    }
    out.push(stage_appeal(startup.stage).to_string());
    if let Some(skill) = industry_overlap(candidate_skills, &startup.industry) {
        out.push(format!(
            "{} experience lines up with the {} industry.",
            skill, startup.industry
        ));
    }
    out
}

/// First candidate skill that textually overlaps the industry string.
fn industry_overlap<'a>(candidate_skills: &'a SkillSet, industry: &str) -> Option<&'a str> {
    let industry = industry.trim().to_lowercase();
    if industry.is_empty() {
        return None;
    }
    let industry_words = words(&industry);

    candidate_skills.iter().find(|skill| {
        let skill = skill.to_lowercase();
        industry.contains(&skill)
            || skill.contains(&industry)
            || words(&skill).iter().any(|w| industry_words.contains(w))
    })
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 3)
        .map(str::to_string)
        .collect()
}

fn recommended_role(report: &SkillGapReport, candidate_skills: &SkillSet, startup: &Startup) -> RecommendedRole {
    let title = report
        .suggested_roles
        .first()
        .map(String::as_str)
        .or_else(|| candidate_skills.iter().find_map(primary_role_for_skill))
        .unwrap_or(FALLBACK_ROLE)
        .to_string();

    let company = match startup.name.trim() {
        "" => "the startup",
        name => name,
    };
    let responsibility = format!(
        "As {} at {}, you would own {} and shape how the team grows around it.",
        with_article(&title),
        company,
        stage_focus(startup.stage)
    );

    RecommendedRole { title, responsibility }
}

fn team_impact(report: &SkillGapReport, matched: &[String], projected: u8) -> String {
    if report.total_required() == 0 {
        return "This startup has no stage-specific requirements yet, so the candidate would broaden the team's overall range.".to_string();
    }
    if matched.is_empty() {
        return "Would strengthen existing capabilities and add depth rather than closing an open gap.".to_string();
    }
    let delta = projected.saturating_sub(report.completion_percentage);
    format!(
        "Team skill coverage would rise from {}% to {}% (+{} points) by adding {}.",
        report.completion_percentage,
        projected,
        delta,
        matched.join(", ")
    )
}

fn priority_note(report: &SkillGapReport, matched: &[String]) -> Option<String> {
    stage_priority_skills(report.stage)
        .iter()
        .find(|p| matched.iter().any(|m| m.eq_ignore_ascii_case(p)))
        .map(|skill| {
            format!(
                "{} is a priority at the {} stage, and this candidate covers it.",
                skill,
                report.stage.label()
            )
        })
}

fn fit_summary(
    candidate: &Profile,
    startup: &Startup,
    quality: QualityTier,
    matched: &[String],
    relevant: &[String],
) -> String {
    let name = candidate.display_name();
    match (matched.len(), relevant.len()) {
        (0, 0) => format!(
            "{}: {} brings skills outside {}'s current stage needs.",
            quality.label(),
            name,
            startup.name
        ),
        (0, r) => format!(
            "{}: {} matches {} of {}'s stage skills, none of them open gaps.",
            quality.label(),
            name,
            r,
            startup.name
        ),
        (m, _) => format!(
            "{}: {} fills {} open skill gap{} at {}.",
            quality.label(),
            name,
            m,
            if m == 1 { "" } else { "s" },
            startup.name
        ),
    }
}
