//! Candidate-facing narration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_model::{Profile, Startup};

use super::plural;
use crate::compatibility::CompatibilityAnalysis;
use crate::config::InsightConfig;
use crate::types::{AiInsight, InsightCategory};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Everything shown to a candidate viewing one startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TalentInsights {
    /// Analysis the insights were built from
    pub analysis: CompatibilityAnalysis,
    /// Overall fit, with the score arithmetic as reasoning
    pub fit_summary: AiInsight,
    /// Up to four reasons the candidate fits
    pub why_good_fit: Vec<String>,
    /// What changes for the team if the candidate joins
    pub impact_prediction: AiInsight,
}

pub(super) fn narrate(
    config: &InsightConfig,
    candidate: &Profile,
    startup: &Startup,
    analysis: CompatibilityAnalysis,
) -> TalentInsights {
    let subject = format!("{}:{}", candidate.id, startup.id);

    let fit_summary = fit_insight(config, &subject, &analysis);
    let why_good_fit = why_good_fit(config, startup, &analysis);
    let impact_prediction = impact_insight(config, &subject, &analysis);

    debug!(
        candidate_id = %candidate.id,
        startup_id = %startup.id,
        score = analysis.compatibility_score,
        reasons = why_good_fit.len(),
        "Talent insights narrated"
    );

    TalentInsights {
        analysis,
        fit_summary,
        why_good_fit,
        impact_prediction,
    }
}

fn fit_insight(config: &InsightConfig, subject: &str, analysis: &CompatibilityAnalysis) -> AiInsight {
    let c = &analysis.components;
    let mut insight = AiInsight::new(
        InsightCategory::TalentFit,
        subject,
        analysis.quality.badge(),
        analysis.fit_summary.clone(),
        analysis.compatibility_score,
    )
    .with_reason(format!("Starting from a base score of {}.", c.base));

    if c.gap_fill_bonus > 0 {
        insight = insight.with_reason(format!(
            "+{} for filling {}.",
            c.gap_fill_bonus,
            plural(analysis.skill_gaps_covered.len(), "open gap")
        ));
    }
    if c.relevance_bonus > 0 {
        insight = insight.with_reason(format!(
            "+{} for {}.",
            c.relevance_bonus,
            plural(analysis.relevant_skills.len(), "stage-relevant skill")
        ));
    }
    if c.raw > 100.0 {
        insight = insight.with_reason("Capped at 100.");
    } else if c.raw < 0.0 {
        insight = insight.with_reason("Raised to the minimum of 0.");
    }
    if !analysis.skill_gaps_remaining.is_empty() {
        let shown: Vec<&str> = analysis
            .skill_gaps_remaining
            .iter()
            .take(config.max_displayed_risks)
            .map(String::as_str)
            .collect();
        insight = insight.with_reason(format!("Still open on the team: {}.", shown.join(", ")));
    }
    insight
}

fn why_good_fit(config: &InsightConfig, startup: &Startup, analysis: &CompatibilityAnalysis) -> Vec<String> {
    let mut reasons = analysis.strengths.clone();
    if let Some(note) = &analysis.optional_insight {
        reasons.push(note.clone());
    }
    if !analysis.relevant_skills.is_empty() {
        reasons.push(format!(
            "You bring {}, which the {} stage relies on.",
            analysis.relevant_skills.join(", "),
            startup.stage.label()
        ));
    }
    reasons.truncate(config.max_fit_reasons);
    reasons
}

fn impact_insight(config: &InsightConfig, subject: &str, analysis: &CompatibilityAnalysis) -> AiInsight {
    let fills_gap = !analysis.skill_gaps_covered.is_empty();
    let mut insight = AiInsight::new(
        InsightCategory::TeamImpact,
        subject,
        "Team impact",
        analysis.team_impact_prediction.clone(),
        if fills_gap { 75 } else { 35 },
    );

    if fills_gap {
        insight = insight.with_reason(format!("Covers: {}.", analysis.skill_gaps_covered.join(", ")));
    }
    if analysis.skill_gaps_remaining.is_empty() {
        insight = insight.with_reason("No core gaps would remain after joining.");
    } else {
        let shown: Vec<&str> = analysis
            .skill_gaps_remaining
            .iter()
            .take(config.max_displayed_risks)
            .map(String::as_str)
            .collect();
        insight = insight.with_reason(format!("Still missing after joining: {}.", shown.join(", ")));
    }
    insight
}

#[cfg(test)]
mod tests {
    use crate::insight::InsightNarrator;
    use crate::types::{ConfidenceLevel, InsightCategory};
    use launchpad_model::{Profile, Startup, StartupStage, UserRole};

    fn startup(stage: StartupStage) -> Startup {
        let founder = Profile::new("f1", UserRole::Founder);
        Startup::new("s1", "Acme", stage, founder).with_industry("Developer Tools")
    }

    fn candidate(skills: &[&str]) -> Profile {
        Profile::new("c1", UserRole::Talent).with_skills(skills.iter().copied())
    }

    #[test]
    fn test_fit_summary_explains_score() {
        let narrator = InsightNarrator::default();
        let insights = narrator.talent_insights(&candidate(&["React", "TypeScript"]), &startup(StartupStage::Mvp), None);

        let fit = &insights.fit_summary;
        assert_eq!(fit.id, "talent_fit:c1:s1");
        assert_eq!(fit.category, InsightCategory::TalentFit);
        // 50 + 20 + 10
        assert_eq!(insights.analysis.compatibility_score, 80);
        assert_eq!(fit.title, "🔥 Excellent Match");
        assert_eq!(fit.confidence, ConfidenceLevel::High);
        assert_eq!(
            fit.reasoning,
            vec![
                "Starting from a base score of 50.",
                "+20 for filling 2 open gaps.",
                "+10 for 2 stage-relevant skills.",
                "Still open on the team: UI/UX Design, Product Management.",
            ]
        );
    }

    #[test]
    fn test_match_score_overrides_base() {
        let narrator = InsightNarrator::default();
        let insights = narrator.talent_insights(&candidate(&[]), &startup(StartupStage::Mvp), Some(72.0));
        assert_eq!(insights.analysis.compatibility_score, 72);
        assert_eq!(insights.fit_summary.reasoning[0], "Starting from a base score of 72.");
    }

    #[test]
    fn test_capped_score_is_explained() {
        let narrator = InsightNarrator::default();
        let everything = candidate(&["Backend Development", "DevOps", "Marketing", "Sales", "Product Management"]);
        let insights = narrator.talent_insights(&everything, &startup(StartupStage::EarlyStage), Some(90.0));
        assert_eq!(insights.analysis.compatibility_score, 100);
        assert!(insights.fit_summary.reasoning.iter().any(|r| r == "Capped at 100."));
        assert_eq!(
            insights.impact_prediction.reasoning.last().unwrap(),
            "No core gaps would remain after joining."
        );
    }

    #[test]
    fn test_why_good_fit_capped_at_four() {
        let narrator = InsightNarrator::default();
        // Strengths (gaps, stage, industry), priority note, relevance: five candidates.
        let insights = narrator.talent_insights(
            &candidate(&["React", "Developer Experience"]),
            &startup(StartupStage::Mvp),
            None,
        );
        assert_eq!(insights.analysis.strengths.len(), 3);
        assert!(insights.analysis.optional_insight.is_some());
        assert_eq!(insights.why_good_fit.len(), 4);
        assert_eq!(insights.why_good_fit[0], "Fills open skill gaps: React.");
    }

    #[test]
    fn test_impact_without_gap_fill() {
        let narrator = InsightNarrator::default();
        let insights = narrator.talent_insights(&candidate(&["Cooking"]), &startup(StartupStage::Growth), None);
        let impact = &insights.impact_prediction;
        assert_eq!(impact.id, "team_impact:c1:s1");
        assert_eq!(impact.confidence, ConfidenceLevel::Low);
        assert!(!impact.summary.contains('%'));
        // Five gaps remain but only three are listed.
        assert_eq!(
            impact.reasoning,
            vec!["Still missing after joining: Data Analysis, Sales, Marketing."]
        );
    }
}
