//! Insight narration.
//!
//! Turns gap reports, compatibility analyses, and trust scores into
//! explainable insight objects:
//! - **Founder insights**: team health, next actions, hiring priority
//! - **Talent insights**: fit summary, reasons to apply, team impact
//! - **Trust insight**: a trust score with its breakdown spelled out
//!
//! Narration is rule evaluation over the inputs. Nothing here is learned or
//! calls out to a model.

mod founder;
mod talent;

pub use founder::FounderInsights;
pub use talent::TalentInsights;

use launchpad_model::{Profile, Startup};

use crate::compatibility::{CompatibilityAnalysis, CompatibilityScorer};
use crate::config::{EngineConfig, InsightConfig};
use crate::skill_gap::SkillGapAnalyzer;
use crate::trust::TrustScore;
use crate::types::{AiInsight, InsightCategory};

/// Renders structured insights for founders and candidates.
#[derive(Debug, Clone, Default)]
pub struct InsightNarrator {
    config: InsightConfig,
    analyzer: SkillGapAnalyzer,
    scorer: CompatibilityScorer,
}

impl InsightNarrator {
    /// Create a narrator from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.insights.clone(),
            analyzer: SkillGapAnalyzer::new(),
            scorer: CompatibilityScorer::new(config.compatibility.clone()),
        }
    }

    /// Insights for the founder of `startup`.
    ///
    /// `interested_skills` are the skills of candidates who expressed
    /// interest; they count toward team coverage.
    pub fn founder_insights<S: AsRef<str>>(
        &self,
        startup: &Startup,
        interested_skills: &[S],
        interest_count: u32,
    ) -> FounderInsights {
        let report = self.analyzer.analyze(startup, interested_skills);
        founder::narrate(&self.config, startup, report, interest_count)
    }

    /// Insights for a candidate looking at `startup`.
    pub fn talent_insights(
        &self,
        candidate: &Profile,
        startup: &Startup,
        match_score: Option<f64>,
    ) -> TalentInsights {
        let analysis = self.scorer.score::<&str>(candidate, startup, &[], match_score);
        self.narrate_talent(candidate, startup, analysis)
    }

    /// Narrate a compatibility analysis the caller already computed.
    pub fn narrate_talent(
        &self,
        candidate: &Profile,
        startup: &Startup,
        analysis: CompatibilityAnalysis,
    ) -> TalentInsights {
        talent::narrate(&self.config, candidate, startup, analysis)
    }

    /// Present a trust score as an insight.
    pub fn trust_insight(&self, trust: &TrustScore) -> AiInsight {
        AiInsight::new(
            InsightCategory::Trust,
            &trust.profile_id,
            trust.label(),
            format!("Trust score {}/100 from profile, account, and community signals.", trust.total),
            trust.total,
        )
        .with_reasons(
            trust
                .breakdown
                .iter()
                .map(|item| format!("{}: {}/{} ({})", item.label, item.points, item.max, item.detail)),
        )
    }
}

/// "1 candidate" / "3 candidates"
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
