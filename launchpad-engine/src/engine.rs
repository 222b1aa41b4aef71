//! The decision engine facade.
//!
//! Bundles the four scoring components behind the operations callers use,
//! and runs the full candidate assessment flow in one call:
//!
//! ```text
//! Profile + Startup ──► SkillGapAnalyzer ──► CompatibilityScorer ──┐
//!        │                                                         ├──► InsightNarrator
//!        └────────────► TrustScoreCalculator ─────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use launchpad_model::{Profile, Startup};

use crate::compatibility::{CompatibilityAnalysis, CompatibilityScorer, QuickFit};
use crate::config::EngineConfig;
use crate::insight::{FounderInsights, InsightNarrator, TalentInsights};
use crate::skill_gap::{SkillGapAnalyzer, SkillGapReport};
use crate::trust::{TrustScore, TrustScoreCalculator};
use crate::types::{AiInsight, Result};

/// Everything known about one candidate for one startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAssessment {
    /// Team gaps with the supplied team skills counted
    pub skill_gap: SkillGapReport,
    /// Fit against those gaps
    pub compatibility: CompatibilityAnalysis,
    /// Candidate's trust score
    pub trust: TrustScore,
    /// Candidate-facing narration
    pub insights: TalentInsights,
    /// Trust score narrated
    pub trust_insight: AiInsight,
}

/// Stateless facade over the scoring components.
///
/// Safe to share across threads; every method only reads its arguments and
/// the immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: EngineConfig,
    analyzer: SkillGapAnalyzer,
    trust: TrustScoreCalculator,
    scorer: CompatibilityScorer,
    narrator: InsightNarrator,
}

impl DecisionEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            base_score = config.compatibility.base_score,
            gap_fill_bonus = config.compatibility.gap_fill_bonus,
            relevance_bonus = config.compatibility.relevance_bonus,
            "Decision engine configured"
        );
        Ok(Self {
            analyzer: SkillGapAnalyzer::new(),
            trust: TrustScoreCalculator::new(),
            scorer: CompatibilityScorer::new(config.compatibility.clone()),
            narrator: InsightNarrator::new(&config),
            config,
        })
    }

    /// Create an engine from YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::new(EngineConfig::from_yaml(yaml)?)
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gap report for a startup, counting `candidate_skills` as team skills.
    pub fn analyze_skill_gap<S: AsRef<str>>(&self, startup: &Startup, candidate_skills: &[S]) -> SkillGapReport {
        self.analyzer.analyze(startup, candidate_skills)
    }

    /// Trust score as of now.
    pub fn calculate_trust_score(&self, profile: &Profile) -> TrustScore {
        self.trust.calculate(profile)
    }

    /// Trust score as of `now`.
    pub fn calculate_trust_score_at(&self, profile: &Profile, now: DateTime<Utc>) -> TrustScore {
        self.trust.calculate_at(profile, now)
    }

    /// Compatibility of a candidate with a startup.
    pub fn score_compatibility<S: AsRef<str>>(
        &self,
        candidate: &Profile,
        startup: &Startup,
        team_skills: &[S],
        base_score: Option<f64>,
    ) -> CompatibilityAnalysis {
        self.scorer.score(candidate, startup, team_skills, base_score)
    }

    /// Lightweight fit for browse cards.
    pub fn quick_fit(&self, candidate: &Profile, startup: &Startup) -> QuickFit {
        self.scorer.quick_fit(candidate, startup)
    }

    /// Founder dashboard insights.
    pub fn generate_founder_insights<S: AsRef<str>>(
        &self,
        startup: &Startup,
        interested_skills: &[S],
        interest_count: u32,
    ) -> FounderInsights {
        self.narrator.founder_insights(startup, interested_skills, interest_count)
    }

    /// Candidate-facing insights.
    pub fn generate_talent_insights(
        &self,
        candidate: &Profile,
        startup: &Startup,
        match_score: Option<f64>,
    ) -> TalentInsights {
        self.narrator.talent_insights(candidate, startup, match_score)
    }

    /// Trust score narrated as an insight.
    pub fn generate_trust_insight(&self, trust: &TrustScore) -> AiInsight {
        self.narrator.trust_insight(trust)
    }

    /// Run the whole assessment flow for one candidate as of now.
    pub fn assess_candidate<S: AsRef<str>>(
        &self,
        candidate: &Profile,
        startup: &Startup,
        team_skills: &[S],
        base_score: Option<f64>,
    ) -> CandidateAssessment {
        self.assess_candidate_at(candidate, startup, team_skills, base_score, Utc::now())
    }

    /// Run the whole assessment flow for one candidate as of `now`.
    pub fn assess_candidate_at<S: AsRef<str>>(
        &self,
        candidate: &Profile,
        startup: &Startup,
        team_skills: &[S],
        base_score: Option<f64>,
        now: DateTime<Utc>,
    ) -> CandidateAssessment {
        let skill_gap = self.analyzer.analyze(startup, team_skills);
        let compatibility = self
            .scorer
            .score_with_report(candidate, startup, &skill_gap, base_score);
        let trust = self.trust.calculate_at(candidate, now);
        let insights = self
            .narrator
            .narrate_talent(candidate, startup, compatibility.clone());
        let trust_insight = self.narrator.trust_insight(&trust);

        CandidateAssessment {
            skill_gap,
            compatibility,
            trust,
            insights,
            trust_insight,
        }
    }
}
