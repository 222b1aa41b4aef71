//! Launchpad Decision-Support & Trust Engine
//!
//! Pure, explainable scoring over plain profile and startup records:
//!
//! - **Skill gaps**: which stage-required skills a team covers and lacks
//! - **Compatibility**: 0-100 fit between a candidate and a startup, with
//!   strengths, risks, a recommended role, and projected team impact
//! - **Trust**: 0-100 composite of five capped profile signals
//! - **Insights**: titled, reasoned, confidence-rated narration of the above
//!
//! Nothing here performs I/O, holds mutable state, or awaits. Every function
//! can be called from any number of threads at once.
//!
//! # Example
//!
//! ```ignore
//! use launchpad_engine::DecisionEngine;
//!
//! let engine = DecisionEngine::default();
//! let report = engine.analyze_skill_gap(&startup, &["TypeScript", "UI/UX Design"]);
//! let fit = engine.score_compatibility(&candidate, &startup, report.team_skills.as_slice(), None);
//! let insights = engine.generate_founder_insights(&startup, &interested_skills, 3);
//! ```

pub mod compatibility;
pub mod config;
pub mod engine;
pub mod insight;
pub mod skill_gap;
pub mod trust;
pub mod types;

// Re-export main types
pub use compatibility::{
    CompatibilityAnalysis, CompatibilityScorer, QualityTier, QuickFit, RecommendedRole,
    ScoreComponents,
};
pub use config::{CompatibilityConfig, EngineConfig, InsightConfig};
pub use engine::{CandidateAssessment, DecisionEngine};
pub use insight::{FounderInsights, InsightNarrator, TalentInsights};
pub use skill_gap::{completion_percentage, suggested_roles, SkillGapAnalyzer, SkillGapReport};
pub use trust::{TrustBreakdownItem, TrustLevel, TrustScore, TrustScoreCalculator};
pub use types::*;
