//! Shared output types: insight objects, confidence, and errors.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Coarse confidence attached to every generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Little data behind the insight
    Low,
    /// Some supporting data
    Medium,
    /// Well supported
    High,
}

impl ConfidenceLevel {
    /// Threshold a 0-100 support score: >=70 high, >=40 medium, else low.
    ///
    /// Every insight goes through this one function.
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::High
        } else if score >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Overall skill coverage of a founder's team
    TeamHealth,
    /// Something the founder should do next
    NextAction,
    /// The most urgent hire
    HiringPriority,
    /// How well a candidate fits a startup
    TalentFit,
    /// What changes if the candidate joins
    TeamImpact,
    /// Reputation of a profile
    Trust,
}

impl InsightCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamHealth => "team_health",
            Self::NextAction => "next_action",
            Self::HiringPriority => "hiring_priority",
            Self::TalentFit => "talent_fit",
            Self::TeamImpact => "team_impact",
            Self::Trust => "trust",
        }
    }
}

/// A user-facing, explainable insight.
///
/// `reasoning` is disclosure text for the UI. Nothing downstream branches on
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AiInsight {
    /// Deterministic id: `<category>:<subject>[:<index>]`
    pub id: String,
    /// Short headline
    pub title: String,
    /// One or two sentence summary
    pub summary: String,
    /// Ordered supporting sentences
    pub reasoning: Vec<String>,
    /// Thresholded confidence
    pub confidence: ConfidenceLevel,
    /// Raw support score the confidence was derived from (0-100)
    pub confidence_score: u8,
    /// Category tag
    pub category: InsightCategory,
}

impl AiInsight {
    /// Create an insight; confidence is derived from `confidence_score`.
    pub fn new(
        category: InsightCategory,
        subject: &str,
        title: impl Into<String>,
        summary: impl Into<String>,
        confidence_score: u8,
    ) -> Self {
        let confidence_score = confidence_score.min(100);
        Self {
            id: format!("{}:{}", category.as_str(), subject),
            title: title.into(),
            summary: summary.into(),
            reasoning: vec![],
            confidence: ConfidenceLevel::from_score(confidence_score),
            confidence_score,
            category,
        }
    }

    /// Append a reasoning sentence.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasoning.push(reason.into());
        self
    }

    /// Append several reasoning sentences.
    pub fn with_reasons<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reasoning.extend(reasons.into_iter().map(Into::into));
        self
    }
}

/// "a Product Manager" / "an Engineering Manager"
pub(crate) fn with_article(noun: &str) -> String {
    let article = match noun.chars().next() {
        Some(c) if "AEIOUaeiou".contains(c) => "an",
        _ => "a",
    };
    format!("{article} {noun}")
}

/// Error types for the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration parsed but is not usable
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(70), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(69), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(40), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(39), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_insight_id_and_confidence() {
        let insight = AiInsight::new(InsightCategory::Trust, "p1", "Trusted", "ok", 250)
            .with_reason("one")
            .with_reasons(["two", "three"]);
        assert_eq!(insight.id, "trust:p1");
        assert_eq!(insight.confidence_score, 100);
        assert_eq!(insight.confidence, ConfidenceLevel::High);
        assert_eq!(insight.reasoning.len(), 3);
    }

    #[test]
    fn test_insight_serializes_snake_case() {
        let insight = AiInsight::new(InsightCategory::TeamHealth, "s1", "t", "s", 10);
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["category"], "team_health");
        assert_eq!(json["confidence"], "low");
    }
}
