//! Configuration for the decision engine.

use serde::{Deserialize, Serialize};

use crate::types::{EngineError, Result};

/// Configuration for the decision engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Compatibility scoring weights
    pub compatibility: CompatibilityConfig,
    /// Narration limits
    pub insights: InsightConfig,
}

impl EngineConfig {
    /// Load config from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would break the score range or output caps.
    pub fn validate(&self) -> Result<()> {
        let c = &self.compatibility;
        if !(0.0..=100.0).contains(&c.base_score) {
            return Err(EngineError::ConfigError(format!(
                "compatibility.base_score must be within 0-100, got {}",
                c.base_score
            )));
        }
        if self.insights.max_next_actions == 0 {
            return Err(EngineError::ConfigError(
                "insights.max_next_actions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compatibility scoring weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityConfig {
    /// Score used when the caller has no base match score
    pub base_score: f64,
    /// Points per open gap the candidate fills
    pub gap_fill_bonus: u32,
    /// Points per stage-required skill the candidate has
    pub relevance_bonus: u32,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            gap_fill_bonus: 10,
            relevance_bonus: 5,
        }
    }
}

/// Narration limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Maximum founder next actions
    pub max_next_actions: usize,
    /// Maximum "why you fit" bullets for talent
    pub max_fit_reasons: usize,
    /// Maximum remaining gaps mentioned in narration
    pub max_displayed_risks: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            max_next_actions: 3,
            max_fit_reasons: 4,
            max_displayed_risks: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.compatibility.base_score, 50.0);
        assert_eq!(config.compatibility.gap_fill_bonus, 10);
        assert_eq!(config.compatibility.relevance_bonus, 5);
        assert_eq!(config.insights.max_next_actions, 3);
        assert_eq!(config.insights.max_fit_reasons, 4);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = EngineConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.insights.max_displayed_risks, 3);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let parsed = EngineConfig::from_yaml("compatibility:\n  base_score: 60\n").unwrap();
        assert_eq!(parsed.compatibility.base_score, 60.0);
        assert_eq!(parsed.compatibility.gap_fill_bonus, 10);
        assert_eq!(parsed.insights.max_next_actions, 3);
    }

    #[test]
    fn test_invalid_base_score_rejected() {
        let err = EngineConfig::from_yaml("compatibility:\n  base_score: 140\n").unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }
}
