//! Skill gap analysis.
//!
//! Compares the skills a startup's stage calls for against the skills its
//! team (founder plus any interested candidates) already brings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_model::catalog::{self, stage_focus, stage_priority_skills};
use launchpad_model::{SkillSet, Startup, StartupStage};

use crate::types::with_article;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Which required skills a team has and lacks.
///
/// Derived on every call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SkillGapReport {
    /// Stage the requirements were looked up for
    pub stage: StartupStage,
    /// Skills the stage calls for, in catalog order
    pub required_skills: Vec<String>,
    /// Skills the team brings, deduplicated, first casing kept
    #[cfg_attr(feature = "typescript", ts(as = "Vec<String>"))]
    pub team_skills: SkillSet,
    /// Required skills nobody on the team has, in catalog order
    pub missing_skills: Vec<String>,
    /// Share of required skills covered (0-100)
    pub completion_percentage: u8,
    /// Primary roles for the missing skills, deduplicated
    pub suggested_roles: Vec<String>,
    /// Stage-specific advice
    pub stage_based_recommendations: Vec<String>,
}

impl SkillGapReport {
    /// Number of required skills
    pub fn total_required(&self) -> usize {
        self.required_skills.len()
    }

    /// Number of required skills the team covers
    pub fn covered_count(&self) -> usize {
        self.total_required().saturating_sub(self.missing_skills.len())
    }

    /// Whether nothing is missing
    pub fn is_fully_covered(&self) -> bool {
        self.missing_skills.is_empty()
    }

    /// Case-insensitive check against the missing list
    pub fn is_missing(&self, skill: &str) -> bool {
        self.missing_skills
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(skill.trim()))
    }

    /// Coverage if `additional` more required skills were covered, capped at 100.
    pub fn projected_completion(&self, additional: usize) -> u8 {
        completion_percentage(self.covered_count() + additional, self.total_required())
    }

    /// First missing skill that is a priority at this stage, in priority order.
    pub fn priority_gap(&self) -> Option<&str> {
        stage_priority_skills(self.stage)
            .iter()
            .find(|skill| self.is_missing(skill))
            .copied()
    }
}

/// `round(100 * covered / total)`, capped at 100. No requirements means
/// fully covered.
pub fn completion_percentage(covered: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (100.0 * covered as f64 / total as f64).round();
    pct.min(100.0) as u8
}

/// Derives [`SkillGapReport`]s from the catalog tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillGapAnalyzer;

impl SkillGapAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze a startup's team, counting `candidate_skills` as team skills.
    pub fn analyze<S: AsRef<str>>(&self, startup: &Startup, candidate_skills: &[S]) -> SkillGapReport {
        let mut team = SkillSet::new();
        team.extend(&startup.founder.skills);
        team.extend(candidate_skills);
        self.analyze_team(startup.stage, team)
    }

    /// Analyze an already assembled team skill set against a stage.
    pub fn analyze_team(&self, stage: StartupStage, team_skills: SkillSet) -> SkillGapReport {
        let required = catalog::required_skills(stage);

        let missing_skills: Vec<String> = required
            .iter()
            .filter(|skill| !team_skills.contains(skill))
            .map(|skill| skill.to_string())
            .collect();

        let completion = completion_percentage(required.len() - missing_skills.len(), required.len());

        let suggested_roles = suggested_roles(&missing_skills);

        let stage_based_recommendations = recommendations(stage, &missing_skills, &suggested_roles);

        debug!(
            stage = stage.as_str(),
            required = required.len(),
            missing = missing_skills.len(),
            completion = completion,
            "Skill gap analyzed"
        );

        SkillGapReport {
            stage,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            team_skills,
            missing_skills,
            completion_percentage: completion,
            suggested_roles,
            stage_based_recommendations,
        }
    }
}

/// Primary catalog role for each missing skill, first occurrence kept.
///
/// Skills without a role contribute nothing. Roles are compared ignoring
/// ASCII case.
pub fn suggested_roles<S: AsRef<str>>(missing: &[S]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for skill in missing {
        if let Some(role) = catalog::primary_role_for_skill(skill.as_ref()) {
            if !roles.iter().any(|r| r.eq_ignore_ascii_case(role)) {
                roles.push(role.to_string());
            }
        }
    }
    roles
}

fn recommendations(stage: StartupStage, missing: &[String], roles: &[String]) -> Vec<String> {
    if stage == StartupStage::Unknown {
        return vec!["Set a startup stage to get stage-specific recommendations.".to_string()];
    }

    if missing.is_empty() {
        return vec![format!(
            "Your team covers every core {} skill. Keep the focus on {}.",
            stage.label(),
            stage_focus(stage)
        )];
    }

    let mut out = Vec::new();
    for skill in stage_priority_skills(stage) {
        if missing.iter().any(|m| m.eq_ignore_ascii_case(skill)) {
            out.push(format!(
                "{} is critical at the {} stage for {}.",
                skill,
                stage.label(),
                stage_focus(stage)
            ));
        }
    }
    if let Some(role) = roles.first() {
        out.push(format!(
            "Hiring {} would close the most gaps for the least effort.",
            with_article(role)
        ));
    }
    out
}
