//! Founder-facing narration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_model::catalog::{primary_role_for_skill, stage_focus};
use launchpad_model::Startup;

use super::plural;
use crate::config::InsightConfig;
use crate::skill_gap::SkillGapReport;
use crate::types::{with_article, AiInsight, InsightCategory};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Everything shown on a founder's dashboard for one startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct FounderInsights {
    /// Gap report the insights were built from
    pub skill_gap: SkillGapReport,
    /// Overall team health
    pub health_summary: AiInsight,
    /// At most three actions, in fixed order: hiring, engagement, stage
    pub next_actions: Vec<AiInsight>,
    /// Most urgent hire, absent when nothing is missing
    pub hiring_priority: Option<AiInsight>,
}

pub(super) fn narrate(
    config: &InsightConfig,
    startup: &Startup,
    report: SkillGapReport,
    interest_count: u32,
) -> FounderInsights {
    let health_summary = health_summary(startup, &report, interest_count);

    let mut next_actions: Vec<AiInsight> = [
        hiring_action(startup, &report),
        Some(engagement_action(startup, interest_count)),
        stage_action(startup, &report),
    ]
    .into_iter()
    .flatten()
    .take(config.max_next_actions)
    .collect();
    for (index, action) in next_actions.iter_mut().enumerate() {
        action.id = format!("{}:{}:{}", InsightCategory::NextAction.as_str(), startup.id, index);
    }

    let hiring_priority = hiring_priority(startup, &report);

    debug!(
        startup_id = %startup.id,
        completion = report.completion_percentage,
        actions = next_actions.len(),
        has_priority = hiring_priority.is_some(),
        "Founder insights narrated"
    );

    FounderInsights {
        skill_gap: report,
        health_summary,
        next_actions,
        hiring_priority,
    }
}

fn health_summary(startup: &Startup, report: &SkillGapReport, interest_count: u32) -> AiInsight {
    let stage = startup.stage.label();
    let pct = report.completion_percentage;
    let top_gap = report.missing_skills.first().map(String::as_str).unwrap_or("your next hire");

    let (title, summary) = if pct >= 80 {
        (
            "Strong team foundation",
            format!("Your team covers {pct}% of the core skills for the {stage} stage."),
        )
    } else if pct >= 50 {
        (
            "Solid progress with gaps",
            format!("Your team covers {pct}% of the core {stage} skills. The biggest gap is {top_gap}."),
        )
    } else {
        (
            "Critical skill gaps",
            format!("Your team covers only {pct}% of the core {stage} skills. Start with {top_gap}."),
        )
    };

    let interest = if interest_count == 0 {
        format!("No candidates have expressed interest in {} yet.", startup.name)
    } else {
        format!(
            "{} expressed interest in {}.",
            plural(interest_count as usize, "candidate"),
            startup.name
        )
    };

    let mut support = 0u32;
    if report.total_required() > 0 {
        support += 40;
    }
    support += (10 * report.team_skills.len() as u32).min(30);
    support += interest_count.saturating_mul(10).min(30);

    AiInsight::new(InsightCategory::TeamHealth, &startup.id, title, summary, support as u8)
        .with_reason(interest)
        .with_reason(format!("At the {stage} stage, focus on {}.", stage_focus(startup.stage)))
        .with_reason(format!(
            "The team covers {} of {} required skills.",
            report.covered_count(),
            report.total_required()
        ))
}

fn hiring_action(startup: &Startup, report: &SkillGapReport) -> Option<AiInsight> {
    let role = report.suggested_roles.first()?;
    let skill = report
        .missing_skills
        .iter()
        .find(|s| primary_role_for_skill(s) == Some(role.as_str()))?;

    let mut insight = AiInsight::new(
        InsightCategory::NextAction,
        &startup.id,
        format!("Hire {}", with_article(role)),
        format!("Adding {} would close your {} gap.", with_article(role), skill),
        70,
    )
    .with_reason(format!(
        "{} is missing from a team that needs {} core {} skills.",
        skill,
        report.total_required(),
        startup.stage.label()
    ));

    let others: Vec<&str> = report
        .missing_skills
        .iter()
        .filter(|s| *s != skill)
        .map(String::as_str)
        .collect();
    if !others.is_empty() {
        insight = insight.with_reason(format!("Other open gaps: {}.", others.join(", ")));
    }
    Some(insight)
}

fn engagement_action(startup: &Startup, interest_count: u32) -> AiInsight {
    if interest_count > 0 {
        let verb = if interest_count == 1 { "has" } else { "have" };
        AiInsight::new(
            InsightCategory::NextAction,
            &startup.id,
            "Follow up with interested candidates",
            format!(
                "{} {} shown interest in {}. Reach out while the interest is fresh.",
                plural(interest_count as usize, "candidate"),
                verb,
                startup.name
            ),
            50,
        )
        .with_reason("Quick replies turn interest into conversations.")
    } else {
        AiInsight::new(
            InsightCategory::NextAction,
            &startup.id,
            "Raise your startup's visibility",
            format!(
                "No candidates have shown interest in {} yet. Sharpen the pitch and share it with your network.",
                startup.name
            ),
            40,
        )
        .with_reason("Listings with a clear pitch and stage attract more candidates.")
    }
}

fn stage_action(startup: &Startup, report: &SkillGapReport) -> Option<AiInsight> {
    let skill = report.priority_gap()?;
    let stage = startup.stage.label();
    Some(
        AiInsight::new(
            InsightCategory::NextAction,
            &startup.id,
            format!("Prioritize {skill}"),
            format!("{skill} is critical at the {stage} stage for {}.", stage_focus(startup.stage)),
            60,
        )
        .with_reason(format!("{skill} is one of the {stage} stage's priority skills.")),
    )
}

fn hiring_priority(startup: &Startup, report: &SkillGapReport) -> Option<AiInsight> {
    let first_missing = report.missing_skills.first()?;
    let priority = report.priority_gap();
    let skill = priority.unwrap_or(first_missing.as_str());
    let stage = startup.stage.label();

    let summary = match report.suggested_roles.first() {
        Some(role) => format!(
            "Close the {} gap first. The first suggested hire is {}.",
            skill,
            with_article(role)
        ),
        None => format!("Your most urgent gap is {skill}, which no single catalog role covers."),
    };

    let (reason, support) = match priority {
        Some(_) => (format!("{skill} is a priority skill at the {stage} stage."), 80),
        None => (
            format!("None of the {stage} stage's priority skills are missing, so the first open gap leads."),
            60,
        ),
    };

    Some(
        AiInsight::new(
            InsightCategory::HiringPriority,
            &startup.id,
            format!("Hiring priority: {skill}"),
            summary,
            support,
        )
        .with_reason(reason)
        .with_reason(format!("Team coverage is {}%.", report.completion_percentage)),
    )
}
