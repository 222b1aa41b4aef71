//! End-to-end flows across the model, engine, and guard crates.

use chrono::{Duration, Utc};
use launchpad_engine::{ConfidenceLevel, DecisionEngine, QualityTier, TrustLevel};
use launchpad_guard::{actions, GuardConfig, RateLimitGuard};
use launchpad_model::{Profile, Startup, StartupStage, UserRole};

fn mvp_startup() -> Startup {
    let founder = Profile::new("founder-1", UserRole::Founder)
        .with_full_name("Dana Founder")
        .with_skills(["React"]);
    Startup::new("startup-1", "Acme", StartupStage::Mvp, founder).with_industry("Developer Tools")
}

#[test]
fn endorsements_admitted_by_guard_raise_trust() {
    let engine = DecisionEngine::default();
    let guard = RateLimitGuard::in_memory(GuardConfig::default()).unwrap();
    let now = Utc::now();

    let profile = Profile::new("talent-1", UserRole::Talent)
        .with_completeness(90)
        .with_created_at(now - Duration::days(10))
        .with_last_active_at(now);
    let before = engine.calculate_trust_score_at(&profile, now);
    // Profile 30 + activity 15
    assert_eq!(before.total, 45);
    assert_eq!(before.level, TrustLevel::BuildingTrust);

    // One endorser tries to leave twelve endorsements in an hour.
    let admitted = (0..12)
        .filter(|_| guard.check_at("endorser-1", actions::ENDORSEMENT, now).allowed)
        .count() as u32;
    assert_eq!(admitted, 10);

    let profile = profile.with_endorsements(admitted);
    let after = engine.calculate_trust_score_at(&profile, now);
    // Endorsement points cap at 15 however many get through.
    assert_eq!(after.total, 60);
    assert_eq!(after.level, TrustLevel::Trusted);
    assert!(after.breakdown.iter().all(|item| item.points <= item.max));
}

#[test]
fn founder_and_candidate_views_agree() {
    let engine = DecisionEngine::default();
    let startup = mvp_startup();
    let candidate = Profile::new("talent-2", UserRole::Talent)
        .with_full_name("Sam Builder")
        .with_skills(["TypeScript", "UI/UX Design"]);

    let report = engine.analyze_skill_gap(&startup, &candidate.skills);
    assert_eq!(report.missing_skills, vec!["Product Management"]);
    assert_eq!(report.completion_percentage, 75);

    let founder_view = engine.generate_founder_insights(&startup, &candidate.skills, 1);
    assert_eq!(founder_view.skill_gap, report);
    assert!(!founder_view.next_actions.is_empty());

    let talent_view = engine.generate_talent_insights(&candidate, &startup, None);
    // 50 + 2 gaps filled + 2 relevant skills
    assert_eq!(talent_view.analysis.compatibility_score, 80);
    assert_eq!(talent_view.analysis.quality, QualityTier::Excellent);
    assert_eq!(talent_view.analysis.projected_completion, 75);
    assert_eq!(talent_view.fit_summary.confidence, ConfidenceLevel::High);
}

#[test]
fn full_assessment_for_a_candidate() {
    let engine = DecisionEngine::default();
    let now = Utc::now();
    let candidate = Profile::new("talent-3", UserRole::Talent)
        .with_skills(["Product Management"])
        .with_completeness(90)
        .with_github("https://github.com/talent-3")
        .with_linkedin("https://linkedin.com/in/talent-3")
        .with_created_at(now - Duration::days(100))
        .with_last_active_at(now)
        .with_endorsements(10);

    let assessment = engine.assess_candidate_at(&candidate, &mvp_startup(), &["TypeScript"], None, now);

    assert_eq!(assessment.skill_gap.missing_skills, vec!["UI/UX Design", "Product Management"]);
    assert_eq!(assessment.compatibility.skill_gaps_covered, vec!["Product Management"]);
    assert_eq!(assessment.compatibility.skill_gaps_remaining, vec!["UI/UX Design"]);
    assert_eq!(assessment.trust.total, 100);
    assert_eq!(assessment.trust.label(), "Highly Trusted");
    assert_eq!(assessment.trust_insight.confidence, ConfidenceLevel::High);
}
