//! Property tests for the scoring invariants.

use chrono::{Duration, TimeZone, Utc};
use launchpad_engine::{DecisionEngine, SkillGapAnalyzer};
use launchpad_model::{required_skills, Profile, Startup, StartupStage, UserRole};
use proptest::prelude::*;

const SKILL_POOL: &[&str] = &[
    "React",
    "TypeScript",
    "UI/UX Design",
    "Product Management",
    "Business Development",
    "Market Research",
    "Backend Development",
    "DevOps",
    "Marketing",
    "Sales",
    "Data Analysis",
    "Customer Success",
    "Engineering Management",
    "Operations",
    "Finance",
    "Cooking",
    "react",
];

fn stage() -> impl Strategy<Value = StartupStage> {
    prop::sample::select(StartupStage::all())
}

fn skills() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(SKILL_POOL), 0..10)
        .prop_map(|v| v.into_iter().map(String::from).collect())
}

fn startup(stage: StartupStage, founder_skills: Vec<String>) -> Startup {
    let founder = Profile::new("f", UserRole::Founder).with_skills(founder_skills);
    Startup::new("s", "Acme", stage, founder)
}

proptest! {
    #[test]
    fn completion_is_order_independent(stage in stage(), team in skills(), seed in any::<u64>()) {
        let analyzer = SkillGapAnalyzer::new();
        let s = startup(stage, vec![]);

        let mut shuffled = team.clone();
        // Deterministic rotation stands in for a shuffle.
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
        }
        shuffled.reverse();

        let a = analyzer.analyze(&s, &team);
        let b = analyzer.analyze(&s, &shuffled);
        prop_assert_eq!(a.completion_percentage, b.completion_percentage);
        prop_assert_eq!(a.missing_skills, b.missing_skills);
    }

    #[test]
    fn completion_never_drops_as_skills_are_added(stage in stage(), team in skills(), extra in skills()) {
        let analyzer = SkillGapAnalyzer::new();
        let s = startup(stage, vec![]);

        let mut grown = team.clone();
        grown.extend(extra);

        let before = analyzer.analyze(&s, &team);
        let after = analyzer.analyze(&s, &grown);
        prop_assert!(after.completion_percentage >= before.completion_percentage);
        if required_skills(stage).is_empty() {
            prop_assert_eq!(before.completion_percentage, 100);
            prop_assert!(before.missing_skills.is_empty());
        }
    }

    #[test]
    fn compatibility_stays_in_range(
        stage in stage(),
        founder in skills(),
        candidate in skills(),
        team in skills(),
        base in prop::option::of(-500.0f64..500.0),
    ) {
        let engine = DecisionEngine::default();
        let s = startup(stage, founder);
        let c = Profile::new("c", UserRole::Talent).with_skills(candidate);

        let analysis = engine.score_compatibility(&c, &s, &team, base);
        prop_assert!(analysis.compatibility_score <= 100);
        prop_assert!(analysis.projected_completion <= 100);
        prop_assert!(engine.quick_fit(&c, &s).score <= 100);
    }

    #[test]
    fn trust_is_a_capped_sum(
        completeness in 0u8..=120,
        github in any::<bool>(),
        linkedin in any::<bool>(),
        age_days in 0i64..400,
        idle_days in prop::option::of(0i64..30),
        endorsements in 0u32..1000,
    ) {
        let engine = DecisionEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let mut profile = Profile::new("p", UserRole::Talent)
            .with_completeness(completeness)
            .with_created_at(now - Duration::days(age_days))
            .with_endorsements(endorsements);
        if github {
            profile = profile.with_github("https://github.com/p");
        }
        if linkedin {
            profile = profile.with_linkedin("https://linkedin.com/in/p");
        }
        if let Some(idle) = idle_days {
            profile = profile.with_last_active_at(now - Duration::days(idle));
        }

        let trust = engine.calculate_trust_score_at(&profile, now);
        let sum: u32 = trust.breakdown.iter().map(|i| u32::from(i.points)).sum();
        prop_assert_eq!(u32::from(trust.total), sum);
        prop_assert!(trust.total <= 100);
        for item in &trust.breakdown {
            prop_assert!(item.points <= item.max);
        }

        // Same inputs, same score.
        prop_assert_eq!(engine.calculate_trust_score_at(&profile.clone(), now), trust);
    }
}
