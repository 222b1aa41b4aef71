//! Fixed lookup tables: what each stage needs and who provides it.
//!
//! These tables are the whole knowledge base of the engine. They are small
//! and constant, so every analysis recomputes from them instead of caching.

use crate::types::StartupStage;

const IDEA_SKILLS: &[&str] = &["Product Management", "Business Development", "Market Research"];

const MVP_SKILLS: &[&str] = &["React", "TypeScript", "UI/UX Design", "Product Management"];

const EARLY_STAGE_SKILLS: &[&str] = &[
    "Backend Development",
    "DevOps",
    "Marketing",
    "Sales",
    "Product Management",
];

const GROWTH_SKILLS: &[&str] = &[
    "Data Analysis",
    "Sales",
    "Marketing",
    "DevOps",
    "Customer Success",
];

const SCALING_SKILLS: &[&str] = &[
    "Engineering Management",
    "Data Analysis",
    "DevOps",
    "Operations",
    "Finance",
];

/// Skill → roles that typically bring it. The first role is the primary one.
///
/// Market Research has no dedicated hire at this size of company and is
/// intentionally absent.
const SKILL_ROLES: &[(&str, &[&str])] = &[
    ("Product Management", &["Product Manager", "Technical Co-founder"]),
    ("Business Development", &["Business Development Lead", "Commercial Co-founder"]),
    ("React", &["Frontend Engineer", "Full-Stack Engineer"]),
    ("TypeScript", &["Full-Stack Engineer", "Frontend Engineer"]),
    ("UI/UX Design", &["Product Designer"]),
    ("Backend Development", &["Backend Engineer", "Full-Stack Engineer"]),
    ("DevOps", &["DevOps Engineer", "Site Reliability Engineer"]),
    ("Marketing", &["Growth Marketer", "Marketing Lead"]),
    ("Sales", &["Sales Lead", "Account Executive"]),
    ("Data Analysis", &["Data Analyst", "Data Scientist"]),
    ("Customer Success", &["Customer Success Manager"]),
    ("Engineering Management", &["Engineering Manager", "VP of Engineering"]),
    ("Operations", &["Operations Manager", "Chief Operating Officer"]),
    ("Finance", &["Finance Lead", "Chief Financial Officer"]),
];

/// Skills a startup at `stage` needs, in priority order.
///
/// Unknown stages need nothing.
pub fn required_skills(stage: StartupStage) -> &'static [&'static str] {
    match stage {
        StartupStage::Idea => IDEA_SKILLS,
        StartupStage::Mvp => MVP_SKILLS,
        StartupStage::EarlyStage => EARLY_STAGE_SKILLS,
        StartupStage::Growth => GROWTH_SKILLS,
        StartupStage::Scaling => SCALING_SKILLS,
        StartupStage::Unknown => &[],
    }
}

/// Roles that provide `skill`, matched case-insensitively.
pub fn roles_for_skill(skill: &str) -> &'static [&'static str] {
    let key = skill.trim();
    SKILL_ROLES
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(key))
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

/// The primary role for `skill`, if the catalog has one.
pub fn primary_role_for_skill(skill: &str) -> Option<&'static str> {
    roles_for_skill(skill).first().copied()
}

/// Skills a stage cannot move forward without. Subset of [`required_skills`].
pub fn stage_priority_skills(stage: StartupStage) -> &'static [&'static str] {
    match stage {
        StartupStage::Idea => &["Product Management", "Business Development"],
        StartupStage::Mvp => &["React", "TypeScript"],
        StartupStage::EarlyStage => &["Backend Development", "Sales"],
        StartupStage::Growth => &["Sales", "Marketing"],
        StartupStage::Scaling => &["Engineering Management", "Operations"],
        StartupStage::Unknown => &[],
    }
}

/// Why joining at this stage is attractive, one sentence.
pub fn stage_appeal(stage: StartupStage) -> &'static str {
    match stage {
        StartupStage::Idea => {
            "Joining at the idea stage means shaping the product and culture from day one."
        }
        StartupStage::Mvp => {
            "An MVP-stage team offers hands-on ownership of the first version customers will use."
        }
        StartupStage::EarlyStage => {
            "Early-stage startups offer broad ownership while the product finds its market."
        }
        StartupStage::Growth => {
            "A growth-stage startup offers proven traction and room to scale your impact."
        }
        StartupStage::Scaling => {
            "A scaling company offers the chance to build teams and systems that last."
        }
        StartupStage::Unknown => "This startup is still defining its stage, so roles stay flexible.",
    }
}

/// What a startup at this stage should be concentrating on.
pub fn stage_focus(stage: StartupStage) -> &'static str {
    match stage {
        StartupStage::Idea => "validating the problem and finding early adopters",
        StartupStage::Mvp => "shipping a usable product and learning from first users",
        StartupStage::EarlyStage => "reaching product-market fit and repeatable sales",
        StartupStage::Growth => "scaling acquisition while keeping customers successful",
        StartupStage::Scaling => "building the organisation and operational discipline",
        StartupStage::Unknown => "clarifying the stage so the team knows what to prioritise",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_requirements() {
        for stage in StartupStage::all() {
            let skills = required_skills(stage);
            assert!((2..=5).contains(&skills.len()), "{stage:?}");
        }
        assert!(required_skills(StartupStage::Unknown).is_empty());
    }

    #[test]
    fn test_priority_skills_are_required() {
        for stage in StartupStage::all() {
            let required = required_skills(stage);
            for skill in stage_priority_skills(stage) {
                assert!(required.contains(skill), "{skill} not required at {stage:?}");
            }
        }
    }

    #[test]
    fn test_role_lookup_is_case_insensitive() {
        assert_eq!(primary_role_for_skill("ui/ux design"), Some("Product Designer"));
        assert_eq!(primary_role_for_skill(" devops "), Some("DevOps Engineer"));
        assert_eq!(primary_role_for_skill("Market Research"), None);
        assert!(roles_for_skill("Basket Weaving").is_empty());
    }
}
