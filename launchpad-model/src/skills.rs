//! Case-insensitive skill sets.

use serde::{Deserialize, Serialize};

/// An insertion-ordered set of skills.
///
/// Membership is case-insensitive ("react" and "React" are the same skill),
/// but the first spelling seen is the one kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill. Returns `false` if it was already present or blank.
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let trimmed = skill.as_ref().trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.skills.push(trimmed.to_string());
        true
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, skill: &str) -> bool {
        let key = normalize(skill);
        self.skills.iter().any(|s| normalize(s) == key)
    }

    /// Skills in insertion order, original casing.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    /// Number of distinct skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills present in both sets, in `self`'s order.
    pub fn intersection<'a>(&'a self, other: &'a SkillSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |s| other.contains(s))
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    /// Consume into a vector
    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

impl<S: AsRef<str>> Extend<S> for SkillSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for skill in iter {
            self.insert(skill);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.skills
    }
}
