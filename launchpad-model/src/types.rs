//! Core records: profiles, startups, stages, and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Number of signals checked when completeness has to be derived.
const COMPLETENESS_CHECKS: u32 = 8;

/// Which side of the marketplace a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Runs a startup
    Founder,
    /// Looking to join a startup
    Talent,
}

impl UserRole {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Talent => "talent",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Talent
    }
}

impl FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "founder" => Ok(Self::Founder),
            "talent" => Ok(Self::Talent),
            other => Err(ModelError::UnknownRole(other.to_string())),
        }
    }
}

/// Lifecycle phase of a startup.
///
/// Stages are edited through a free-form form field upstream, so anything the
/// catalog does not recognise deserializes to [`StartupStage::Unknown`]
/// rather than failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum StartupStage {
    /// Validating the problem
    Idea,
    /// Building the first usable product
    Mvp,
    /// First customers, first hires
    EarlyStage,
    /// Repeatable acquisition
    Growth,
    /// Organisation building
    Scaling,
    /// Not a stage the catalog knows about
    #[serde(other)]
    Unknown,
}

impl StartupStage {
    /// Wire name, as stored by the repository
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Mvp => "mvp",
            Self::EarlyStage => "early_stage",
            Self::Growth => "growth",
            Self::Scaling => "scaling",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label for copy
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Mvp => "MVP",
            Self::EarlyStage => "Early Stage",
            Self::Growth => "Growth",
            Self::Scaling => "Scaling",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a stored stage, mapping anything unrecognised to `Unknown`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }

    /// All known stages in lifecycle order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Idea,
            Self::Mvp,
            Self::EarlyStage,
            Self::Growth,
            Self::Scaling,
        ]
    }
}

impl Default for StartupStage {
    fn default() -> Self {
        Self::Idea
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StartupStage {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "idea" => Ok(Self::Idea),
            "mvp" => Ok(Self::Mvp),
            "early_stage" => Ok(Self::EarlyStage),
            "growth" => Ok(Self::Growth),
            "scaling" => Ok(Self::Scaling),
            _ => Err(ModelError::UnknownStage(s.to_string())),
        }
    }
}

/// A member profile, founder or talent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Profile {
    /// Stable identifier assigned at registration
    pub id: String,
    /// Marketplace side
    pub role: UserRole,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// One-line headline
    #[serde(default)]
    pub headline: Option<String>,
    /// Free-form bio
    #[serde(default)]
    pub bio: Option<String>,
    /// City or region
    #[serde(default)]
    pub location: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Self-declared skills, display casing preserved
    #[serde(default)]
    pub skills: Vec<String>,
    /// GitHub profile URL
    #[serde(default)]
    pub github_url: Option<String>,
    /// LinkedIn profile URL
    #[serde(default)]
    pub linkedin_url: Option<String>,
    /// Precomputed completeness (0-100), derived when absent
    #[serde(default)]
    pub profile_completeness: Option<u8>,
    /// Last time the owner did anything
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
    /// Endorsements received from other members
    #[serde(default)]
    pub endorsement_count: u32,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a bare profile registered now.
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
            full_name: None,
            headline: None,
            bio: None,
            location: None,
            avatar_url: None,
            skills: vec![],
            github_url: None,
            linkedin_url: None,
            profile_completeness: None,
            last_active_at: None,
            endorsement_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Set skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set display name.
    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    /// Set bio.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Set GitHub URL.
    pub fn with_github(mut self, url: impl Into<String>) -> Self {
        self.github_url = Some(url.into());
        self
    }

    /// Set LinkedIn URL.
    pub fn with_linkedin(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }

    /// Set precomputed completeness.
    pub fn with_completeness(mut self, completeness: u8) -> Self {
        self.profile_completeness = Some(completeness);
        self
    }

    /// Set registration time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set last activity time.
    pub fn with_last_active_at(mut self, last_active_at: DateTime<Utc>) -> Self {
        self.last_active_at = Some(last_active_at);
        self
    }

    /// Set endorsement count.
    pub fn with_endorsements(mut self, count: u32) -> Self {
        self.endorsement_count = count;
        self
    }

    /// Profile completeness, 0-100.
    ///
    /// Uses the repository's precomputed value when present, otherwise
    /// derives it from which profile fields are filled in.
    pub fn completeness(&self) -> u8 {
        if let Some(supplied) = self.profile_completeness {
            return supplied.min(100);
        }

        let filled = [
            has_text(&self.full_name),
            has_text(&self.headline),
            has_text(&self.bio),
            has_text(&self.location),
            has_text(&self.avatar_url),
            self.skills.iter().any(|s| !s.trim().is_empty()),
            has_text(&self.github_url),
            has_text(&self.linkedin_url),
        ]
        .iter()
        .filter(|f| **f)
        .count() as u32;

        ((100 * filled) as f64 / COMPLETENESS_CHECKS as f64).round() as u8
    }

    /// Whether a GitHub account is linked
    pub fn has_github(&self) -> bool {
        has_text(&self.github_url)
    }

    /// Whether a LinkedIn account is linked
    pub fn has_linkedin(&self) -> bool {
        has_text(&self.linkedin_url)
    }

    /// Whole days since registration, never negative.
    pub fn account_age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// A startup listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Startup {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle stage
    pub stage: StartupStage,
    /// Industry, free text
    #[serde(default)]
    pub industry: String,
    /// Owning founder (read-only here)
    pub founder: Profile,
    /// Pitch text
    #[serde(default)]
    pub description: String,
}

impl Startup {
    /// Create a startup owned by `founder`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stage: StartupStage,
        founder: Profile,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stage,
            industry: String::new(),
            founder,
            description: String::new(),
        }
    }

    /// Set industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Errors raised when parsing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Stage string not in the catalog
    #[error("Unknown startup stage: {0}")]
    UnknownStage(String),

    /// Role string not recognised
    #[error("Unknown user role: {0}")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
