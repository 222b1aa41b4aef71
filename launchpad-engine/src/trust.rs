//! Trust scoring.
//!
//! A trust score is the sum of five independently capped signals, so the
//! total can never leave 0-100 and every point is attributable to one line
//! of the breakdown.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_model::Profile;

#[cfg(feature = "typescript")]
use ts_rs::TS;

const PROFILE_MAX: u8 = 30;
const PROFILE_FULL_CREDIT_AT: u8 = 80;
const LINKS_MAX: u8 = 20;
const LINK_POINTS: u8 = 10;
const AGE_MAX: u8 = 20;
const AGE_STEP_POINTS: u8 = 10;
const AGE_FIRST_STEP_DAYS: i64 = 30;
const AGE_SECOND_STEP_DAYS: i64 = 90;
const ACTIVITY_MAX: u8 = 15;
const ACTIVITY_WINDOW_DAYS: i64 = 7;
const ENDORSEMENTS_MAX: u8 = 15;
const POINTS_PER_ENDORSEMENT: u32 = 3;

/// Reputation tier derived from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Below 40
    NewMember,
    /// 40-59
    BuildingTrust,
    /// 60-79
    Trusted,
    /// 80 and above
    HighlyTrusted,
}

impl TrustLevel {
    /// Tier for a total score.
    pub fn from_total(total: u8) -> Self {
        if total >= 80 {
            Self::HighlyTrusted
        } else if total >= 60 {
            Self::Trusted
        } else if total >= 40 {
            Self::BuildingTrust
        } else {
            Self::NewMember
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlyTrusted => "Highly Trusted",
            Self::Trusted => "Trusted",
            Self::BuildingTrust => "Building Trust",
            Self::NewMember => "New Member",
        }
    }
}

/// One line of a trust breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TrustBreakdownItem {
    /// Signal name
    pub label: String,
    /// Points awarded, never above `max`
    pub points: u8,
    /// Cap for this signal
    pub max: u8,
    /// Why these points were awarded
    pub detail: String,
}

impl TrustBreakdownItem {
    fn new(label: &str, points: u8, max: u8, detail: String) -> Self {
        Self {
            label: label.to_string(),
            points: points.min(max),
            max,
            detail,
        }
    }
}

/// Composite trust score with itemized breakdown.
///
/// `total` always equals the sum of the breakdown points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TrustScore {
    /// Profile this score belongs to
    pub profile_id: String,
    /// 0-100
    pub total: u8,
    /// Tier
    pub level: TrustLevel,
    /// Per-signal points
    pub breakdown: Vec<TrustBreakdownItem>,
}

impl TrustScore {
    /// Display label for the tier
    pub fn label(&self) -> &'static str {
        self.level.label()
    }

    /// Maximum achievable total
    pub fn max_total(&self) -> u32 {
        self.breakdown.iter().map(|i| i.max as u32).sum()
    }
}

/// Computes [`TrustScore`]s from profile signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustScoreCalculator;

impl TrustScoreCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    /// Score a profile as of now.
    pub fn calculate(&self, profile: &Profile) -> TrustScore {
        self.calculate_at(profile, Utc::now())
    }

    /// Score a profile as of `now`.
    pub fn calculate_at(&self, profile: &Profile, now: DateTime<Utc>) -> TrustScore {
        let breakdown = vec![
            profile_item(profile),
            links_item(profile),
            age_item(profile, now),
            activity_item(profile, now),
            endorsements_item(profile),
        ];

        let total = breakdown.iter().map(|i| i.points).sum::<u8>();
        let level = TrustLevel::from_total(total);

        debug!(
            profile_id = %profile.id,
            total = total,
            level = level.label(),
            "Trust score calculated"
        );

        TrustScore {
            profile_id: profile.id.clone(),
            total,
            level,
            breakdown,
        }
    }
}

fn profile_item(profile: &Profile) -> TrustBreakdownItem {
    let completeness = profile.completeness();
    let points = if completeness >= PROFILE_FULL_CREDIT_AT {
        PROFILE_MAX
    } else {
        // floor(completeness * 0.3)
        ((completeness as u32 * 3) / 10) as u8
    };
    TrustBreakdownItem::new(
        "Profile",
        points,
        PROFILE_MAX,
        format!("Profile is {completeness}% complete"),
    )
}

fn links_item(profile: &Profile) -> TrustBreakdownItem {
    let mut points = 0;
    let mut linked = Vec::new();
    if profile.has_github() {
        points += LINK_POINTS;
        linked.push("GitHub");
    }
    if profile.has_linkedin() {
        points += LINK_POINTS;
        linked.push("LinkedIn");
    }
    let detail = if linked.is_empty() {
        "No linked accounts".to_string()
    } else {
        format!("Linked {}", linked.join(" and "))
    };
    TrustBreakdownItem::new("Linked Accounts", points, LINKS_MAX, detail)
}

fn age_item(profile: &Profile, now: DateTime<Utc>) -> TrustBreakdownItem {
    let days = profile.account_age_days(now);
    let mut points = 0;
    if days >= AGE_FIRST_STEP_DAYS {
        points += AGE_STEP_POINTS;
    }
    if days >= AGE_SECOND_STEP_DAYS {
        points += AGE_STEP_POINTS;
    }
    TrustBreakdownItem::new(
        "Account Age",
        points,
        AGE_MAX,
        format!("Member for {days} days"),
    )
}

fn activity_item(profile: &Profile, now: DateTime<Utc>) -> TrustBreakdownItem {
    let (points, detail) = match profile.last_active_at {
        Some(last) if now - last <= Duration::days(ACTIVITY_WINDOW_DAYS) => {
            (ACTIVITY_MAX, "Active in the last 7 days".to_string())
        }
        Some(last) => (0, format!("Last active {} days ago", (now - last).num_days())),
        None => (0, "No recorded activity".to_string()),
    };
    TrustBreakdownItem::new("Activity", points, ACTIVITY_MAX, detail)
}

fn endorsements_item(profile: &Profile) -> TrustBreakdownItem {
    let count = profile.endorsement_count;
    let points = count.saturating_mul(POINTS_PER_ENDORSEMENT).min(ENDORSEMENTS_MAX as u32) as u8;
    let noun = if count == 1 { "endorsement" } else { "endorsements" };
    TrustBreakdownItem::new(
        "Endorsements",
        points,
        ENDORSEMENTS_MAX,
        format!("{count} {noun} received"),
    )
}
