//! Data records for the Launchpad decision engine.
//!
//! The engine never loads or stores anything itself. A repository
//! collaborator hands it these plain records and renders whatever the
//! engine returns:
//!
//! - **Profiles**: founders and talent, with the signals trust scoring reads
//! - **Startups**: a founder, an industry, and a lifecycle stage
//! - **Catalog**: fixed stage→skill and skill→role tables plus stage copy
//! - **Skill sets**: case-insensitive sets that keep display casing
//!
//! With the `typescript` feature enabled, the record types can be exported to
//! TypeScript using ts-rs for consistency with the web frontend.

pub mod catalog;
pub mod skills;
pub mod types;

// Re-export main types
pub use catalog::{required_skills, roles_for_skill, primary_role_for_skill};
pub use skills::SkillSet;
pub use types::*;
