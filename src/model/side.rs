//! Structured side-data merged into fixed document slots.
//!
//! Board roster, persona breakdowns, and the ICP profile are resolved by
//! external collaborators and attached to the [`super::Document`] as-is; the
//! core never reparses them.

use serde::{Deserialize, Serialize};

/// The board of advisors attached to a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardRoster {
    /// Board members in display order
    pub members: Vec<BoardMember>,
}

impl BoardRoster {
    /// Check if the roster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A single board member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    /// Display name
    pub name: String,

    /// Role or title (e.g. "CFO", "Growth Advisor")
    pub role: String,

    /// One-line perspective summary, if provided
    pub perspective: Option<String>,
}

/// A customer persona breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Persona name
    pub name: String,

    /// Short description
    pub description: String,

    /// Share of the audience this persona represents, 0.0-1.0
    pub share: Option<f32>,
}

/// Ideal customer profile attached to the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IcpProfile {
    /// Target segment description
    pub segment: String,

    /// Key pain points
    pub pains: Vec<String>,

    /// Key gains / desired outcomes
    pub gains: Vec<String>,
}
