//! Interview phases and age ranges.
//!
//! Phases are the chapters of a life-story interview, in fixed
//! chronological order. Wire names are SCREAMING_SNAKE_CASE so they
//! match the transition markers embedded in older transcripts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chapter of the life-story interview, in chronological order.
///
/// The declaration order IS the interview order; `Ord` is derived so
/// phases sort chronologically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Welcome and readiness check.
    Greeting,
    /// Age range selection, gating the chapter list.
    AgeSelection,
    /// Family origins and ancestors.
    FamilyHistory,
    /// Ages 0-12.
    Childhood,
    /// Ages 13-17.
    Adolescence,
    /// Ages 18-30.
    EarlyAdulthood,
    /// Ages 31-60.
    Midlife,
    /// Current life.
    Present,
    /// Final reflection and summary.
    Synthesis,
}

impl Phase {
    /// All phases in chronological order.
    pub fn all() -> [Phase; 9] {
        [
            Phase::Greeting,
            Phase::AgeSelection,
            Phase::FamilyHistory,
            Phase::Childhood,
            Phase::Adolescence,
            Phase::EarlyAdulthood,
            Phase::Midlife,
            Phase::Present,
            Phase::Synthesis,
        ]
    }

    /// Phases eligible for snippet extraction.
    ///
    /// Greeting, age selection, and synthesis carry no story material.
    pub fn content_bearing() -> [Phase; 6] {
        [
            Phase::FamilyHistory,
            Phase::Childhood,
            Phase::Adolescence,
            Phase::EarlyAdulthood,
            Phase::Midlife,
            Phase::Present,
        ]
    }

    /// Returns true if this phase carries story material.
    pub fn is_content_bearing(&self) -> bool {
        matches!(
            self,
            Phase::FamilyHistory
                | Phase::Childhood
                | Phase::Adolescence
                | Phase::EarlyAdulthood
                | Phase::Midlife
                | Phase::Present
        )
    }

    /// The SCREAMING_SNAKE_CASE wire name, as used in transition markers.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Phase::Greeting => "GREETING",
            Phase::AgeSelection => "AGE_SELECTION",
            Phase::FamilyHistory => "FAMILY_HISTORY",
            Phase::Childhood => "CHILDHOOD",
            Phase::Adolescence => "ADOLESCENCE",
            Phase::EarlyAdulthood => "EARLY_ADULTHOOD",
            Phase::Midlife => "MIDLIFE",
            Phase::Present => "PRESENT",
            Phase::Synthesis => "SYNTHESIS",
        }
    }

    /// Parses a wire name back to a phase.
    pub fn from_wire_name(name: &str) -> Option<Phase> {
        Phase::all().into_iter().find(|p| p.wire_name() == name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Greeting
    }
}

/// User age range, selected once per story.
///
/// Determines which chapters appear in the interview: younger ranges
/// skip chapters chronologically impossible for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "under_18")]
    Under18,
    #[serde(rename = "18_30")]
    Age18To30,
    #[serde(rename = "31_45")]
    Age31To45,
    #[serde(rename = "46_60")]
    Age46To60,
    #[serde(rename = "61_plus")]
    Age61Plus,
}

impl AgeRange {
    /// All age ranges, youngest first.
    pub fn all() -> [AgeRange; 5] {
        [
            AgeRange::Under18,
            AgeRange::Age18To30,
            AgeRange::Age31To45,
            AgeRange::Age46To60,
            AgeRange::Age61Plus,
        ]
    }

    /// The wire value for this range.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AgeRange::Under18 => "under_18",
            AgeRange::Age18To30 => "18_30",
            AgeRange::Age31To45 => "31_45",
            AgeRange::Age46To60 => "46_60",
            AgeRange::Age61Plus => "61_plus",
        }
    }

    /// Parses a user's age selection input.
    ///
    /// Accepts the menu number ("1" through "5") or the wire value
    /// ("under_18", "18_30", ...). Returns `None` for anything else.
    pub fn parse_selection(input: &str) -> Option<AgeRange> {
        match input.trim() {
            "1" => Some(AgeRange::Under18),
            "2" => Some(AgeRange::Age18To30),
            "3" => Some(AgeRange::Age31To45),
            "4" => Some(AgeRange::Age46To60),
            "5" => Some(AgeRange::Age61Plus),
            other => AgeRange::all().into_iter().find(|r| r.wire_name() == other),
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
