//! Cooking complexity tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest score still considered a light day.
pub const EXPLORATORY_MAX_SCORE: u8 = 35;
/// Highest score still considered a regular day.
pub const STANDARD_MAX_SCORE: u8 = 65;

/// How much time/effort a day's meal should target.
///
/// Ordered by increasing available time: `Quick < Standard < Exploratory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Quick,
    Standard,
    Exploratory,
}

impl ComplexityTier {
    /// Map a final day score to a tier. Busier days get quicker meals.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=EXPLORATORY_MAX_SCORE => ComplexityTier::Exploratory,
            s if s <= STANDARD_MAX_SCORE => ComplexityTier::Standard,
            _ => ComplexityTier::Quick,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityTier::Quick => "quick",
            ComplexityTier::Standard => "standard",
            ComplexityTier::Exploratory => "exploratory",
        }
    }

    /// Cooking time range (minutes) handed to recipe generation. `None` = open-ended.
    pub fn suggested_cook_minutes(&self) -> (u32, Option<u32>) {
        match self {
            ComplexityTier::Quick => (0, Some(30)),
            ComplexityTier::Standard => (30, Some(60)),
            ComplexityTier::Exploratory => (60, None),
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(ComplexityTier::Quick),
            "standard" => Ok(ComplexityTier::Standard),
            "exploratory" => Ok(ComplexityTier::Exploratory),
            other => Err(format!("unknown complexity tier: {other}")),
        }
    }
}
