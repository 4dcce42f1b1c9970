//! Persisted shape of one user's scored week.
//!
//! Stored keyed by (user, week_start) so views don't need a recalculation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::engine::DayScore;
use crate::pickup::PickupRecommendation;
use crate::tier::ComplexityTier;

/// A user's manual tier choice for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierOverride {
    pub day: Weekday,
    pub tier: ComplexityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub user: String,
    pub week_start: NaiveDate,
    /// Pre-override recommendation, one entry per day starting at `week_start`.
    pub scores: Vec<DayScore>,
    #[serde(default)]
    pub overrides: Vec<TierOverride>,
    #[serde(default)]
    pub pickup: Option<PickupRecommendation>,
}

impl WeekPlan {
    pub fn new(user: impl Into<String>, week_start: NaiveDate, scores: Vec<DayScore>) -> Self {
        Self {
            user: user.into(),
            week_start,
            scores,
            overrides: Vec::new(),
            pickup: None,
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<TierOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_pickup(mut self, pickup: PickupRecommendation) -> Self {
        self.pickup = Some(pickup);
        self
    }

    pub fn score_for(&self, date: NaiveDate) -> Option<&DayScore> {
        self.scores.iter().find(|s| s.date() == date)
    }

    pub fn override_for(&self, day: Weekday) -> Option<ComplexityTier> {
        self.overrides.iter().rev().find(|o| o.day == day).map(|o| o.tier)
    }

    /// Tier shown for `date`: the override for its weekday, else the recommendation.
    pub fn effective_tier(&self, date: NaiveDate) -> Option<ComplexityTier> {
        let score = self.score_for(date)?;
        Some(self.override_for(date.weekday()).unwrap_or(score.tier()))
    }

    /// Minimal invariants for a stored plan.
    pub fn validate(&self) -> Result<(), String> {
        if self.user.trim().is_empty() {
            return Err("user must be non-empty".to_string());
        }
        if self.scores.len() != 7 {
            return Err(format!("expected 7 day scores, got {}", self.scores.len()));
        }
        for (i, s) in self.scores.iter().enumerate() {
            let expected = self.week_start + Duration::days(i as i64);
            if s.date() != expected {
                return Err(format!("scores[{i}]: date {} should be {expected}", s.date()));
            }
        }
        if let Some(p) = &self.pickup {
            if self.score_for(p.date).is_none() || p.day_index >= self.scores.len() {
                return Err(format!("pickup date {} is outside the week", p.date));
            }
        }
        Ok(())
    }
}
