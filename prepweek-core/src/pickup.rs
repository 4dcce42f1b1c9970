//! Pickup optimizer: the single best grocery shopping day of a week.
//!
//! Trades calendar availability (inverted busyness) against how well the
//! shopping day fits the shelf life of the perishables being bought.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::DayScore;
use crate::error::CoreError;
use crate::grocery::{GroceryItemRef, PerishableMealDate};
use crate::shelf_life::{Freshness, ShelfLifeTable};

pub const AVAILABILITY_WEIGHT: f64 = 0.6;
pub const FRESHNESS_WEIGHT: f64 = 0.4;

/// Freshness used for every day when nothing perishable is planned.
pub const NEUTRAL_FRESHNESS: f64 = 50.0;
/// Shelf window assumed when no grocery item carries a category.
pub const UNCATEGORIZED_SHELF_DAYS: u32 = 30;
/// Freshness lost per day of buying earlier than the shelf window allows.
pub const OVERSHOOT_PENALTY_PER_DAY: f64 = 10.0;
/// Combined scores closer than this are a tie; the earlier day keeps it.
const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupRecommendation {
    pub date: NaiveDate,
    /// 0 = first day of the week.
    pub day_index: usize,
    pub reasoning: String,
    /// Combined score that won.
    pub score: f64,
    pub availability_score: f64,
    pub freshness_score: f64,
}

/// Latest date perishables must still be fresh, and the tightest shelf window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreshnessWindow {
    latest_needed: NaiveDate,
    shortest_shelf_days: u32,
}

impl FreshnessWindow {
    fn score(&self, candidate: NaiveDate) -> f64 {
        let gap = (self.latest_needed - candidate).num_days();
        if gap < 0 {
            return 0.0;
        }
        let gap = gap as f64;
        let shelf = f64::from(self.shortest_shelf_days.max(1));
        if gap <= shelf {
            100.0 - 50.0 * gap / shelf
        } else {
            (50.0 - OVERSHOOT_PENALTY_PER_DAY * (gap - shelf)).max(0.0)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PickupOptimizer<'a> {
    table: &'a ShelfLifeTable,
}

impl PickupOptimizer<'static> {
    pub fn standard() -> Self {
        Self {
            table: &ShelfLifeTable::STANDARD,
        }
    }
}

impl<'a> PickupOptimizer<'a> {
    pub fn new(table: &'a ShelfLifeTable) -> Self {
        Self { table }
    }

    /// Pick the best shopping day. `week_scores` must not be empty.
    ///
    /// Ties keep the earliest day: a later day only wins on strict improvement.
    pub fn recommend(
        &self,
        week_scores: &[DayScore],
        grocery_items: &[GroceryItemRef],
        perishable_meal_dates: &[PerishableMealDate],
    ) -> Result<PickupRecommendation, CoreError> {
        let window = self.freshness_window(grocery_items, perishable_meal_dates);

        // (idx, combined, availability, freshness)
        let mut best: Option<(usize, f64, f64, f64)> = None;
        for (i, day) in week_scores.iter().enumerate() {
            let availability = 100.0 - f64::from(day.final_score());
            let freshness = window
                .map(|w| w.score(day.date()))
                .unwrap_or(NEUTRAL_FRESHNESS);
            let combined = AVAILABILITY_WEIGHT * availability + FRESHNESS_WEIGHT * freshness;

            match best {
                None => best = Some((i, combined, availability, freshness)),
                Some((_, best_combined, _, _)) if combined > best_combined + TIE_EPSILON => {
                    best = Some((i, combined, availability, freshness))
                }
                _ => {}
            }
        }

        let Some((idx, score, availability, freshness)) = best else {
            return Err(CoreError::EmptyWeek);
        };
        let day = &week_scores[idx];

        debug!(date = %day.date(), day_index = idx, score, "pickup day chosen");

        Ok(PickupRecommendation {
            date: day.date(),
            day_index: idx,
            reasoning: self.reasoning(day.date(), availability, perishable_meal_dates),
            score,
            availability_score: availability,
            freshness_score: freshness,
        })
    }

    fn freshness_window(
        &self,
        grocery_items: &[GroceryItemRef],
        perishable_meal_dates: &[PerishableMealDate],
    ) -> Option<FreshnessWindow> {
        let latest_needed = perishable_meal_dates
            .iter()
            .filter(|m| self.table.get(&m.category).freshness.is_perishable())
            .map(|m| m.date)
            .max()?;

        let shortest_shelf_days = grocery_items
            .iter()
            .filter_map(GroceryItemRef::known_category)
            .map(|c| self.table.get(c).max_days)
            .min()
            .unwrap_or(UNCATEGORIZED_SHELF_DAYS);

        Some(FreshnessWindow {
            latest_needed,
            shortest_shelf_days,
        })
    }

    fn reasoning(
        &self,
        date: NaiveDate,
        availability: f64,
        perishable_meal_dates: &[PerishableMealDate],
    ) -> String {
        let openness = if availability >= 70.0 {
            "your calendar is very open"
        } else if availability >= 40.0 {
            "your calendar is moderately busy"
        } else {
            "it's a busy day, but the best trade-off this week"
        };
        let mut out = format!(
            "{} is the best day to shop: {}.",
            date.format("%A, %b %-d"),
            openness
        );

        let mut short: Vec<&str> = Vec::new();
        for m in perishable_meal_dates {
            let cat = m.category.as_str();
            if self.table.get(cat).freshness == Freshness::Short && !short.contains(&cat) {
                short.push(cat);
            }
        }
        if !short.is_empty() {
            out.push_str(&format!(
                " Shopping close to when you need {} keeps them fresh.",
                short.join(", ")
            ));
        }
        out
    }
}

/// [`PickupOptimizer::recommend`] against the standard shelf-life table.
pub fn recommend_pickup_day(
    week_scores: &[DayScore],
    grocery_items: &[GroceryItemRef],
    perishable_meal_dates: &[PerishableMealDate],
) -> Result<PickupRecommendation, CoreError> {
    PickupOptimizer::standard().recommend(week_scores, grocery_items, perishable_meal_dates)
}
