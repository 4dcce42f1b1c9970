//! Day Score Engine: composes signals into one score and tier per day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::event::CalendarEvent;
use crate::signal::{clamp_score, ComplexitySignal, SignalResult};
use crate::tier::ComplexityTier;
use crate::time::LocalCalendar;
use crate::time_block::TimeBlockSignal;

/// Composite result for one calendar day.
///
/// Fields are private so `tier` can only ever be derived from `final_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DayScoreRecord")]
pub struct DayScore {
    date: NaiveDate,
    final_score: u8,
    tier: ComplexityTier,
    signals: Vec<SignalResult>,
}

impl DayScore {
    /// Build a day score; scores above 100 are clamped.
    pub fn new(date: NaiveDate, final_score: u8, signals: Vec<SignalResult>) -> Self {
        let final_score = final_score.min(100);
        Self {
            date,
            final_score,
            tier: ComplexityTier::from_score(final_score),
            signals,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn final_score(&self) -> u8 {
        self.final_score
    }

    pub fn tier(&self) -> ComplexityTier {
        self.tier
    }

    /// Contributing results in signal evaluation order.
    pub fn signals(&self) -> &[SignalResult] {
        &self.signals
    }

    /// Reasoning of every contributing signal, joined for display.
    pub fn summary(&self) -> String {
        self.signals
            .iter()
            .map(|s| s.reasoning.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Stored/wire shape of a [`DayScore`]; validated on the way in.
#[derive(Deserialize)]
struct DayScoreRecord {
    date: NaiveDate,
    final_score: u8,
    tier: ComplexityTier,
    #[serde(default)]
    signals: Vec<SignalResult>,
}

impl TryFrom<DayScoreRecord> for DayScore {
    type Error = CoreError;

    fn try_from(r: DayScoreRecord) -> Result<Self, Self::Error> {
        if r.final_score > 100 {
            return Err(CoreError::InvalidDayScore(format!(
                "{}: final_score {} out of range",
                r.date, r.final_score
            )));
        }
        let expected = ComplexityTier::from_score(r.final_score);
        if r.tier != expected {
            return Err(CoreError::InvalidDayScore(format!(
                "{}: tier {} does not match score {} (expected {})",
                r.date, r.tier, r.final_score, expected
            )));
        }
        Ok(DayScore::new(r.date, r.final_score, r.signals))
    }
}

/// Holds an ordered, fixed list of signals and scores days against them.
#[derive(Clone)]
pub struct DayScoreEngine {
    signals: Vec<Arc<dyn ComplexitySignal>>,
}

impl fmt::Debug for DayScoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.signals.iter().map(|s| (s.name().to_string(), s.weight())))
            .finish()
    }
}

impl DayScoreEngine {
    /// An empty signal list falls back to a single time-block signal.
    pub fn new(calendar: LocalCalendar, signals: Vec<Arc<dyn ComplexitySignal>>) -> Self {
        if signals.is_empty() {
            return Self::with_time_block(calendar);
        }
        Self { signals }
    }

    pub fn with_time_block(calendar: LocalCalendar) -> Self {
        Self {
            signals: vec![Arc::new(TimeBlockSignal::new(calendar))],
        }
    }

    pub fn signals(&self) -> &[Arc<dyn ComplexitySignal>] {
        &self.signals
    }

    /// Score one local day against the full event set.
    pub fn score_day(&self, events: &[CalendarEvent], date: NaiveDate) -> DayScore {
        let mut results = Vec::with_capacity(self.signals.len());
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for signal in &self.signals {
            let result = signal.compute(events, date);
            let weight = sanitize_weight(signal.weight());
            trace!(
                %date,
                signal = signal.name(),
                score = result.score,
                weight,
                "signal computed"
            );
            weighted_sum += result.score * weight;
            total_weight += weight;
            results.push(result);
        }

        let combined = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };
        let final_score = clamp_score(combined.round()) as u8;
        let day = DayScore::new(date, final_score, results);

        debug!(%date, final_score, tier = %day.tier(), "scored day");
        day
    }

    /// Seven consecutive day scores starting at `week_start`.
    pub fn score_week(&self, events: &[CalendarEvent], week_start: NaiveDate) -> [DayScore; 7] {
        std::array::from_fn(|i| self.score_day(events, week_start + Duration::days(i as i64)))
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed {
        name: &'static str,
        score: f64,
        weight: f64,
    }

    impl ComplexitySignal for Fixed {
        fn name(&self) -> &str {
            self.name
        }
        fn weight(&self) -> f64 {
            self.weight
        }
        fn compute(&self, _events: &[CalendarEvent], _date: NaiveDate) -> SignalResult {
            SignalResult::new(self.name, self.score, "fixed")
        }
    }

    fn fixed(name: &'static str, score: f64, weight: f64) -> Arc<dyn ComplexitySignal> {
        Arc::new(Fixed { name, score, weight })
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 17).unwrap()
    }

    #[test]
    fn empty_signal_list_defaults_to_time_block() {
        let engine = DayScoreEngine::new(LocalCalendar::utc(), vec![]);
        assert_eq!(engine.signals().len(), 1);
        assert_eq!(engine.signals()[0].name(), "time_block");
    }

    #[test]
    fn weighted_average_is_rounded() {
        let engine = DayScoreEngine::new(
            LocalCalendar::utc(),
            vec![fixed("a", 80.0, 3.0), fixed("b", 20.0, 1.0), fixed("c", 0.0, 0.5)],
        );
        // (240 + 20 + 0) / 4.5 = 57.78
        let day = engine.score_day(&[], monday());
        assert_eq!(day.final_score(), 58);
        assert_eq!(day.tier(), ComplexityTier::Standard);
        let names: Vec<_> = day.signals().iter().map(|s| s.signal.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn zero_total_weight_scores_zero() {
        let engine = DayScoreEngine::new(
            LocalCalendar::utc(),
            vec![fixed("a", 90.0, 0.0), fixed("b", 90.0, f64::NAN), fixed("c", 90.0, -2.0)],
        );
        let day = engine.score_day(&[], monday());
        assert_eq!(day.final_score(), 0);
        assert_eq!(day.tier(), ComplexityTier::Exploratory);
        assert_eq!(day.signals().len(), 3);
    }

    #[test]
    fn week_has_seven_ascending_days() {
        let engine = DayScoreEngine::with_time_block(LocalCalendar::utc());
        let week = engine.score_week(&[], monday());
        assert_eq!(week.len(), 7);
        for (i, day) in week.iter().enumerate() {
            assert_eq!(day.date(), monday() + Duration::days(i as i64));
            assert_eq!(day.final_score(), 0);
        }
    }

    #[test]
    fn day_score_clamps_out_of_range_values() {
        let d = DayScore::new(monday(), 250, vec![]);
        assert_eq!(d.final_score(), 100);
        assert_eq!(d.tier(), ComplexityTier::Quick);
    }

    #[test]
    fn day_score_json_roundtrip_and_tier_validation() {
        let d = DayScore::new(monday(), 40, vec![SignalResult::new("time_block", 40.0, "busy")]);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"tier\":\"standard\""));
        assert!(json.contains("\"final_score\":40"));
        let back: DayScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);

        let tampered = json.replace("\"standard\"", "\"quick\"");
        let err = serde_json::from_str::<DayScore>(&tampered).unwrap_err();
        assert!(err.to_string().contains("does not match score 40"));
    }
}
