//! Complexity signals: pluggable scorers over one day's calendar events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::event::CalendarEvent;

/// Clamp a score into `[0, 100]`; non-finite values become 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Output of one signal evaluated against one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// Name of the signal that produced this result.
    pub signal: String,
    /// 0-100, higher means busier.
    pub score: f64,
    /// Short, non-technical summary shown in the UI.
    pub reasoning: String,
    /// Raw measurements kept for recalibration.
    #[serde(default)]
    pub raw: BTreeMap<String, f64>,
}

impl SignalResult {
    pub fn new(signal: impl Into<String>, score: f64, reasoning: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            score: clamp_score(score),
            reasoning: reasoning.into(),
            raw: BTreeMap::new(),
        }
    }

    pub fn with_raw(mut self, key: impl Into<String>, value: f64) -> Self {
        self.raw.insert(key.into(), value);
        self
    }

    pub fn raw_value(&self, key: &str) -> Option<f64> {
        self.raw.get(key).copied()
    }
}

/// A named, weighted scoring function over a day's events.
///
/// `events` may contain events outside `date`; each signal filters to the
/// events overlapping the local day itself. Signals never see each other's output.
pub trait ComplexitySignal: Send + Sync {
    fn name(&self) -> &str;

    fn weight(&self) -> f64;

    fn compute(&self, events: &[CalendarEvent], date: NaiveDate) -> SignalResult;
}
