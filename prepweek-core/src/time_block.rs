//! Time-block analysis: how booked, fragmented and meal-adjacent a day is.

use chrono::{Duration, NaiveDate};

use crate::event::CalendarEvent;
use crate::signal::{clamp_score, ComplexitySignal, SignalResult};
use crate::time::{LocalCalendar, TimeSpan};

pub const SIGNAL_NAME: &str = "time_block";

/// Waking window used for committed-time and free-block normalization (07:00-23:00).
pub const WAKING_START_HOUR: u32 = 7;
pub const WAKING_END_HOUR: u32 = 23;
pub const WAKING_HOURS: f64 = 16.0;

pub const LUNCH_WINDOW: (u32, u32) = (11, 13);
pub const DINNER_WINDOW: (u32, u32) = (17, 19);
pub const MEAL_WINDOW_HOURS: f64 = 2.0;

/// Gap at or below which two events count as back-to-back.
pub const BACK_TO_BACK_GAP_MINUTES: i64 = 15;

pub const COMMITTED_CAP: f64 = 40.0;
pub const BACK_TO_BACK_CAP: f64 = 25.0;
pub const MEAL_CONFLICT_CAP: f64 = 20.0;
pub const FREE_BLOCK_CAP: f64 = 15.0;

/// Raw measurements of one day, before weighting into points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DayMeasurements {
    event_count: usize,
    total_hours: f64,
    back_to_back: usize,
    lunch_overlap_hours: f64,
    dinner_overlap_hours: f64,
    largest_free_block_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FactorPoints {
    committed: f64,
    back_to_back: f64,
    meal_conflict: f64,
    free_block: f64,
}

impl FactorPoints {
    fn from_measurements(m: &DayMeasurements) -> Self {
        let committed = (m.total_hours / WAKING_HOURS * COMMITTED_CAP).min(COMMITTED_CAP);

        let pairs = m.event_count.saturating_sub(1).max(1) as f64;
        let back_to_back = (m.back_to_back as f64 / pairs * BACK_TO_BACK_CAP).min(BACK_TO_BACK_CAP);

        // Dinner conflicts count double: they eat into cooking time directly.
        let weighted = 2.0 * m.dinner_overlap_hours + m.lunch_overlap_hours;
        let meal_conflict =
            (weighted / (2.0 * MEAL_WINDOW_HOURS) * MEAL_CONFLICT_CAP).min(MEAL_CONFLICT_CAP);

        let free_ratio = (m.largest_free_block_hours / WAKING_HOURS).min(1.0);
        let free_block = FREE_BLOCK_CAP * (1.0 - free_ratio);

        Self {
            committed: committed.max(0.0),
            back_to_back: back_to_back.max(0.0),
            meal_conflict: meal_conflict.max(0.0),
            free_block: free_block.max(0.0),
        }
    }

    fn total(&self) -> f64 {
        self.committed + self.back_to_back + self.meal_conflict + self.free_block
    }
}

/// Scores a day by committed hours, back-to-back density, meal-window
/// conflicts and the largest open block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBlockSignal {
    calendar: LocalCalendar,
    weight: f64,
}

impl TimeBlockSignal {
    pub fn new(calendar: LocalCalendar) -> Self {
        Self {
            calendar,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Event spans clipped to the local day, sorted by start.
    fn day_spans(&self, events: &[CalendarEvent], date: NaiveDate) -> Vec<TimeSpan> {
        let day = self.calendar.day_bounds(date);
        let mut spans: Vec<TimeSpan> = events
            .iter()
            .filter_map(|e| self.calendar.event_span(e).intersect(&day))
            .collect();
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        spans
    }

    fn measure(&self, spans: &[TimeSpan], date: NaiveDate) -> DayMeasurements {
        let total_hours: f64 = spans.iter().map(TimeSpan::hours).sum();

        let max_gap = Duration::minutes(BACK_TO_BACK_GAP_MINUTES);
        let back_to_back = spans
            .windows(2)
            .filter(|pair| pair[1].start - pair[0].end <= max_gap)
            .count();

        let lunch = self.calendar.window(date, LUNCH_WINDOW.0, LUNCH_WINDOW.1);
        let dinner = self.calendar.window(date, DINNER_WINDOW.0, DINNER_WINDOW.1);

        DayMeasurements {
            event_count: spans.len(),
            total_hours,
            back_to_back,
            lunch_overlap_hours: window_overlap_hours(spans, &lunch),
            dinner_overlap_hours: window_overlap_hours(spans, &dinner),
            largest_free_block_hours: self.largest_free_block_hours(spans, date),
        }
    }

    /// Walk the sorted spans across the waking window, tracking the widest gap.
    fn largest_free_block_hours(&self, spans: &[TimeSpan], date: NaiveDate) -> f64 {
        let waking = self.calendar.window(date, WAKING_START_HOUR, WAKING_END_HOUR);
        let mut cursor = waking.start;
        let mut largest = Duration::zero();

        for span in spans.iter().filter_map(|s| s.intersect(&waking)) {
            if span.start > cursor {
                largest = largest.max(span.start - cursor);
            }
            cursor = cursor.max(span.end);
        }
        if waking.end > cursor {
            largest = largest.max(waking.end - cursor);
        }

        let hours = largest.num_seconds() as f64 / 3600.0;
        hours.min(WAKING_HOURS)
    }

    fn reasoning(m: &DayMeasurements, points: &FactorPoints) -> String {
        let mut parts: Vec<String> = Vec::new();
        if points.committed > 0.0 {
            parts.push(format!("{:.1}h committed", m.total_hours));
        }
        if m.back_to_back > 0 {
            parts.push(format!("{} back-to-back", m.back_to_back));
        }
        if m.dinner_overlap_hours > 0.0 {
            parts.push("dinner prep conflict".to_string());
        }
        if m.lunch_overlap_hours > 0.0 {
            parts.push("lunch conflict".to_string());
        }
        if points.free_block > 0.0 {
            parts.push(format!("largest free block {:.1}h", m.largest_free_block_hours));
        }

        if parts.is_empty() {
            "Light day".to_string()
        } else {
            parts.join("; ")
        }
    }
}

fn window_overlap_hours(spans: &[TimeSpan], window: &TimeSpan) -> f64 {
    let hours: f64 = spans.iter().map(|s| s.overlap_hours(window)).sum();
    hours.min(window.hours())
}

impl ComplexitySignal for TimeBlockSignal {
    fn name(&self) -> &str {
        SIGNAL_NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn compute(&self, events: &[CalendarEvent], date: NaiveDate) -> SignalResult {
        let spans = self.day_spans(events, date);

        if spans.is_empty() {
            return SignalResult::new(SIGNAL_NAME, 0.0, "Completely free day")
                .with_raw("event_count", 0.0)
                .with_raw("total_hours", 0.0)
                .with_raw("back_to_back_count", 0.0)
                .with_raw("largest_free_block_hours", WAKING_HOURS);
        }

        let m = self.measure(&spans, date);
        let points = FactorPoints::from_measurements(&m);
        let score = clamp_score(points.total().round());

        SignalResult::new(SIGNAL_NAME, score, Self::reasoning(&m, &points))
            .with_raw("event_count", m.event_count as f64)
            .with_raw("total_hours", m.total_hours)
            .with_raw("back_to_back_count", m.back_to_back as f64)
            .with_raw("lunch_overlap_hours", m.lunch_overlap_hours)
            .with_raw("dinner_overlap_hours", m.dinner_overlap_hours)
            .with_raw("largest_free_block_hours", m.largest_free_block_hours)
            .with_raw("committed_points", points.committed)
            .with_raw("back_to_back_points", points.back_to_back)
            .with_raw("meal_conflict_points", points.meal_conflict)
            .with_raw("free_block_points", points.free_block)
    }
}
