//! Keyword-based stress inference from event titles.
//!
//! Deterministic, no LLM: a fixed keyword table in the same spirit as the
//! category rules elsewhere in the workspace.

use chrono::NaiveDate;

use crate::event::CalendarEvent;
use crate::signal::{clamp_score, ComplexitySignal, SignalResult};
use crate::time::LocalCalendar;

pub const SIGNAL_NAME: &str = "title_stress";

/// Keyword -> points for one matching event. An event scores its strongest keyword only.
const STRESS_KEYWORDS: &[(&str, f64)] = &[
    ("deadline", 35.0),
    ("exam", 35.0),
    ("interview", 30.0),
    ("flight", 30.0),
    ("travel", 25.0),
    ("presentation", 25.0),
    ("launch", 25.0),
    ("demo", 20.0),
    ("offsite", 20.0),
    ("review", 15.0),
    ("doctor", 10.0),
    ("dentist", 10.0),
    ("appointment", 10.0),
];

fn tokenize(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Whole-word match; a trailing plural `s` is allowed.
fn matches_keyword(token: &str, keyword: &str) -> bool {
    token == keyword || token.strip_suffix('s') == Some(keyword)
}

fn event_points(title: &str) -> f64 {
    let tokens = tokenize(title);
    STRESS_KEYWORDS
        .iter()
        .filter(|(kw, _)| tokens.iter().any(|t| matches_keyword(t, kw)))
        .map(|(_, pts)| *pts)
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleStressSignal {
    calendar: LocalCalendar,
    weight: f64,
}

impl TitleStressSignal {
    pub fn new(calendar: LocalCalendar) -> Self {
        Self {
            calendar,
            weight: 0.5,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl ComplexitySignal for TitleStressSignal {
    fn name(&self) -> &str {
        SIGNAL_NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn compute(&self, events: &[CalendarEvent], date: NaiveDate) -> SignalResult {
        let day = self.calendar.day_bounds(date);

        let mut total = 0.0;
        let mut titles: Vec<&str> = Vec::new();
        for ev in events {
            if self.calendar.event_span(ev).intersect(&day).is_none() {
                continue;
            }
            let pts = event_points(&ev.title);
            if pts > 0.0 {
                total += pts;
                titles.push(ev.title.trim());
            }
        }

        let reasoning = if titles.is_empty() {
            "No stressful events".to_string()
        } else {
            format!("Stressful: {}", titles.join(", "))
        };

        SignalResult::new(SIGNAL_NAME, clamp_score(total.round()), reasoning)
            .with_raw("stressful_event_count", titles.len() as f64)
            .with_raw("keyword_points", total)
    }
}
