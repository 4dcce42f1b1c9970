//! JSON event exports.
//!
//! Accepts either a bare array or `{"events": [...]}`:
//!   {"id": "...", "title": "...", "start": "2025-02-17T09:00:00-06:00", "end": "...",
//!    "all_day": false, "source": "google", "location": "...", "description": "...",
//!    "recurrence": "RRULE:..."}
//!
//! `start`/`end` may be RFC 3339, floating `YYYY-MM-DDTHH:MM:SS`, or date-only
//! `YYYY-MM-DD` (all-day at UTC midnight).

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use prepweek_core::{CalendarEvent, EventMetadata, EventSource, LocalCalendar};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(default)]
    title: String,
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    all_day: Option<bool>,
    #[serde(default)]
    source: Option<EventSource>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    recurrence: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawEvent>),
    Wrapped { events: Vec<RawEvent> },
}

/// Parsed boundary value and whether it was date-only.
fn parse_instant(s: &str, cal: &LocalCalendar) -> Option<(DateTime<Utc>, bool)> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.with_timezone(&Utc), false));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some((cal.resolve(ndt), false));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((d.and_time(chrono::NaiveTime::MIN).and_utc(), true));
    }
    None
}

pub fn parse_events_json(
    text: &str,
    cal: &LocalCalendar,
    default_source: EventSource,
) -> Result<Vec<CalendarEvent>> {
    let raw = match serde_json::from_str::<RawDocument>(text)? {
        RawDocument::List(list) => list,
        RawDocument::Wrapped { events } => events,
    };

    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let Some((start, date_only)) = parse_instant(&r.start, cal) else {
            bail!("event {}: invalid start '{}'", r.id, r.start);
        };
        let all_day = r.all_day.unwrap_or(date_only);

        let end = match r.end.as_deref() {
            Some(e) => match parse_instant(e, cal) {
                Some((end, _)) => end,
                None => bail!("event {}: invalid end '{e}'", r.id),
            },
            None if all_day => start + Duration::days(1),
            None => start,
        };

        out.push(CalendarEvent {
            id: r.id,
            title: r.title,
            start,
            end,
            all_day,
            source: r.source.unwrap_or(default_source),
            metadata: EventMetadata {
                location: r.location,
                description: r.description,
                recurrence: r.recurrence,
            },
        });
    }

    Ok(out)
}
