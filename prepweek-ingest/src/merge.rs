//! Merge events from several providers into one deduplicated list.
//!
//! A provider that fails to load is skipped so the others can still be scored.

use chrono::{DateTime, Utc};
use prepweek_core::{CalendarEvent, EventSource, LocalCalendar};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::parsers::load_events;

/// Result of loading several provider exports.
#[derive(Debug, Default)]
pub struct LoadedEvents {
    pub events: Vec<CalendarEvent>,
    /// Files that could not be loaded, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

impl LoadedEvents {
    /// True when every requested file failed.
    pub fn all_failed(&self) -> bool {
        self.events.is_empty() && !self.failed.is_empty()
    }
}

/// Merge provider batches.
///
/// Earlier batches win. Drops repeats of the same (source, id), then the same
/// meeting seen through two providers (same title, start and end).
/// Output is sorted by start, then id.
pub fn merge_events(batches: impl IntoIterator<Item = Vec<CalendarEvent>>) -> Vec<CalendarEvent> {
    let mut seen_ids: HashSet<(EventSource, String)> = HashSet::new();
    let mut seen_slots: HashSet<(String, DateTime<Utc>, DateTime<Utc>)> = HashSet::new();
    let mut out = Vec::new();

    for batch in batches {
        for ev in batch {
            if !seen_ids.insert((ev.source, ev.id.clone())) {
                continue;
            }
            let slot = (ev.title.trim().to_lowercase(), ev.start, ev.end);
            if !seen_slots.insert(slot) {
                continue;
            }
            out.push(ev);
        }
    }

    out.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    out
}

/// Load and merge every file, tolerating individual failures.
pub fn load_event_files(paths: &[PathBuf], cal: &LocalCalendar) -> LoadedEvents {
    let mut batches = Vec::new();
    let mut failed = Vec::new();

    for path in paths {
        match load_events(path, cal) {
            Ok(events) => {
                info!(path = %path.display(), count = events.len(), "loaded events");
                batches.push(events);
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(path = %path.display(), %error, "skipping calendar source");
                failed.push((path.clone(), error));
            }
        }
    }

    LoadedEvents {
        events: merge_events(batches),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ev(id: &str, title: &str, hour: u32, source: EventSource) -> CalendarEvent {
        CalendarEvent::new(
            id,
            title,
            Utc.with_ymd_and_hms(2025, 2, 17, hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 17, hour + 1, 0, 0).unwrap(),
        )
        .with_source(source)
    }

    #[test]
    fn dedupes_by_id_and_by_slot_across_providers() {
        let google = vec![
            ev("g1", "Standup", 15, EventSource::Google),
            ev("g2", "Lunch", 18, EventSource::Google),
            ev("g1", "Standup (dup)", 15, EventSource::Google),
        ];
        let apple = vec![
            ev("a1", "standup ", 15, EventSource::Apple),
            ev("g1", "Dentist", 13, EventSource::Apple),
        ];
        let merged = merge_events(vec![google, apple]);
        let ids: Vec<_> = merged.iter().map(|e| (e.source, e.id.as_str())).collect();
        assert_eq!(
            ids,
            vec![
                (EventSource::Apple, "g1"),
                (EventSource::Google, "g1"),
                (EventSource::Google, "g2"),
            ]
        );
    }

    #[test]
    fn missing_file_is_reported_not_fatal() {
        let missing = [PathBuf::from("/definitely/not/here.json")];
        let loaded = load_event_files(&missing, &LocalCalendar::utc());
        assert!(loaded.events.is_empty());
        assert_eq!(loaded.failed.len(), 1);
        assert!(loaded.all_failed());
    }
}
