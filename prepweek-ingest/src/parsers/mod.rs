pub mod grocery_csv;
pub mod ics;
pub mod json_events;

use anyhow::{Context, Result};
use prepweek_core::{CalendarEvent, EventSource, LocalCalendar};
use std::fs;
use std::path::Path;

/// Load one provider export. `.ics` files are read as iCalendar, anything else as JSON.
///
/// `cal` is the zone floating (zone-less) times are interpreted in.
pub fn load_events(path: impl AsRef<Path>, cal: &LocalCalendar) -> Result<Vec<CalendarEvent>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let is_ics = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ics"));

    if is_ics {
        ics::parse_ics(&text, cal, EventSource::Apple)
            .with_context(|| format!("parsing {}", path.display()))
    } else {
        json_events::parse_events_json(&text, cal, EventSource::Google)
            .with_context(|| format!("parsing {}", path.display()))
    }
}
