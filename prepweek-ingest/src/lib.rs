//! prepweek-ingest: turn exported calendar and grocery files into core inputs.

pub mod merge;
pub mod parsers;

pub use merge::{load_event_files, merge_events, LoadedEvents};
pub use parsers::grocery_csv::{
    load_grocery_csv, load_meal_dates_csv, parse_grocery_csv, parse_meal_dates_csv,
};
pub use parsers::ics::parse_ics;
pub use parsers::json_events::parse_events_json;
pub use parsers::load_events;
