//! Calendar event model as delivered by the calendar connectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calendar provider an event was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Google,
    Apple,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::Google => "google",
            EventSource::Apple => "apple",
        }
    }
}

/// Optional free-form details carried along with an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw recurrence rule (e.g. an RRULE line). Not expanded here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

/// One calendar occurrence.
///
/// `start`/`end` are instants. For all-day events connectors commonly send the
/// date at UTC midnight; [`crate::time::LocalCalendar::event_span`] maps those back
/// onto the intended local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    pub source: EventSource,
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
            source: EventSource::Google,
            metadata: EventMetadata::default(),
        }
    }

    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    pub fn with_source(mut self, source: EventSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.metadata.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_recurrence(mut self, rule: impl Into<String>) -> Self {
        self.metadata.recurrence = Some(rule.into());
        self
    }
}
