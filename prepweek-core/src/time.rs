//! Time utilities: local calendar-day boundaries in a single IANA zone.
//!
//! Every component that needs "the day" of an instant goes through
//! [`LocalCalendar`], so signals and the pickup optimizer agree on which
//! local day an event or meal belongs to.

use chrono::{
    DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::event::CalendarEvent;

/// Half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    /// Build a span; an `end` before `start` collapses to a zero-length span.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    /// Intersection of two spans. A zero-length span intersects when it lies inside `other`.
    pub fn intersect(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TimeSpan { start, end })
        } else if self.is_instant() && other.contains(self.start) {
            Some(*self)
        } else {
            None
        }
    }

    pub fn overlap_hours(&self, other: &TimeSpan) -> f64 {
        self.intersect(other).map(|s| s.hours()).unwrap_or(0.0)
    }
}

/// Calendar arithmetic pinned to one time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    tz: Tz,
}

impl Default for LocalCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl LocalCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Parse an IANA zone name like "America/Chicago".
    pub fn parse(tz: &str) -> Result<Self, CoreError> {
        let tz: Tz = tz
            .parse()
            .map_err(|_| CoreError::InvalidTimezone(tz.to_string()))?;
        Ok(Self { tz })
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Resolve a local wall-clock time to an instant.
    ///
    /// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
    /// spring-forward gap are read with the offset in effect at that moment in UTC,
    /// which lands just after the gap.
    pub fn resolve(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.tz.from_local_datetime(&local).earliest() {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                let offset = self.tz.offset_from_utc_datetime(&local).fix();
                let utc = local - Duration::seconds(offset.local_minus_utc().into());
                Utc.from_utc_datetime(&utc)
            }
        }
    }

    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        self.resolve(date.and_time(time))
    }

    /// Start of the local day.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.at(date, NaiveTime::MIN)
    }

    /// `[00:00, next day 00:00)` of the local day. Lasts 23 or 25 hours on DST days.
    pub fn day_bounds(&self, date: NaiveDate) -> TimeSpan {
        let next = date.succ_opt().unwrap_or(date);
        TimeSpan::new(self.start_of_day(date), self.start_of_day(next))
    }

    /// Local `[start_hour:00, end_hour:00)` on `date`; `end_hour` 24 means next midnight.
    pub fn window(&self, date: NaiveDate, start_hour: u32, end_hour: u32) -> TimeSpan {
        TimeSpan::new(self.hour_on(date, start_hour), self.hour_on(date, end_hour))
    }

    fn hour_on(&self, date: NaiveDate, hour: u32) -> DateTime<Utc> {
        if hour >= 24 {
            return self.start_of_day(date.succ_opt().unwrap_or(date));
        }
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        self.at(date, time)
    }

    /// Local calendar date an instant falls on.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// Local calendar date an all-day boundary refers to.
    ///
    /// Connectors send date-only values either as UTC midnight (the date lives in
    /// the UTC components) or as local midnight converted to UTC.
    pub fn all_day_date(&self, at: DateTime<Utc>) -> NaiveDate {
        let utc_midnight = at.hour() == 0 && at.minute() == 0 && at.second() == 0;
        if utc_midnight {
            at.date_naive()
        } else {
            self.local_date(at)
        }
    }

    /// The span an event occupies, with all-day events mapped onto whole local days.
    pub fn event_span(&self, event: &CalendarEvent) -> TimeSpan {
        if !event.all_day {
            return TimeSpan::new(event.start, event.end);
        }

        let first = self.all_day_date(event.start);
        let mut last_exclusive = self.all_day_date(event.end);
        if last_exclusive <= first {
            last_exclusive = first.succ_opt().unwrap_or(first);
        }
        TimeSpan::new(self.start_of_day(first), self.start_of_day(last_exclusive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn chicago_day_bounds_are_local_midnights() {
        let cal = LocalCalendar::parse("America/Chicago").unwrap();
        let day = cal.day_bounds(d(2025, 2, 17));
        // Feb is CST (UTC-6)
        assert_eq!(day.start.to_rfc3339(), "2025-02-17T06:00:00+00:00");
        assert_eq!(day.end.to_rfc3339(), "2025-02-18T06:00:00+00:00");
        assert_eq!(day.hours(), 24.0);
    }

    #[test]
    fn dst_spring_forward_day_is_23_hours() {
        let cal = LocalCalendar::parse("America/Chicago").unwrap();
        assert_eq!(cal.day_bounds(d(2025, 3, 9)).hours(), 23.0);
        assert_eq!(cal.day_bounds(d(2025, 11, 2)).hours(), 25.0);
    }

    #[test]
    fn gap_time_resolves_after_the_gap() {
        let cal = LocalCalendar::parse("America/Chicago").unwrap();
        let t = cal.at(d(2025, 3, 9), NaiveTime::from_hms_opt(2, 30, 0).unwrap());
        // 02:30 does not exist; read with CST offset => 08:30Z == 03:30 CDT
        assert_eq!(t.to_rfc3339(), "2025-03-09T08:30:00+00:00");
    }

    #[test]
    fn invalid_timezone_is_reported() {
        assert_eq!(
            LocalCalendar::parse("Mars/Olympus"),
            Err(CoreError::InvalidTimezone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn utc_midnight_all_day_event_maps_to_local_day_west_of_utc() {
        let cal = LocalCalendar::parse("America/Chicago").unwrap();
        let ev = CalendarEvent::new(
            "holiday",
            "Presidents' Day",
            Utc.with_ymd_and_hms(2025, 2, 17, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 18, 0, 0, 0).unwrap(),
        )
        .all_day();

        let span = cal.event_span(&ev);
        assert_eq!(span, cal.day_bounds(d(2025, 2, 17)));
        // A naive UTC reading would have pushed most of it into Feb 16 local.
        assert_eq!(span.overlap_hours(&cal.day_bounds(d(2025, 2, 16))), 0.0);
    }

    #[test]
    fn utc_midnight_all_day_event_maps_to_local_day_east_of_utc() {
        for zone in ["Asia/Tokyo", "Pacific/Auckland"] {
            let cal = LocalCalendar::parse(zone).unwrap();
            let ev = CalendarEvent::new(
                "bday",
                "Birthday",
                Utc.with_ymd_and_hms(2025, 2, 17, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 2, 18, 0, 0, 0).unwrap(),
            )
            .all_day();

            let span = cal.event_span(&ev);
            assert_eq!(span, cal.day_bounds(d(2025, 2, 17)), "zone {zone}");
        }
    }

    #[test]
    fn local_midnight_all_day_event_keeps_its_local_day() {
        let cal = LocalCalendar::parse("Asia/Tokyo").unwrap();
        // 2025-02-17 00:00 JST == 2025-02-16 15:00Z
        let ev = CalendarEvent::new(
            "e",
            "Offsite",
            Utc.with_ymd_and_hms(2025, 2, 16, 15, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 17, 15, 0, 0).unwrap(),
        )
        .all_day();
        assert_eq!(cal.event_span(&ev), cal.day_bounds(d(2025, 2, 17)));
    }

    #[test]
    fn all_day_event_without_end_covers_one_day() {
        let cal = LocalCalendar::utc();
        let start = Utc.with_ymd_and_hms(2025, 2, 19, 0, 0, 0).unwrap();
        let ev = CalendarEvent::new("e", "Trip", start, start).all_day();
        assert_eq!(cal.event_span(&ev).hours(), 24.0);
    }

    #[test]
    fn instant_span_intersects_only_inside() {
        let cal = LocalCalendar::utc();
        let day = cal.day_bounds(d(2025, 2, 17));
        let noon = Utc.with_ymd_and_hms(2025, 2, 17, 12, 0, 0).unwrap();
        let next_midnight = Utc.with_ymd_and_hms(2025, 2, 18, 0, 0, 0).unwrap();
        assert!(TimeSpan::new(noon, noon).intersect(&day).is_some());
        assert!(TimeSpan::new(next_midnight, next_midnight).intersect(&day).is_none());
    }

    #[test]
    fn reversed_span_collapses() {
        let a = Utc.with_ymd_and_hms(2025, 2, 17, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 2, 17, 10, 0, 0).unwrap();
        assert!(TimeSpan::new(a, b).is_instant());
    }
}
