//! Minimal iCalendar (RFC 5545) VEVENT reader.
//!
//! Supports folded lines, UTC / floating / TZID date-times and VALUE=DATE
//! all-day events. RRULEs are kept as metadata, not expanded.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use prepweek_core::{CalendarEvent, EventMetadata, EventSource, LocalCalendar};
use regex::Regex;
use tracing::warn;

/// Join RFC 5545 folded lines (continuations start with a space or tab).
fn unfold(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            if let Some(last) = out.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        out.push(line.to_string());
    }
    out
}

fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn param<'a>(params: &'a str, name: &str) -> Option<&'a str> {
    params
        .split(';')
        .filter_map(|p| p.split_once('='))
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim_matches('"'))
}

/// Parse a DTSTART/DTEND value; returns the instant and whether it was a date.
fn parse_ics_time(value: &str, params: &str, cal: &LocalCalendar) -> Option<(DateTime<Utc>, bool)> {
    let value = value.trim();
    let is_date = param(params, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || value.len() == 8;
    if is_date {
        let d = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        return Some((d.and_time(NaiveTime::MIN).and_utc(), true));
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let ndt = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S").ok()?;
        return Some((ndt.and_utc(), false));
    }

    let ndt = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
    let zone = match param(params, "TZID") {
        Some(tzid) => LocalCalendar::parse(tzid).unwrap_or_else(|_| {
            warn!(tzid, "unknown TZID; using configured timezone");
            *cal
        }),
        None => *cal,
    };
    Some((zone.resolve(ndt), false))
}

#[derive(Debug, Default)]
struct PendingEvent {
    uid: Option<String>,
    summary: Option<String>,
    start: Option<(DateTime<Utc>, bool)>,
    end: Option<DateTime<Utc>>,
    location: Option<String>,
    description: Option<String>,
    rrule: Option<String>,
}

impl PendingEvent {
    fn finish(self, index: usize, source: EventSource) -> Option<CalendarEvent> {
        let Some((start, all_day)) = self.start else {
            warn!(index, uid = ?self.uid, "VEVENT without DTSTART skipped");
            return None;
        };
        let end = self.end.unwrap_or(if all_day { start + Duration::days(1) } else { start });

        Some(CalendarEvent {
            id: self.uid.unwrap_or_else(|| format!("ics-{index}")),
            title: self.summary.unwrap_or_default(),
            start,
            end,
            all_day,
            source,
            metadata: EventMetadata {
                location: self.location,
                description: self.description,
                recurrence: self.rrule,
            },
        })
    }
}

pub fn parse_ics(
    text: &str,
    cal: &LocalCalendar,
    source: EventSource,
) -> Result<Vec<CalendarEvent>> {
    // NAME;PARAM=...;PARAM=...:VALUE
    let prop_re = Regex::new(r"^(?P<name>[A-Za-z0-9-]+)(?P<params>(?:;[^:]*)?):(?P<value>.*)$")
        .context("compiling ICS property regex")?;

    let mut out = Vec::new();
    let mut current: Option<PendingEvent> = None;
    let mut index = 0usize;

    for line in unfold(text) {
        let Some(caps) = prop_re.captures(&line) else {
            continue;
        };
        let name = caps["name"].to_ascii_uppercase();
        let params = &caps["params"];
        let value = &caps["value"];

        if name == "BEGIN" && value.eq_ignore_ascii_case("VEVENT") {
            current = Some(PendingEvent::default());
            continue;
        }
        if name == "END" && value.eq_ignore_ascii_case("VEVENT") {
            if let Some(pending) = current.take() {
                if let Some(ev) = pending.finish(index, source) {
                    out.push(ev);
                }
                index += 1;
            }
            continue;
        }

        let Some(ev) = current.as_mut() else {
            continue;
        };
        match name.as_str() {
            "UID" => ev.uid = Some(value.trim().to_string()),
            "SUMMARY" => ev.summary = Some(unescape_text(value)),
            "LOCATION" => ev.location = Some(unescape_text(value)),
            "DESCRIPTION" => ev.description = Some(unescape_text(value)),
            "RRULE" => ev.rrule = Some(format!("RRULE:{value}")),
            "DTSTART" => {
                ev.start = parse_ics_time(value, params, cal);
                if ev.start.is_none() {
                    warn!(value, "unparseable DTSTART");
                }
            }
            "DTEND" => ev.end = parse_ics_time(value, params, cal).map(|(t, _)| t),
            _ => {}
        }
    }

    Ok(out)
}
