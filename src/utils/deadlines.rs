//! Deadline arithmetic and ordering.
//!
//! Every request re-runs [`enrich_conferences`] over the records loaded from
//! disk. Day counts follow whole-day floor semantics: a deadline is taken to
//! start at 00:00 on its date, so a deadline dated today is already `-1` once
//! the clock has moved past midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, TrackerError};
use crate::models::{ConferenceRecord, DeadlineEntry, EnrichedConference};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string.
///
/// # Examples
/// ```
/// use deadline_tracker::utils::parse_date;
///
/// assert!(parse_date("2025-03-14").is_ok());
/// assert!(parse_date("14/03/2025").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    parse_field_date("date", value)
}

fn parse_field_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| TrackerError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Whole days from `now` until midnight at the start of `date`, rounded down.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let delta = date.and_time(NaiveTime::MIN) - now;
    let whole = delta.num_days();
    // num_days truncates toward zero
    if delta < Duration::days(whole) {
        whole - 1
    } else {
        whole
    }
}

/// Position of a conference in the listing. Variant order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Next deadline is today or later; holds days remaining
    Upcoming(i64),
    /// Next deadline has passed; holds days since it passed
    Passed(i64),
    /// No dated deadline at all
    Unscheduled,
}

pub fn sort_key(conference: &EnrichedConference) -> SortKey {
    match &conference.next_deadline {
        None => SortKey::Unscheduled,
        Some(next) if next.days < 0 => SortKey::Passed(next.days.abs()),
        Some(next) => SortKey::Upcoming(next.days),
    }
}

/// Compute the derived fields for one record
pub fn enrich_conference(record: ConferenceRecord, now: NaiveDateTime) -> Result<EnrichedConference> {
    let mut all_deadlines = record
        .deadlines
        .dated()
        .map(|(deadline_type, date)| -> Result<DeadlineEntry> {
            let parsed = parse_field_date(&format!("{}.{}", record.name, deadline_type), date)?;
            Ok(DeadlineEntry {
                deadline_type: deadline_type.to_string(),
                date: date.to_string(),
                days: days_until(parsed, now),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    all_deadlines.sort_by_key(|entry| entry.days);

    let conference_days = match record.conference_date.as_deref() {
        Some(date) if !date.is_empty() => {
            let field = format!("{}.conference_date", record.name);
            Some(days_until(parse_field_date(&field, date)?, now))
        }
        _ => None,
    };

    Ok(EnrichedConference {
        next_deadline: all_deadlines.first().cloned(),
        all_deadlines,
        conference_days,
        conference: record,
    })
}

/// Enrich every record and order the list for display.
///
/// Upcoming deadlines come first (soonest first), then passed ones (most
/// recently passed first), then conferences with no dated deadline.
/// The first malformed date aborts the whole call.
pub fn enrich_conferences(
    records: Vec<ConferenceRecord>,
    now: NaiveDateTime,
) -> Result<Vec<EnrichedConference>> {
    let mut enriched = records
        .into_iter()
        .map(|record| enrich_conference(record, now))
        .collect::<Result<Vec<_>>>()?;

    enriched.sort_by_key(sort_key);

    Ok(enriched)
}
