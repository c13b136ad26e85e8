//! Next-day slot selection over the 3-hour-step forecast feed.

use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};

use crate::model::ForecastEntry;

/// Select the entry that approximates "midday tomorrow": the first one whose
/// local calendar date is `reference` + 1 day and whose local hour is ≥ 11.
///
/// `utc_offset_secs` is the feed's shift from UTC (OpenWeather's
/// `city.timezone`). Returns `None` when the feed has no qualifying entry,
/// e.g. a short horizon; callers must tolerate a missing next-day scenario.
pub fn select_next_day_noon(
    entries: &[ForecastEntry],
    reference: DateTime<Utc>,
    utc_offset_secs: i32,
) -> Option<&ForecastEntry> {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or(FixedOffset::east_opt(0)?);
    let target_date = (reference.with_timezone(&offset) + Duration::days(1)).date_naive();

    entries.iter().find(|entry| {
        match DateTime::<Utc>::from_timestamp(entry.dt, 0) {
            Some(utc) => {
                let local = utc.with_timezone(&offset);
                local.date_naive() == target_date && local.hour() >= 11
            }
            None => false,
        }
    })
}
