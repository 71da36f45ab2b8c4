use crate::models::{RankedRow, RawCatalogRecord};
use crate::services::ranker::{rank, SortKey, SortOrder};
use crate::utils::watch_url;
use chrono::{DateTime, Utc};

/// Lower bound for the age of a video, in hours.
pub const AGE_FLOOR_HOURS: f64 = 0.01;

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Hours since publication, never below [`AGE_FLOOR_HOURS`]. A publish date in
/// the future counts as zero elapsed time.
pub fn age_hours(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = (now - published_at).num_milliseconds().max(0);
    (elapsed_ms as f64 / MILLIS_PER_HOUR).max(AGE_FLOOR_HOURS)
}

pub fn vph(view_count: u64, age_hours: f64) -> f64 {
    view_count as f64 / age_hours
}

/// Returns `None` for rows that would carry a meaningless rate: no usable
/// publish date, an age still sitting on the floor, or a non-finite vph.
pub fn to_ranked_row(record: RawCatalogRecord, now: DateTime<Utc>) -> Option<RankedRow> {
    let published_at = record.published_at?;
    let age_hours = age_hours(published_at, now);
    let vph = vph(record.view_count, age_hours);

    if !vph.is_finite() || age_hours <= AGE_FLOOR_HOURS {
        return None;
    }

    Some(RankedRow {
        rank: 0,
        url: watch_url(&record.id),
        id: record.id,
        title: record.title,
        channel_title: record.channel_title,
        published_at,
        view_count: record.view_count,
        age_hours,
        vph,
    })
}

/// Converts fetched records to rows in the default order (velocity, descending).
pub fn compute_rows(records: Vec<RawCatalogRecord>, now: DateTime<Utc>) -> Vec<RankedRow> {
    let rows = records
        .into_iter()
        .filter_map(|record| to_ranked_row(record, now))
        .collect();
    rank(rows, SortKey::Vph, SortOrder::Desc)
}
