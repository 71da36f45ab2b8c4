use crate::services::ranker::SortOrder;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Parse an ISO8601 / RFC3339 date string as returned by the YouTube API
pub fn parse_iso8601_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn compare_with_order_float(a: f64, b: f64, order: &SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        SortOrder::Desc => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

pub fn compare_with_order_int<T: Ord>(a: T, b: T, order: &SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => a.cmp(&b),
        SortOrder::Desc => b.cmp(&a),
    }
}

pub fn compare_with_order_str(a: &str, b: &str, order: &SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => a.cmp(b),
        SortOrder::Desc => b.cmp(a),
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_api_timestamps() {
        let ts = parse_iso8601_timestamp("2024-03-01T12:30:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());

        let offset = parse_iso8601_timestamp("2024-03-01T14:30:00+02:00").unwrap();
        assert_eq!(offset, ts);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(parse_iso8601_timestamp("").is_none());
        assert!(parse_iso8601_timestamp("yesterday").is_none());
    }

    #[test]
    fn float_compare_treats_nan_as_equal() {
        assert_eq!(
            compare_with_order_float(f64::NAN, 1.0, &SortOrder::Asc),
            Ordering::Equal
        );
        assert_eq!(
            compare_with_order_float(1.0, 2.0, &SortOrder::Desc),
            Ordering::Greater
        );
    }

    #[test]
    fn int_compare_handles_full_u64_range() {
        assert_eq!(
            compare_with_order_int(u64::MAX, 1u64, &SortOrder::Asc),
            Ordering::Greater
        );
        assert_eq!(
            compare_with_order_int(u64::MAX, 1u64, &SortOrder::Desc),
            Ordering::Less
        );
    }
}
