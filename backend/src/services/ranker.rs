use crate::models::RankedRow;
use crate::utils::{compare_with_order_float, compare_with_order_int, compare_with_order_str};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Rank,
    Title,
    Channel,
    Views,
    AgeHours,
    Vph,
    PublishedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// The ordering currently applied to a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: SortKey::Vph,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Same key toggles the direction, a new key starts descending. An
    /// explicit direction always wins.
    pub fn next(self, key: SortKey, requested: Option<SortOrder>) -> SortState {
        let order = match requested {
            Some(order) => order,
            None if key == self.key => self.order.toggled(),
            None => SortOrder::Desc,
        };
        SortState { key, order }
    }
}

fn compare_rows(a: &RankedRow, b: &RankedRow, key: SortKey, order: &SortOrder) -> Ordering {
    match key {
        SortKey::Rank => compare_with_order_int(a.rank, b.rank, order),
        SortKey::Title => compare_with_order_str(&a.title, &b.title, order),
        SortKey::Channel => compare_with_order_str(&a.channel_title, &b.channel_title, order),
        SortKey::Views => compare_with_order_int(a.view_count, b.view_count, order),
        SortKey::AgeHours => compare_with_order_float(a.age_hours, b.age_hours, order),
        SortKey::Vph => compare_with_order_float(a.vph, b.vph, order),
        SortKey::PublishedAt => compare_with_order_int(
            a.published_at.timestamp_millis(),
            b.published_at.timestamp_millis(),
            order,
        ),
    }
}

/// Stable sort by `key`, then renumber ranks 1..=n in the new order.
pub fn rank(mut rows: Vec<RankedRow>, key: SortKey, order: SortOrder) -> Vec<RankedRow> {
    rows.sort_by(|a, b| compare_rows(a, b, key, &order));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn row(id: &str, title: &str, views: u64, vph: f64) -> RankedRow {
        let published_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + Duration::hours(views as i64 % 24);
        RankedRow {
            rank: 0,
            id: id.to_string(),
            title: title.to_string(),
            channel_title: format!("chan-{id}"),
            published_at,
            view_count: views,
            age_hours: 1.0,
            vph,
            url: format!("https://www.youtube.com/watch?v={id}"),
        }
    }

    fn ids(rows: &[RankedRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn ranks_are_contiguous_from_one() {
        let rows = rank(
            vec![row("a", "x", 1, 5.0), row("b", "y", 2, 50.0), row("c", "z", 3, 0.5)],
            SortKey::Vph,
            SortOrder::Desc,
        );
        assert_eq!(ids(&rows), vec!["b", "a", "c"]);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn equal_keys_keep_prior_order_in_both_directions() {
        let input = vec![
            row("first", "same", 1, 10.0),
            row("other", "aaa", 2, 99.0),
            row("second", "same", 3, 10.0),
        ];
        let desc = rank(input.clone(), SortKey::Vph, SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["other", "first", "second"]);
        let asc = rank(input.clone(), SortKey::Vph, SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["first", "second", "other"]);

        let by_title = rank(input, SortKey::Title, SortOrder::Desc);
        assert_eq!(ids(&by_title), vec!["first", "second", "other"]);
    }

    #[test]
    fn strings_compare_lexicographically() {
        let rows = rank(
            vec![row("1", "banana", 1, 1.0), row("2", "Apple", 2, 1.0), row("3", "apple", 3, 1.0)],
            SortKey::Title,
            SortOrder::Asc,
        );
        assert_eq!(ids(&rows), vec!["2", "3", "1"]);
    }

    #[test]
    fn numeric_keys_compare_numerically() {
        let rows = rank(
            vec![row("a", "t", 9, 1.0), row("b", "t", 100, 1.0), row("c", "t", 20, 1.0)],
            SortKey::Views,
            SortOrder::Asc,
        );
        assert_eq!(ids(&rows), vec!["a", "c", "b"]);
    }

    #[test]
    fn view_counts_beyond_i64_sort_above_smaller_ones() {
        let rows = rank(
            vec![row("small", "t", 5, 1.0), row("huge", "t", u64::MAX, 1.0)],
            SortKey::Views,
            SortOrder::Desc,
        );
        assert_eq!(ids(&rows), vec!["huge", "small"]);
    }

    #[test]
    fn sorting_same_key_twice_reverses() {
        let input = vec![row("a", "t", 1, 3.0), row("b", "t", 2, 1.0), row("c", "t", 3, 2.0)];
        let state = SortState::default().next(SortKey::Views, None);
        assert_eq!(state.order, SortOrder::Desc);
        let first = rank(input, state.key, state.order);

        let state = state.next(SortKey::Views, None);
        assert_eq!(state.order, SortOrder::Asc);
        let second = rank(first.clone(), state.key, state.order);

        let mut reversed = ids(&first);
        reversed.reverse();
        assert_eq!(ids(&second), reversed);
    }

    #[test]
    fn sort_state_transitions() {
        let state = SortState::default();
        assert_eq!(state.key, SortKey::Vph);
        assert_eq!(state.next(SortKey::Vph, None).order, SortOrder::Asc);
        assert_eq!(state.next(SortKey::Title, None).order, SortOrder::Desc);
        assert_eq!(
            state.next(SortKey::Title, Some(SortOrder::Asc)).order,
            SortOrder::Asc
        );
    }

    #[test]
    fn sort_keys_use_camel_case_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::PublishedAt).unwrap(),
            "\"publishedAt\""
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"ageHours\"").unwrap(),
            SortKey::AgeHours
        );
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"desc\"");
    }
}
