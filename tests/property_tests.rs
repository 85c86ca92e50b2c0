//! Property-based tests of the list engine
//!
//! Filter, sort and paginate over randomly generated records, checking the
//! laws every screen relies on.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tourdesk::list::{filter_records, page_slice, sort_records, total_pages};
use tourdesk::core::{FieldValue, ListStore, QueryState, Record, SortDirection};
use tourdesk::list::{ListEngine, ListSpec};

// ============================================================================
// Test Record
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Item {
    id: i64,
    name: Option<String>,
    score: Option<i64>,
}

impl Record for Item {
    fn id_field() -> &'static str {
        "id"
    }

    fn record_id(&self) -> i64 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Integer(self.id)),
            "name" => Some(self.name.clone().into()),
            "score" => Some(self.score.into()),
            _ => None,
        }
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["id", "name", "score"]
    }
}

fn items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (prop::option::of("[a-cA-C ]{0,6}"), prop::option::of(-5i64..5)),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, score))| Item {
                id: i as i64 + 1,
                name,
                score,
            })
            .collect()
    })
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn name_field() -> Vec<String> {
    vec!["name".to_string()]
}

fn ids(records: &[&Item]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

// ============================================================================
// Filter
// ============================================================================

proptest! {
    /// A blank term keeps every record in order
    #[test]
    fn prop_blank_search_is_identity(records in items(), blanks in " {0,3}") {
        let kept = filter_records(&records, &blanks, &name_field());
        prop_assert_eq!(ids(&kept), records.iter().map(|r| r.id).collect::<Vec<_>>());
    }

    /// Kept records contain the term; dropped ones do not
    #[test]
    fn prop_search_is_sound_and_complete(records in items(), term in "[a-cA-C]{1,2}") {
        let kept = filter_records(&records, &term, &name_field());
        let kept_ids: HashSet<i64> = kept.iter().map(|r| r.id).collect();
        let needle = term.to_lowercase();

        for record in &records {
            let hit = record
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            prop_assert_eq!(hit, kept_ids.contains(&record.id));
        }
    }
}

// ============================================================================
// Sort
// ============================================================================

proptest! {
    /// Sorting only reorders
    #[test]
    fn prop_sort_is_a_permutation(records in items(), dir in direction()) {
        let mut view: Vec<&Item> = records.iter().collect();
        sort_records(&mut view, "score", dir);

        let mut sorted = ids(&view);
        sorted.sort();
        prop_assert_eq!(sorted, records.iter().map(|r| r.id).collect::<Vec<_>>());
    }

    /// Sorting a sorted view changes nothing
    #[test]
    fn prop_sort_is_idempotent(records in items(), dir in direction()) {
        let mut once: Vec<&Item> = records.iter().collect();
        sort_records(&mut once, "name", dir);
        let mut twice = once.clone();
        sort_records(&mut twice, "name", dir);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    /// Nulls come after every value in both directions
    #[test]
    fn prop_nulls_sort_last(records in items(), dir in direction()) {
        let mut view: Vec<&Item> = records.iter().collect();
        sort_records(&mut view, "score", dir);

        if let Some(first_null) = view.iter().position(|r| r.score.is_none()) {
            prop_assert!(view[first_null..].iter().all(|r| r.score.is_none()));
        }
    }

    /// Values are ordered, and ties keep their original order
    #[test]
    fn prop_sort_is_ordered_and_stable(records in items(), dir in direction()) {
        let mut view: Vec<&Item> = records.iter().collect();
        sort_records(&mut view, "score", dir);

        for pair in view.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].score, pair[1].score) {
                match dir {
                    SortDirection::Asc => prop_assert!(a <= b),
                    SortDirection::Desc => prop_assert!(a >= b),
                }
                if a == b {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

proptest! {
    /// Concatenating every page gives back the whole view
    #[test]
    fn prop_pages_concatenate_to_view(records in items(), page_size in 1usize..10) {
        let pages = total_pages(records.len(), page_size);
        prop_assert_eq!(pages, records.len().div_ceil(page_size));

        let mut joined = Vec::new();
        for page in 1..=pages {
            let slice = page_slice(&records, page, page_size);
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= page_size);
            joined.extend(slice.iter().map(|r| r.id));
        }
        prop_assert_eq!(joined, records.iter().map(|r| r.id).collect::<Vec<_>>());
        prop_assert!(page_slice(&records, pages + 1, page_size).is_empty());
    }

    /// The engine's pagination metadata agrees with its own view
    #[test]
    fn prop_engine_page_matches_view(records in items(), page in 1usize..8, term in "[a-c]{0,1}") {
        let engine = ListEngine::<Item>::new(ListSpec::new("items", &["name"], 4, "score"));
        let store = ListStore::from_records(records);
        let mut query = engine.defaults();
        query.set_search(term);
        query.page = page;

        let view = engine.view(&store, &query);
        let result = engine.query(&store, &query);

        prop_assert_eq!(result.pagination.total, view.len());
        prop_assert_eq!(result.pagination.total_pages, total_pages(view.len(), 4));
        prop_assert_eq!(
            result.items.iter().map(|r| r.id).collect::<Vec<_>>(),
            ids(page_slice(&view, page, 4))
        );
    }
}

// ============================================================================
// Sort Toggle
// ============================================================================

proptest! {
    /// Toggling the active field twice restores the direction
    #[test]
    fn prop_toggle_twice_restores(dir in direction(), page in 1usize..20) {
        let mut query = QueryState::new("score").with_direction(dir);
        query.page = page;

        query.toggle_sort("score");
        prop_assert_eq!(query.sort_direction, dir.flipped());
        query.toggle_sort("score");
        prop_assert_eq!(query.sort_direction, dir);
        prop_assert_eq!(query.page, 1);
    }

    /// Switching fields always starts ascending
    #[test]
    fn prop_toggle_new_field_starts_ascending(dir in direction()) {
        let mut query = QueryState::new("score").with_direction(dir);
        query.toggle_sort("name");
        prop_assert_eq!(query.sort_field.as_str(), "name");
        prop_assert_eq!(query.sort_direction, SortDirection::Asc);
    }
}
