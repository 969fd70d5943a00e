//! The query merger: one flat request object for the list and export
//! endpoints.

use crate::page::PageSnapshot;
use crate::query::QueryState;
use crate::sort::SortState;
use serde::Serialize;
use serde_json::{Map, Value};

/// The exact parameter object sent to a list or export endpoint: filter
/// fields, the resolved time range, sort keys, and (for list calls only)
/// pagination keys, merged into a single flat map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRequest {
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl ListRequest {
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }
}

/// Merge filter, sort, and pagination state into a [`ListRequest`].
///
/// Pure and idempotent. Merge order: filter fields first, then the time
/// range, then `orderByColumn`/`isAsc`, then `pageNum`/`pageSize`, so a
/// filter field can never clobber a reserved key. Sort keys are omitted
/// entirely when no sort is active (never sent as empty strings), and
/// page keys are omitted when no page snapshot is supplied, which is how
/// export requests ask for the full matching set.
pub fn build_request<F: Serialize>(
    query: &QueryState<F>,
    sort: Option<&SortState>,
    page: Option<PageSnapshot>,
) -> Result<ListRequest, serde_json::Error> {
    let mut params = match serde_json::to_value(&query.filter)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(serde::ser::Error::custom(format!(
                "filter must serialize to an object, got {other}"
            )))
        }
    };
    // A filter that serializes unset options as null would otherwise send
    // literal nulls on the wire.
    params.retain(|_, value| !value.is_null());

    if let Some((begin, end)) = query.time_range() {
        params.insert("beginTime".to_string(), Value::from(begin));
        params.insert("endTime".to_string(), Value::from(end));
    }

    if let Some(sort) = sort {
        params.insert("orderByColumn".to_string(), Value::from(sort.field.clone()));
        params.insert("isAsc".to_string(), Value::from(sort.direction.as_str()));
    }

    if let Some(page) = page {
        params.insert("pageNum".to_string(), Value::from(page.page_num));
        params.insert("pageSize".to_string(), Value::from(page.page_size));
    }

    Ok(ListRequest { params })
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::page::PageSnapshot;
    use crate::sort::SortDirection;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Serialize)]
    struct ArbFilter {
        name: String,
        status: Option<i64>,
    }

    fn arb_filter() -> impl Strategy<Value = ArbFilter> {
        ("[a-z]{0,12}", proptest::option::of(0..3i64))
            .prop_map(|(name, status)| ArbFilter { name, status })
    }

    fn arb_sort() -> impl Strategy<Value = Option<SortState>> {
        proptest::option::of(("[a-zA-Z]{1,10}", prop_oneof![
            Just(SortDirection::Ascending),
            Just(SortDirection::Descending),
        ])
        .prop_map(|(field, direction)| SortState::new(field, direction)))
    }

    fn arb_page() -> impl Strategy<Value = Option<PageSnapshot>> {
        proptest::option::of((1u64..100, 1u64..100).prop_map(|(page_num, page_size)| {
            PageSnapshot {
                page_num,
                page_size,
            }
        }))
    }

    proptest! {
        /// Building twice from the same inputs yields an identical object.
        #[test]
        fn build_is_idempotent(filter in arb_filter(), sort in arb_sort(), page in arb_page()) {
            let query = QueryState::new(filter);
            let first = build_request(&query, sort.as_ref(), page).expect("request");
            let second = build_request(&query, sort.as_ref(), page).expect("request");
            prop_assert_eq!(first, second);
        }

        /// Sort and page keys appear exactly when their state is present.
        #[test]
        fn reserved_keys_track_inputs(filter in arb_filter(), sort in arb_sort(), page in arb_page()) {
            let query = QueryState::new(filter);
            let request = build_request(&query, sort.as_ref(), page).expect("request");

            prop_assert_eq!(request.contains("orderByColumn"), sort.is_some());
            prop_assert_eq!(request.contains("isAsc"), sort.is_some());
            prop_assert_eq!(request.contains("pageNum"), page.is_some());
            prop_assert_eq!(request.contains("pageSize"), page.is_some());
        }
    }
}
