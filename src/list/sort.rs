//! Sort stage: stable single-field ordering with nulls always last

use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use crate::core::record::Record;
use std::cmp::Ordering;

/// Order two field values for `direction`
///
/// A null (or missing) value sorts after any non-null value in both
/// directions; only non-null comparisons are reversed for `Desc`. Two nulls
/// compare equal so the sort stays stable.
pub fn compare_values(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    direction: SortDirection,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => a.compare(b).reverse(),
        },
    }
}

/// Stable sort of `records` by `field`
pub fn sort_records<R: Record>(records: &mut [&R], field: &str, direction: SortDirection) {
    // Field values are computed once per record, not once per comparison.
    let mut keyed: Vec<(Option<FieldValue>, &R)> = records
        .iter()
        .map(|record| (record.field_value(field), *record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_values(a.as_ref(), b.as_ref(), direction));

    for (slot, (_, record)) in records.iter_mut().zip(keyed) {
        *slot = record;
    }
}
