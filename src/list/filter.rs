//! Search filter: case-insensitive substring match over designated fields

use crate::core::record::Record;

/// Keep the records whose designated fields contain `term`
///
/// An empty or whitespace-only term keeps everything. Matching is plain
/// substring on lowercased text; null fields never match. Input order is
/// preserved.
pub fn filter_records<'a, R: Record>(
    records: impl IntoIterator<Item = &'a R>,
    term: &str,
    fields: &[String],
) -> Vec<&'a R> {
    if term.trim().is_empty() {
        return records.into_iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_term(*record, &needle, fields))
        .collect()
}

/// Whether any designated field of `record` contains the lowercased needle
pub fn matches_term<R: Record>(record: &R, needle: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| {
        record
            .field_value(field)
            .and_then(|value| value.search_text())
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}
