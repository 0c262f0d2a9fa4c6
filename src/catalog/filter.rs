use super::criteria::CriteriaState;
use super::Record;

/// Narrows `records` by every active facet in a fixed order: search text
/// first, then taxa, species, and origin. Pure function; the result is a
/// fresh sequence preserving the input order.
pub fn apply(records: &[Record], criteria: &CriteriaState) -> Vec<Record> {
    let mut filtered: Vec<Record> = records.to_vec();

    let query = criteria.search.trim().to_lowercase();
    if !query.is_empty() {
        filtered.retain(|record| matches_search(record, &query));
    }
    if !criteria.taxa.is_empty() {
        filtered.retain(|record| record.taxa == criteria.taxa);
    }
    if !criteria.species.is_empty() {
        filtered.retain(|record| record.species == criteria.species);
    }
    if !criteria.origin.is_empty() {
        filtered.retain(|record| record.origin.label() == criteria.origin);
    }

    filtered
}

// `query` must already be lowercased.
fn matches_search(record: &Record, query: &str) -> bool {
    record.common_name.to_lowercase().contains(query)
        || record.scientific_name.to_lowercase().contains(query)
}
