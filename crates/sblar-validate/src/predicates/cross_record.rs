use std::collections::BTreeMap;

/// Every row whose value appears in more than one row.
///
/// Needs the whole column up front; all occurrences of a repeated value are
/// reported, not just the later ones.
pub fn is_unique_column(column: &[String]) -> Vec<usize> {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for value in column {
        *occurrences.entry(value.as_str()).or_default() += 1;
    }
    column
        .iter()
        .enumerate()
        .filter(|(_, value)| occurrences.get(value.as_str()).copied().unwrap_or(0) > 1)
        .map(|(idx, _)| idx)
        .collect()
}
