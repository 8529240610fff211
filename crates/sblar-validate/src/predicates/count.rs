use std::collections::BTreeSet;

use super::{failing_pairs, failing_rows, split_values};

/// Values whose number of sub-values falls outside `min..=max`.
///
/// An empty value counts as one sub-value; `max = None` is unbounded.
pub fn has_valid_value_count(column: &[String], min: usize, max: Option<usize>) -> Vec<usize> {
    failing_rows(column, |value| {
        let count = split_values(value).count();
        count >= min && max.is_none_or(|max| count <= max)
    })
}

/// Rows where the field and its related field together carry more than `max`
/// distinct values.
///
/// Sub-values are trimmed, blanks dropped, and `ignored` codes excluded before
/// counting. Each column is de-duplicated on its own.
pub fn has_valid_multi_field_value_count(
    field: &[String],
    related: &[String],
    ignored: &BTreeSet<String>,
    max: usize,
) -> Vec<usize> {
    failing_pairs(field, related, |value, other| {
        distinct_counted(value, ignored) + distinct_counted(other, ignored) <= max
    })
}

fn distinct_counted(value: &str, ignored: &BTreeSet<String>) -> usize {
    split_values(value)
        .map(str::trim)
        .filter(|code| !code.is_empty() && !ignored.contains(*code))
        .collect::<BTreeSet<&str>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::column;

    #[test]
    fn value_count_bounds() {
        let values = column(&["1", "1;2;3;4;5", "1;2;3;4;5;6", ""]);
        assert_eq!(has_valid_value_count(&values, 1, Some(5)), vec![2]);
        assert_eq!(has_valid_value_count(&values, 2, None), vec![0, 3]);
    }

    #[test]
    fn multi_field_count_ignores_filler_codes() {
        let ignored: BTreeSet<String> = ["977".to_string()].into_iter().collect();
        let related = column(&["1;2;977", "1;2;3;4", "1;1;1;1;1", ""]);
        let field = column(&["other", "a;b", "x", " ; "]);
        // row 0: {1,2} + {other} = 3; row 1: 4 + 2 = 6; row 2: {1} + {x} = 2; row 3: 0
        assert_eq!(
            has_valid_multi_field_value_count(&field, &related, &ignored, 5),
            vec![1]
        );
    }
}
