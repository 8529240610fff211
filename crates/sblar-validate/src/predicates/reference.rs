use sblar_model::ReferenceData;

use super::{failing_rows, is_blank};

/// Values that are not members of the reference code set `set`.
pub fn is_valid_code(
    column: &[String],
    reference: &dyn ReferenceData,
    set: &str,
    accept_blank: bool,
) -> Vec<usize> {
    failing_rows(column, |value| {
        if is_blank(value) {
            return accept_blank;
        }
        reference.is_member(set, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::column;
    use sblar_model::{NAICS_CODES, StaticReferenceData};

    #[test]
    fn membership_through_reference_data() {
        let reference = StaticReferenceData::new().with_set(NAICS_CODES, ["111", "541"]);
        let values = column(&["111", "999", "", "541"]);
        assert_eq!(is_valid_code(&values, &reference, NAICS_CODES, true), vec![1]);
        assert_eq!(is_valid_code(&values, &reference, NAICS_CODES, false), vec![1, 2]);
    }
}
