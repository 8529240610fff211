use std::fmt;

use serde::{Deserialize, Serialize};

use super::{failing_rows, is_blank, parse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::GreaterThanOrEqual => ">=",
            Comparison::LessThan => "<",
        }
    }

    pub fn holds(self, value: f64, limit: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > limit,
            Comparison::GreaterThanOrEqual => value >= limit,
            Comparison::LessThan => value < limit,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric values that fail `value <op> limit`.
///
/// Values that do not parse as numbers are left to the numeric format rule
/// and never reported here.
pub fn compare(column: &[String], op: Comparison, limit: f64, accept_blank: bool) -> Vec<usize> {
    failing_rows(column, |value| {
        if is_blank(value) {
            return accept_blank;
        }
        parse_number(value).is_none_or(|number| op.holds(number, limit))
    })
}

pub fn is_greater_than(column: &[String], limit: f64, accept_blank: bool) -> Vec<usize> {
    compare(column, Comparison::GreaterThan, limit, accept_blank)
}

pub fn is_greater_than_or_equal_to(column: &[String], limit: f64, accept_blank: bool) -> Vec<usize> {
    compare(column, Comparison::GreaterThanOrEqual, limit, accept_blank)
}

pub fn is_less_than(column: &[String], limit: f64, accept_blank: bool) -> Vec<usize> {
    compare(column, Comparison::LessThan, limit, accept_blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::column;

    #[test]
    fn comparisons() {
        let values = column(&["0", "1", "1199.99", "1200", "", "abc"]);
        assert_eq!(compare(&values, Comparison::GreaterThanOrEqual, 1.0, true), vec![0]);
        assert_eq!(compare(&values, Comparison::GreaterThan, 0.0, true), vec![0]);
        assert_eq!(compare(&values, Comparison::LessThan, 1200.0, true), vec![3]);
        assert_eq!(compare(&values, Comparison::LessThan, 1200.0, false), vec![3, 4]);
    }

    #[test]
    fn named_comparisons_match_operator() {
        let values = column(&["-1", "0", "0.5"]);
        assert_eq!(is_greater_than(&values, 0.0, false), vec![0, 1]);
        assert_eq!(is_greater_than_or_equal_to(&values, 0.0, false), vec![0]);
        assert_eq!(is_less_than(&values, 0.5, false), vec![2]);
    }
}
