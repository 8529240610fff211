//! In-memory register dataset.
//!
//! Every value is kept as text exactly as submitted. Columns are stored
//! contiguously so that validation predicates can borrow a whole column as a
//! slice.

use std::collections::BTreeMap;

use crate::error::{DatasetError, Result};

/// An immutable, column-major table of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
    index: BTreeMap<String, usize>,
    height: usize,
}

impl Dataset {
    /// Build a dataset from a header row and row-major values.
    ///
    /// Every row must have exactly one value per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let index = build_index(&headers)?;
        let width = headers.len();
        let height = rows.len();
        let mut columns: Vec<Vec<String>> = (0..width).map(|_| Vec::with_capacity(height)).collect();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(DatasetError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Ok(Self {
            headers,
            columns,
            index,
            height,
        })
    }

    /// Build a dataset from named columns. All columns must have equal length.
    pub fn from_columns<N, V>(columns: Vec<(N, Vec<V>)>) -> Result<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut headers = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            headers.push(name.into());
            values.push(column.into_iter().map(Into::into).collect::<Vec<String>>());
        }
        let index = build_index(&headers)?;
        let height = values.first().map_or(0, Vec::len);
        for (name, column) in headers.iter().zip(&values) {
            if column.len() != height {
                return Err(DatasetError::ColumnLength {
                    name: name.clone(),
                    expected: height,
                    found: column.len(),
                });
            }
        }
        Ok(Self {
            headers,
            columns: values,
            index,
            height,
        })
    }

    /// Build a dataset from per-row `(field, value)` pairs.
    ///
    /// Columns appear in first-seen order. A field absent from a row is the
    /// empty string for that row.
    pub fn from_records<R, K, V>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dataset = Self::default();
        for record in records {
            let row = dataset.height;
            for (key, value) in record {
                let key = key.into();
                let col_idx = match dataset.index.get(&key) {
                    Some(idx) => *idx,
                    None => {
                        let idx = dataset.headers.len();
                        dataset.index.insert(key.clone(), idx);
                        dataset.headers.push(key);
                        dataset.columns.push(vec![String::new(); row]);
                        idx
                    }
                };
                let column = &mut dataset.columns[col_idx];
                if column.len() > row {
                    column[row] = value.into();
                } else {
                    column.push(value.into());
                }
            }
            dataset.height += 1;
            for column in &mut dataset.columns {
                column.resize(dataset.height, String::new());
            }
        }
        dataset
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Borrow an entire column.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|idx| self.columns[*idx].as_slice())
    }

    /// Borrow an entire column, failing when it is absent.
    pub fn require_column(&self, name: &str) -> Result<&[String]> {
        self.column(name).ok_or_else(|| DatasetError::UnknownColumn {
            name: name.to_string(),
        })
    }

    /// Value of `name` at `row`.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        self.column(name)
            .and_then(|column| column.get(row))
            .map(String::as_str)
    }

    /// All `(field, value)` pairs of one row, in column order.
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &str)>> {
        if row >= self.height {
            return None;
        }
        Some(
            self.headers
                .iter()
                .zip(&self.columns)
                .map(|(name, column)| (name.as_str(), column[row].as_str()))
                .collect(),
        )
    }
}

fn build_index(headers: &[String]) -> Result<BTreeMap<String, usize>> {
    let mut index = BTreeMap::new();
    for (idx, name) in headers.iter().enumerate() {
        if index.insert(name.clone(), idx).is_some() {
            return Err(DatasetError::DuplicateColumn { name: name.clone() });
        }
    }
    Ok(index)
}
