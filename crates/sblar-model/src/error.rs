use thiserror::Error;

/// Errors raised while assembling a [`Dataset`](crate::Dataset).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },
    #[error("row {row} has {found} values but the dataset has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column '{name}' has {found} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("column '{name}' not found")]
    UnknownColumn { name: String },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
