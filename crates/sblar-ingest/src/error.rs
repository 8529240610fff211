use std::path::PathBuf;

use sblar_model::DatasetError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid register in {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
