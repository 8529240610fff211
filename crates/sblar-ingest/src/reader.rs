//! Register CSV loading.
//!
//! The first row names the columns. Cell values are kept exactly as written:
//! no trimming, no type coercion. Only header names are normalised.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info_span};

use sblar_model::Dataset;

use crate::error::{IngestError, Result};

/// Header text with a leading byte-order mark and surrounding spaces removed.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Read a register CSV file into a [`Dataset`].
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|err| IngestError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(err),
    })?;
    read_dataset_from_reader(file, path)
}

/// Read register CSV from any reader. `source` only labels errors.
///
/// Records shorter than the header row are padded with empty values; longer
/// records are rejected.
pub fn read_dataset_from_reader<R: Read>(input: R, source: &Path) -> Result<Dataset> {
    let span = info_span!("read_dataset", source = %source.display());
    let _guard = span.enter();

    let csv_error = |err: csv::Error| IngestError::Csv {
        path: source.to_path_buf(),
        source: err,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: source.to_path_buf(),
        });
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < width {
            row.resize(width, String::new());
        }
        rows.push(row);
    }

    let dataset = Dataset::new(headers, rows).map_err(|err| IngestError::Dataset {
        path: source.to_path_buf(),
        source: err,
    })?;
    debug!(
        records = dataset.height(),
        columns = dataset.width(),
        "register loaded"
    );
    Ok(dataset)
}
