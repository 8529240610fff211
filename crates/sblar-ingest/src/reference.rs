//! Reference code sets loaded from CSV.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use sblar_model::{CENSUS_GEOIDS, NAICS_CODES, ReferenceData, StaticReferenceData};

use crate::error::{IngestError, Result};
use crate::reader::normalize_header;

/// Column holding the code in a NAICS reference file.
pub const NAICS_COLUMN: &str = "code";
/// Column holding the tract GEOID in a census reference file.
pub const CENSUS_COLUMN: &str = "geoid";

/// Read the distinct non-blank values of `column` from a CSV file.
///
/// Values are trimmed; reference files are maintained by hand and often
/// carry stray spaces.
pub fn load_code_set(path: &Path, column: &str) -> Result<BTreeSet<String>> {
    let csv_error = |err: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source: err,
    };
    let file = File::open(path).map_err(|err| csv_error(csv::Error::from(err)))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let position = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|header| normalize_header(header) == column)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut codes = BTreeSet::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(value) = record.get(position).map(str::trim)
            && !value.is_empty()
        {
            codes.insert(value.to_string());
        }
    }
    debug!(path = %path.display(), column, codes = codes.len(), "code set loaded");
    Ok(codes)
}

/// Reference data backed by NAICS and census CSV files.
#[derive(Debug, Clone, Default)]
pub struct CsvReferenceData {
    inner: StaticReferenceData,
}

impl CsvReferenceData {
    /// Load whichever files are given. A missing file leaves its set empty,
    /// so every membership test against it fails.
    pub fn load(naics: Option<&Path>, census: Option<&Path>) -> Result<Self> {
        let mut inner = StaticReferenceData::new();
        if let Some(path) = naics {
            inner.insert_set(NAICS_CODES, load_code_set(path, NAICS_COLUMN)?);
        }
        if let Some(path) = census {
            inner.insert_set(CENSUS_GEOIDS, load_code_set(path, CENSUS_COLUMN)?);
        }
        info!(
            naics = inner.len(NAICS_CODES),
            census_geoids = inner.len(CENSUS_GEOIDS),
            "reference data loaded"
        );
        Ok(Self { inner })
    }

    pub fn into_inner(self) -> StaticReferenceData {
        self.inner
    }
}

impl ReferenceData for CsvReferenceData {
    fn is_member(&self, set: &str, code: &str) -> bool {
        self.inner.is_member(set, code)
    }

    fn all_codes(&self, set: &str) -> BTreeSet<String> {
        self.inner.all_codes(set)
    }
}
