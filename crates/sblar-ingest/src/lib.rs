#![deny(unsafe_code)]

pub mod error;
pub mod reader;
pub mod reference;

pub use error::{IngestError, Result};
pub use reader::{read_dataset, read_dataset_from_reader};
pub use reference::{CENSUS_COLUMN, CsvReferenceData, NAICS_COLUMN, load_code_set};
