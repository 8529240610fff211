//! Library side of the `sblar` binary: logging setup and output formatters.

pub mod logging;
pub mod output;
