use thiserror::Error;

use crate::spatial::LengthUnit;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Threshold given in {found} but the network uses {expected}")]
    UnitMismatch {
        expected: LengthUnit,
        found: LengthUnit,
    },
    #[error("Network has no usable nodes")]
    EmptyNetwork,
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
