use crate::collector::TabKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StabilityError {
    #[error("Please fill in all required study information fields (missing: {})", .0.join(", "))]
    MissingStudyFields(Vec<&'static str>),

    #[error("At least one formulation must be provided for the {0} study")]
    NoFormulations(TabKind),

    #[error("At least one freeze/thaw cycle must be included")]
    NoFreezeThawCycles,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}
