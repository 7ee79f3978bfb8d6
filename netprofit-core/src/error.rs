//! Error taxonomy shared by the loader and the calculation pipeline.
//!
//! Only hard failures live here. Soft data-quality problems (bad dates,
//! non-numeric amounts, absent optional columns) are coerced where they occur
//! and never surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetProfitError {
    /// A required input file was not supplied, or the wrong number of settlement files was given
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A table lacks a column the calculation cannot do without
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// A file could not be opened or parsed
    #[error("failed to read {file}: {reason}")]
    FileParse { file: String, reason: String },
}

impl NetProfitError {
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    pub fn file_parse(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::FileParse {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetProfitError>;
