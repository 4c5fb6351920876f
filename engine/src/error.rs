use std::path::PathBuf;
use thiserror::Error;

/// Startup failures: configuration, reading and normalizing the data file.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot read data file '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("CSV data format error: {0}")]
    Parse(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// Reasons a predefined question has no answer in the loaded table.
/// These never fail a request; they are shown to the user via [`AnswerError::user_message`].
#[derive(Error, Debug, PartialEq)]
pub enum AnswerError {
    #[error("No data for {company} in fiscal year {fiscal_year}")]
    LookupMiss { company: String, fiscal_year: i32 },

    #[error("No data for {company} in any fiscal year")]
    CompanyMiss { company: String },

    #[error("No data for any company in fiscal year {fiscal_year}")]
    YearMiss { fiscal_year: i32 },

    #[error("{metric} is missing for {company} in fiscal year {fiscal_year}")]
    MissingValue {
        company: String,
        fiscal_year: i32,
        metric: &'static str,
    },
}

impl AnswerError {
    /// Sentence shown on the page in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            AnswerError::LookupMiss { company, fiscal_year } => {
                format!("No data is available for {} in Fiscal Year {}.", company, fiscal_year)
            }
            AnswerError::CompanyMiss { company } => {
                format!("No data is available for {}.", company)
            }
            AnswerError::YearMiss { fiscal_year } => {
                format!("No data is available for Fiscal Year {}.", fiscal_year)
            }
            AnswerError::MissingValue { company, fiscal_year, metric } => {
                format!(
                    "{}'s {} for Fiscal Year {} is not available.",
                    company, metric, fiscal_year
                )
            }
        }
    }
}
