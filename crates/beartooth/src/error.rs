use thiserror::Error;

pub type Result<T> = std::result::Result<T, BeartoothError>;

/// Boxed error coming back from an external composer or solver.
pub type ComposerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum BeartoothError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid altitude at line {line}: {value}")]
    LandscapeParse {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid sample row {row}: {message}")]
    SampleRow { row: usize, message: String },

    #[error("Invalid count at row {row}: {value}")]
    CountParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Solve failed")]
    SolveFailed {
        #[source]
        source: ComposerError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for BeartoothError {
    fn from(err: toml::de::Error) -> Self {
        BeartoothError::Configuration(format!("TOML parse error: {}", err))
    }
}
