use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Upstream {url} responded with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed upstream payload: {message}")]
    MalformedPayload { message: String },

    #[error("Species not found in records: {species}")]
    RecordNotFound { species: String },

    #[error("Column '{column}' not found in record file")]
    MissingColumn { column: String },
}

impl AtlasError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AtlasError::ApiError(_) | AtlasError::UpstreamStatus { .. } => {
                "Could not reach a remote data source".to_string()
            }
            AtlasError::MalformedPayload { .. } => {
                "A remote data source returned data in an unexpected format".to_string()
            }
            AtlasError::CsvError(_) | AtlasError::MissingColumn { .. } => {
                format!("The record file could not be read: {}", self)
            }
            AtlasError::IoError(e) => format!("File access failed: {}", e),
            AtlasError::SerializationError(_) => "Failed to render the map report".to_string(),
            AtlasError::ConfigError { .. }
            | AtlasError::InvalidConfigValueError { .. }
            | AtlasError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            AtlasError::RecordNotFound { species } => {
                format!("No record named '{}' in the record file", species)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AtlasError::ApiError(_) | AtlasError::UpstreamStatus { .. } => {
                "Check network connectivity or disable the remote layers (--gbif / --inaturalist)"
            }
            AtlasError::MalformedPayload { .. } => {
                "Verify the configured base URLs point at the GBIF / iNaturalist v1 APIs"
            }
            AtlasError::CsvError(_) | AtlasError::IoError(_) => {
                "Make sure the record file exists and is a valid UTF-8 CSV file"
            }
            AtlasError::MissingColumn { .. } => {
                "Set [records] species_column / places_column to the header names used in the file"
            }
            AtlasError::SerializationError(_) => "Re-run with --verbose and report the error",
            AtlasError::ConfigError { .. }
            | AtlasError::InvalidConfigValueError { .. }
            | AtlasError::MissingConfigError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
            AtlasError::RecordNotFound { .. } => {
                "Use --list to print the species names available in the record file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
