//! Domain error types.

/// Top-level error type for techscore.
#[derive(Debug, thiserror::Error)]
pub enum TechscoreError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("{ticker}: missing required price field {field}")]
    MissingField { ticker: String, field: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TechscoreError> for std::process::ExitCode {
    fn from(err: &TechscoreError) -> Self {
        let code: u8 = match err {
            TechscoreError::Io(_) => 1,
            TechscoreError::ConfigParse { .. }
            | TechscoreError::ConfigMissing { .. }
            | TechscoreError::ConfigInvalid { .. } => 2,
            TechscoreError::DataSource { .. } => 3,
            TechscoreError::MissingField { .. } | TechscoreError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
