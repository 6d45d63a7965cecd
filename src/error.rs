use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("File path error: {0}")]
    Path(String),

    /// A record points at another record that is not loaded. This is a data
    /// integrity problem for an operator, not an empty narrative.
    #[error("Missing {kind} reference: {id}")]
    MissingReference { kind: &'static str, id: String },
}

impl Error {
    pub fn missing(kind: &'static str, id: impl ToString) -> Self {
        Error::MissingReference {
            kind,
            id: id.to_string(),
        }
    }
}
