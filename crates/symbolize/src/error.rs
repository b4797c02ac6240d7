use crate::attributes::ValidationErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SymbolizeError {
    #[error("Invalid declaration: {0}")]
    Declaration(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown attribute: {model}.{attribute}")]
    UnknownAttribute { model: String, attribute: String },

    #[error("Unknown predicate: {model}.{predicate}")]
    UnknownPredicate { model: String, predicate: String },

    #[error("Unknown scope: {model}.{scope}")]
    UnknownScope { model: String, scope: String },

    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SymbolizeError {
    pub(crate) fn declaration(model: &str, attribute: &str, reason: impl AsRef<str>) -> Self {
        SymbolizeError::Declaration(format!("{}.{}: {}", model, attribute, reason.as_ref()))
    }
}

pub type Result<T> = std::result::Result<T, SymbolizeError>;
