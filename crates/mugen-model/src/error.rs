use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown severity: {value}")]
    UnknownSeverity { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
