use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid entity name: {0:?}")]
    InvalidEntityName(String),
    #[error("invalid attribute name: {0:?}")]
    InvalidAttributeName(String),
    #[error("invalid entity path: {0:?}")]
    InvalidEntityPath(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
