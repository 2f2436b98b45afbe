use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical column: {column}")]
    UnknownCanonicalColumn { column: String },
    #[error("canonical column selected more than once: {column}")]
    DuplicateSelection { column: String },
    #[error("no selection given for canonical column: {column}")]
    MissingSelection { column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
