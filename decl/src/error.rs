//! Error types for declaration documents.
//!
//! Covers file access, JSON/YAML parsing, structural problems in a document,
//! and validation failures surfaced through a [`DeclarationSet`](crate::DeclarationSet).

use keyword_args_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or using declaration documents.
#[derive(Debug, Error)]
pub enum DeclError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Document-level structural problem (e.g. empty version).
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// An argument entry inside a declaration could not be understood.
    #[error("invalid argument in declaration '{declaration}': {reason}")]
    InvalidArgument {
        /// Declaration the entry belongs to.
        declaration: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A value with no counterpart in the host value model (e.g. an object).
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Two declarations in the same document share a name.
    #[error("duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Lookup of a declaration name that was never loaded.
    #[error("declaration not found: {0}")]
    DeclarationNotFound(String),

    /// The input was rejected by the declaration.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience alias for results with [`DeclError`].
pub type Result<T> = std::result::Result<T, DeclError>;
