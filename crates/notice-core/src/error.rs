//! Errors raised while editing, checking or loading a project record.
//!
//! Generation itself cannot fail; these only surface at the edges.

use crate::catalog::CatalogId;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("unknown section '{0}' (expected general, fire or accessibility)")]
    UnknownSection(String),

    #[error("unknown field '{field}' in section '{section}'")]
    UnknownField { section: String, field: String },

    #[error("malformed field path '{0}' (expected section.field)")]
    MalformedPath(String),

    #[error("{path} is a {actual} field, not a {expected} field")]
    WrongKind {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("unknown catalog '{0}'")]
    UnknownCatalog(String),

    #[error("{path}: code '{code}' is not defined in catalog '{catalog}'")]
    UnknownCode {
        path: String,
        catalog: CatalogId,
        code: String,
    },

    #[error("invalid record: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] toml::ser::Error),
}
