//! Error types for vocabulary loading and caller-side input checks.

use std::path::PathBuf;

/// Errors raised while loading or compiling a [`crate::Vocabulary`].
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The vocabulary file could not be read.
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vocabulary document is not valid JSON for the expected shape.
    #[error("invalid vocabulary document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A clickbait pattern failed to compile.
    #[error("clickbait pattern #{index} ({pattern:?}) is not a valid regex: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("intensifier prefixes must not be empty")]
    EmptyPrefix,

    /// An intensifier prefix produced an unusable pattern (e.g. size limits).
    #[error("intensifier prefix {prefix:?} cannot be matched: {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}

/// Rejections for text that should never reach the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Texto vacío. Pega un titular o una frase.")]
    Empty,

    #[error("Texto demasiado largo (máx. {max} caracteres, recibidos {len}).")]
    TooLong { len: usize, max: usize },
}
