//! Error types for the minilatex library.
//!
//! The compilation pipeline itself is total: malformed source degrades to
//! [`LatexExpression::ParseError`](crate::ast::LatexExpression::ParseError)
//! leaves instead of returning `Err`. The types here cover the surfaces that
//! can genuinely fail, such as loading configuration.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown math backend: {0}")]
    UnknownMathBackend(String),

    #[error("Unknown state carry strategy: {0}")]
    UnknownStateCarry(String),
}
