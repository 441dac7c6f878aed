//! Error types for the outer surfaces of the generator.
//!
//! Generation itself never fails; these cover coordinate parsing and
//! configuration loading.

/// Errors raised while parsing user input or loading configuration
#[derive(thiserror::Error, Debug)]
pub enum UniverseError {
    /// Tile key that is not of the form `z/x/y`
    #[error("invalid tile coordinate '{0}', expected z/x/y")]
    InvalidCoordinate(String),

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, UniverseError>;
