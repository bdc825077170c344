//! Crate error type.
//!
//! Configuration problems are fatal and surface from `GameSession::new`
//! before any tick runs. Geometry degeneracies are recovered inside the
//! simulation and only reach callers through `Vector2Ext::divide`.

use std::fmt;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A vector was divided by exactly zero.
    DivideByZero,

    /// Two centres coincide, so no direction between them exists.
    DegenerateGeometry,

    /// A setting is outside the range the simulation can run with.
    InvalidConfiguration {
        /// Name of the offending setting.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: String,
    },

    /// Reading or writing a settings or score file failed.
    Io(std::io::Error),

    /// A settings or score file could not be (de)serialized.
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivideByZero => write!(f, "vector divided by zero"),
            Error::DegenerateGeometry => {
                write!(f, "coincident positions have no direction between them")
            }
            Error::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration for '{}': {}", field, reason)
            }
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
