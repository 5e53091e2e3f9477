//! Crate-level error types.

use std::fmt;

/// Errors produced by the cinemachine crate.
///
/// Per-tick evaluation never fails; these cover configuration and rig
/// assembly only.
#[derive(Debug)]
pub enum CinemachineError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A camera names a follow, look-at or parent target that the host
    /// did not provide.
    UnknownTarget(String),
    /// Two cameras registered under the same name.
    DuplicateCamera(String),
}

impl fmt::Display for CinemachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UnknownTarget(name) => {
                write!(f, "unknown target transform: {name}")
            }
            Self::DuplicateCamera(name) => {
                write!(f, "a camera named {name:?} already exists")
            }
        }
    }
}

impl std::error::Error for CinemachineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CinemachineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
