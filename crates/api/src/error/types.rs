//! Error type definitions for block cipher mode operations

#[cfg(feature = "std")]
use std::string::String;

/// Primary error type for chunkcrypt operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required parameter is missing, has the wrong length, or is unsafe
    /// to use (e.g. a reused counter)
    InvalidParameter {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The requested capability does not exist
    NotImplemented { feature: &'static str },

    /// The object is not in a state that allows the call
    InvalidState {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for chunkcrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            Self::InvalidParameter { context, message } => {
                write!(f, "Invalid parameter {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::InvalidParameter { context } => {
                write!(f, "Invalid parameter: {}", context)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::NotImplemented { feature } => {
                write!(f, "{} is not implemented", feature)
            }
            #[cfg(feature = "std")]
            Self::InvalidState { context, message } => {
                write!(f, "Invalid state in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::InvalidState { context } => {
                write!(f, "Invalid state in {}", context)
            }
        }
    }
}
