//! Error types.
//!
//! - `SubsetError`: the library taxonomy returned by the evaluator and the data layer.
//! - `AppError`: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Failures surfaced by subset evaluation and data preparation.
///
/// None of these are retried: the computation is deterministic, so a bad input
/// fails the same way every time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubsetError {
    /// Shape mismatch between the response and the predictor matrix.
    #[error("Dimension mismatch: {what} has {found} rows, expected {expected}")]
    Dimension {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Non-numeric or missing data where a numeric value is required.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Sample size too small for the requested model sizes (Cp / AICc undefined).
    #[error("Domain error: {0}")]
    Domain(String),
}

impl SubsetError {
    pub fn input(message: impl Into<String>) -> Self {
        SubsetError::Input(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        SubsetError::Domain(message.into())
    }
}

pub type SubsetResult<T> = Result<T, SubsetError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SubsetError> for AppError {
    fn from(err: SubsetError) -> Self {
        let exit_code = match err {
            SubsetError::Dimension { .. } | SubsetError::Input(_) => 2,
            SubsetError::Domain(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
