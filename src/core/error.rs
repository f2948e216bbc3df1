use thiserror::Error;

use crate::services::StoreError;

/// Errors raised by growth scoring and assessment
#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Age {age} months is outside the reference range (0-{max} months)")]
    AgeOutOfRange { age: f64, max: u32 },

    #[error("Alert store error: {0}")]
    Store(#[from] StoreError),
}
