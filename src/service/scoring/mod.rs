//! Deterministic risk scoring
//!
//! Both scorers are pure functions of their input: no I/O, no shared state and
//! no clock. The service layer adds identifiers and timestamps afterwards.

pub mod feature;
pub mod input;
pub mod outcome;
pub mod symptom;

pub use feature::score_features;
pub use outcome::OverallSeverity;
pub use symptom::score_symptoms;

/// A numeric request field could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid value for {field}: {message}")]
pub struct InvalidInputError {
    pub field: &'static str,
    pub message: String,
}

impl InvalidInputError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
