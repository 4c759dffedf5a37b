//! Band thresholds, clamping and rounding shared by both scorers

use crate::model::{ProbabilityOutcome, RiskOutcome};

/// Scores strictly above this are high risk
pub const HIGH_RISK_THRESHOLD: f64 = 60.0;
/// Scores strictly above this (and not high) are moderate risk
pub const MODERATE_RISK_THRESHOLD: f64 = 30.0;
/// Malignant probabilities strictly above this are classified malignant
pub const MALIGNANT_THRESHOLD: f64 = 50.0;

const MAX_PERCENTAGE: f64 = 100.0;

/// Severity of the aggregate score, used to pick the overall recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallSeverity {
    High,
    Moderate,
    Baseline,
}

/// Clamp a score into [0, 100]. NaN collapses to 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_PERCENTAGE)
}

/// Round to two decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn risk_severity(risk_percentage: f64) -> OverallSeverity {
    if risk_percentage > HIGH_RISK_THRESHOLD {
        OverallSeverity::High
    } else if risk_percentage > MODERATE_RISK_THRESHOLD {
        OverallSeverity::Moderate
    } else {
        OverallSeverity::Baseline
    }
}

pub fn risk_outcome(risk_percentage: f64) -> RiskOutcome {
    match risk_severity(risk_percentage) {
        OverallSeverity::High => RiskOutcome::HighRisk,
        OverallSeverity::Moderate => RiskOutcome::ModerateRisk,
        OverallSeverity::Baseline => RiskOutcome::LowRisk,
    }
}

pub fn is_malignant(malignant_probability: f64) -> bool {
    malignant_probability > MALIGNANT_THRESHOLD
}

pub fn probability_outcome(malignant_probability: f64) -> ProbabilityOutcome {
    if is_malignant(malignant_probability) {
        ProbabilityOutcome::Malignant
    } else {
        ProbabilityOutcome::Benign
    }
}
