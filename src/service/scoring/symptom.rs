//! Weighted additive symptom risk model

use super::InvalidInputError;
use super::outcome::{clamp_percentage, risk_outcome, risk_severity, round2};
use crate::model::{RiskResult, SymptomAssessmentInput, SymptomAssessmentRequest};
use crate::service::recommendation::{AssemblyContext, assemble};

/// Ages strictly above this use the steeper multiplier
const AGE_MULTIPLIER_CUTOFF: u32 = 50;
const AGE_MULTIPLIER_SENIOR: f64 = 0.5;
const AGE_MULTIPLIER_DEFAULT: f64 = 0.2;

const WEIGHT_FAMILY_HISTORY: f64 = 20.0;
const WEIGHT_PREVIOUS_CONDITIONS: f64 = 15.0;
const WEIGHT_LUMP_PRESENT: f64 = 25.0;
const WEIGHT_NIPPLE_DISCHARGE: f64 = 15.0;
const WEIGHT_SKIN_CHANGES: f64 = 20.0;
const WEIGHT_BREAST_PAIN: f64 = 10.0;
const WEIGHT_ARMPIT_SWELLING: f64 = 22.0;
const WEIGHT_ASYMMETRY: f64 = 18.0;

/// Parse a symptom questionnaire and score it
pub fn score_symptoms(request: &SymptomAssessmentRequest) -> Result<RiskResult, InvalidInputError> {
    let input = SymptomAssessmentInput::try_from(request)?;
    Ok(compute_risk(&input))
}

/// Score already-parsed symptom answers
pub fn compute_risk(input: &SymptomAssessmentInput) -> RiskResult {
    let raw_score = age_component(input.age) + symptom_component(input);
    let risk = clamp_percentage(raw_score);
    let severity = risk_severity(risk);

    tracing::debug!(
        age = input.age,
        raw_score = raw_score,
        risk_percentage = risk,
        severity = ?severity,
        "Computed symptom risk score"
    );

    RiskResult {
        risk_percentage: round2(risk),
        outcome: risk_outcome(risk),
        preventions: assemble(&AssemblyContext::Symptoms {
            input: *input,
            severity,
        }),
    }
}

fn age_component(age: u32) -> f64 {
    let multiplier = if age > AGE_MULTIPLIER_CUTOFF {
        AGE_MULTIPLIER_SENIOR
    } else {
        AGE_MULTIPLIER_DEFAULT
    };
    f64::from(age) * multiplier
}

fn symptom_component(input: &SymptomAssessmentInput) -> f64 {
    [
        (input.family_history, WEIGHT_FAMILY_HISTORY),
        (input.previous_conditions, WEIGHT_PREVIOUS_CONDITIONS),
        (input.lump_present, WEIGHT_LUMP_PRESENT),
        (input.nipple_discharge, WEIGHT_NIPPLE_DISCHARGE),
        (input.skin_changes, WEIGHT_SKIN_CHANGES),
        (input.breast_pain, WEIGHT_BREAST_PAIN),
        (input.armpit_swelling, WEIGHT_ARMPIT_SWELLING),
        (input.asymmetry, WEIGHT_ASYMMETRY),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, weight)| weight)
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, RiskOutcome};
    use serde_json::json;

    fn request(value: serde_json::Value) -> SymptomAssessmentRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_age_only_above_cutoff() {
        let result = score_symptoms(&request(json!({ "age": 51 }))).unwrap();
        assert_eq!(result.risk_percentage, 25.5);
        assert_eq!(result.outcome, RiskOutcome::LowRisk);
    }

    #[test]
    fn test_age_cutoff_is_strict() {
        let at_cutoff = compute_risk(&SymptomAssessmentInput {
            age: 50,
            ..Default::default()
        });
        assert_eq!(at_cutoff.risk_percentage, 10.0);
    }

    #[test]
    fn test_high_risk_symptoms_put_urgent_first() {
        let result = score_symptoms(&request(json!({
            "age": 0,
            "lumpPresent": "yes",
            "armpitSwelling": "yes",
            "asymmetry": "yes"
        })))
        .unwrap();

        assert_eq!(result.risk_percentage, 65.0);
        assert_eq!(result.outcome, RiskOutcome::HighRisk);
        assert_eq!(result.preventions[0].priority, Priority::Urgent);
        assert_eq!(
            result.preventions[0].recommendation,
            "Schedule comprehensive medical evaluation"
        );
    }

    #[test]
    fn test_family_history_low_risk() {
        let result = score_symptoms(&request(json!({
            "age": 45,
            "familyHistory": "yes"
        })))
        .unwrap();

        assert_eq!(result.risk_percentage, 29.0);
        assert_eq!(result.outcome, RiskOutcome::LowRisk);

        let texts: Vec<&str> = result
            .preventions
            .iter()
            .map(|p| p.recommendation.as_str())
            .collect();
        let annual = texts.iter().position(|t| *t == "Schedule annual mammograms").unwrap();
        let genetic = texts
            .iter()
            .position(|t| *t == "Consider BRCA1/BRCA2 genetic testing")
            .unwrap();
        let earlier = texts
            .iter()
            .position(|t| *t == "Start screening earlier (age 30-35)")
            .unwrap();
        assert!(annual < genetic && genetic < earlier);
        assert_eq!(annual, 0);
        assert!(result.preventions.iter().all(|p| p.category != "Urgent"));
        assert!(result.preventions.iter().all(|p| p.category != "Follow-up"));
    }

    #[test]
    fn test_band_boundaries() {
        // 20 + 10 = 30 exactly
        let thirty = compute_risk(&SymptomAssessmentInput {
            family_history: true,
            breast_pain: true,
            ..Default::default()
        });
        assert_eq!(thirty.risk_percentage, 30.0);
        assert_eq!(thirty.outcome, RiskOutcome::LowRisk);

        // 25 + 20 + 15 = 60 exactly
        let sixty = compute_risk(&SymptomAssessmentInput {
            lump_present: true,
            skin_changes: true,
            nipple_discharge: true,
            ..Default::default()
        });
        assert_eq!(sixty.risk_percentage, 60.0);
        assert_eq!(sixty.outcome, RiskOutcome::ModerateRisk);
        assert_eq!(sixty.preventions[0].priority, Priority::High);
        assert_eq!(
            sixty.preventions[0].recommendation,
            "Consult healthcare provider within 2 weeks"
        );
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let result = compute_risk(&SymptomAssessmentInput {
            age: 90,
            family_history: true,
            previous_conditions: true,
            lump_present: true,
            nipple_discharge: true,
            skin_changes: true,
            breast_pain: true,
            armpit_swelling: true,
            asymmetry: true,
        });
        assert_eq!(result.risk_percentage, 100.0);
        assert_eq!(result.outcome, RiskOutcome::HighRisk);
    }

    #[test]
    fn test_score_stays_in_range_for_all_ages() {
        for age in (0..=200).step_by(7) {
            let result = compute_risk(&SymptomAssessmentInput {
                age,
                lump_present: age % 2 == 0,
                family_history: age % 3 == 0,
                ..Default::default()
            });
            assert!((0.0..=100.0).contains(&result.risk_percentage));
        }
    }

    #[test]
    fn test_malformed_booleans_are_false() {
        let result = score_symptoms(&request(json!({
            "age": 20,
            "lumpPresent": true,
            "skinChanges": "YES",
            "breastPain": 1
        })))
        .unwrap();
        assert_eq!(result.risk_percentage, 4.0);
    }

    #[test]
    fn test_invalid_age_is_rejected() {
        let err = score_symptoms(&request(json!({ "age": "unknown" }))).unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let req = request(json!({
            "age": 58,
            "familyHistory": "yes",
            "nippleDischarge": "yes"
        }));
        assert_eq!(score_symptoms(&req).unwrap(), score_symptoms(&req).unwrap());
    }
}
