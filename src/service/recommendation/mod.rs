//! Recommendation assembly
//!
//! Lists are built in three steps:
//! 1. factor rules, walked in table order, contribute records for every factor
//!    that holds;
//! 2. the path's general tail is appended;
//! 3. duplicates are dropped and a single overall-severity record is placed at
//!    index 0 when the score is in the high or moderate band.

pub mod rules;

use std::collections::HashSet;

use crate::model::{RecommendationRecord, SymptomAssessmentInput};
use crate::service::scoring::OverallSeverity;
use rules::{
    FEATURE_FACTOR_RULES, FEATURE_GENERAL, FactorRule, HIGH_SEVERITY_OVERRIDE,
    MODERATE_SEVERITY_OVERRIDE, RecordTemplate, SYMPTOM_FACTOR_RULES, SYMPTOM_GENERAL,
};

/// Findings a scorer hands to the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyContext {
    Symptoms {
        input: SymptomAssessmentInput,
        severity: OverallSeverity,
    },
    Features {
        malignant: bool,
    },
}

/// Build the ordered recommendation list for a scorer's findings
pub fn assemble(context: &AssemblyContext) -> Vec<RecommendationRecord> {
    match context {
        AssemblyContext::Symptoms { input, severity } => {
            assemble_with(SYMPTOM_FACTOR_RULES, SYMPTOM_GENERAL, input, *severity)
        }
        AssemblyContext::Features { malignant } => {
            let severity = if *malignant {
                OverallSeverity::High
            } else {
                OverallSeverity::Baseline
            };
            assemble_with(FEATURE_FACTOR_RULES, FEATURE_GENERAL, malignant, severity)
        }
    }
}

fn assemble_with<C>(
    factor_rules: &[FactorRule<C>],
    general: &[RecordTemplate],
    context: &C,
    severity: OverallSeverity,
) -> Vec<RecommendationRecord> {
    let templates = factor_rules
        .iter()
        .filter(|rule| (rule.applies)(context))
        .inspect(|rule| tracing::trace!(factor = rule.factor, "Recommendation factor applies"))
        .flat_map(|rule| rule.records.iter())
        .chain(general.iter());

    let mut seen = HashSet::new();
    let mut records: Vec<RecommendationRecord> = templates
        .filter(|t| seen.insert((t.category, t.recommendation)))
        .map(RecordTemplate::to_record)
        .collect();

    match severity {
        OverallSeverity::High => records.insert(0, HIGH_SEVERITY_OVERRIDE.to_record()),
        OverallSeverity::Moderate => records.insert(0, MODERATE_SEVERITY_OVERRIDE.to_record()),
        OverallSeverity::Baseline => {}
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn symptoms(input: SymptomAssessmentInput, severity: OverallSeverity) -> Vec<RecommendationRecord> {
        assemble(&AssemblyContext::Symptoms { input, severity })
    }

    fn texts(records: &[RecommendationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.recommendation.as_str()).collect()
    }

    #[test]
    fn test_no_factors_yields_general_tail_only() {
        let records = symptoms(SymptomAssessmentInput::default(), OverallSeverity::Baseline);
        assert_eq!(records.len(), SYMPTOM_GENERAL.len());
        assert_eq!(records[0].recommendation, "Maintain healthy weight");
        assert_eq!(records[4].recommendation, "Perform monthly breast self-exams");
        assert!(records.iter().all(|r| r.priority == Priority::Medium));
    }

    #[test]
    fn test_factor_order_is_fixed() {
        let input = SymptomAssessmentInput {
            age: 41,
            family_history: true,
            lump_present: true,
            nipple_discharge: true,
            skin_changes: true,
            armpit_swelling: true,
            asymmetry: true,
            ..Default::default()
        };
        let records = symptoms(input, OverallSeverity::Baseline);
        assert_eq!(
            &texts(&records)[..8],
            &[
                "Schedule annual mammograms",
                "Consider BRCA1/BRCA2 genetic testing",
                "Start screening earlier (age 30-35)",
                "Schedule clinical breast exam immediately",
                "Consult doctor about nipple discharge",
                "Get skin changes examined",
                "Evaluate lymph node swelling immediately",
                "Assess sudden breast asymmetry",
            ]
        );
        assert_eq!(records.len(), 8 + SYMPTOM_GENERAL.len());
    }

    #[test]
    fn test_age_forty_gets_no_screening_entry() {
        let records = symptoms(
            SymptomAssessmentInput {
                age: 40,
                ..Default::default()
            },
            OverallSeverity::Baseline,
        );
        assert!(!texts(&records).contains(&"Schedule annual mammograms"));
    }

    #[test]
    fn test_breast_pain_and_previous_conditions_have_no_entries() {
        let records = symptoms(
            SymptomAssessmentInput {
                breast_pain: true,
                previous_conditions: true,
                ..Default::default()
            },
            OverallSeverity::Baseline,
        );
        assert_eq!(records.len(), SYMPTOM_GENERAL.len());
    }

    #[test]
    fn test_high_severity_prepends_urgent() {
        let records = symptoms(
            SymptomAssessmentInput {
                lump_present: true,
                ..Default::default()
            },
            OverallSeverity::High,
        );
        assert_eq!(records[0].category, "Urgent");
        assert_eq!(records[0].priority, Priority::Urgent);
        assert_eq!(records[1].recommendation, "Schedule clinical breast exam immediately");
    }

    #[test]
    fn test_moderate_severity_prepends_follow_up() {
        let records = symptoms(SymptomAssessmentInput::default(), OverallSeverity::Moderate);
        assert_eq!(records[0].recommendation, "Consult healthcare provider within 2 weeks");
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records.len(), SYMPTOM_GENERAL.len() + 1);
    }

    #[test]
    fn test_feature_branches() {
        let malignant = assemble(&AssemblyContext::Features { malignant: true });
        assert_eq!(
            texts(&malignant),
            vec![
                "Schedule comprehensive medical evaluation",
                "Consult oncologist immediately",
                "Schedule biopsy and additional imaging",
                "Consider genetic counseling",
                "Maintain healthy lifestyle",
                "Track any changes in breast tissue",
                "Learn about breast health",
            ]
        );
        assert!(malignant[..3].iter().all(|r| r.priority == Priority::Urgent));

        let benign = assemble(&AssemblyContext::Features { malignant: false });
        assert_eq!(
            texts(&benign),
            vec![
                "Schedule follow-up in 6 months",
                "Continue regular mammograms",
                "Maintain healthy lifestyle",
                "Track any changes in breast tissue",
                "Learn about breast health",
            ]
        );
    }

    #[test]
    fn test_feature_tail_is_shared_by_both_branches() {
        for malignant in [true, false] {
            let records = assemble(&AssemblyContext::Features { malignant });
            let tail = &records[records.len() - FEATURE_GENERAL.len()..];
            assert_eq!(tail[2].category, "Education");
            assert_eq!(tail[2].priority, Priority::Low);
        }
    }

    #[test]
    fn test_duplicates_are_dropped() {
        static DUPLICATED: &[RecordTemplate] = &[MODERATE_SEVERITY_OVERRIDE, MODERATE_SEVERITY_OVERRIDE];
        let records = assemble_with::<bool>(&[], DUPLICATED, &false, OverallSeverity::Baseline);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let input = SymptomAssessmentInput {
            age: 55,
            skin_changes: true,
            ..Default::default()
        };
        assert_eq!(
            symptoms(input, OverallSeverity::Moderate),
            symptoms(input, OverallSeverity::Moderate)
        );
    }
}
