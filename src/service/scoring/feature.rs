//! Malignancy probability from tumor measurements

use super::InvalidInputError;
use super::outcome::{clamp_percentage, is_malignant, probability_outcome, round2};
use crate::model::{FeatureAssessmentInput, FeatureAssessmentRequest, ProbabilityResult};
use crate::service::classifier::{ClassifierPort, malignant_percentage};
use crate::service::recommendation::{AssemblyContext, assemble};

/// Scale applied to the mean feature value by the fallback formula
const FALLBACK_SCALE: f64 = 5.0;

/// Parse tumor measurements and score them, using the classifier when one is available
pub fn score_features(
    request: &FeatureAssessmentRequest,
    classifier: Option<&dyn ClassifierPort>,
) -> Result<ProbabilityResult, InvalidInputError> {
    let input = FeatureAssessmentInput::try_from(request)?;
    Ok(compute_probability(&input, classifier))
}

/// Score already-parsed measurements
pub fn compute_probability(
    input: &FeatureAssessmentInput,
    classifier: Option<&dyn ClassifierPort>,
) -> ProbabilityResult {
    let features = input.to_array();

    let malignant = match classifier {
        Some(classifier) => match malignant_percentage(classifier, &features) {
            Ok(probability) => probability,
            Err(e) => {
                tracing::warn!(error = %e, "Classifier unavailable, using fallback formula");
                fallback_probability(&features)
            }
        },
        None => fallback_probability(&features),
    };
    let malignant = clamp_percentage(malignant);
    let malignant_probability = round2(malignant);

    tracing::debug!(
        malignant_probability = malignant_probability,
        classifier = classifier.is_some(),
        "Computed malignancy probability"
    );

    ProbabilityResult {
        malignant_probability,
        benign_probability: round2(100.0 - malignant_probability),
        outcome: probability_outcome(malignant),
        preventions: assemble(&AssemblyContext::Features {
            malignant: is_malignant(malignant),
        }),
    }
}

/// `min(mean(features) * 5, 100)`
pub fn fallback_probability(features: &[f64]) -> f64 {
    if features.is_empty() {
        return 0.0;
    }
    let mean = features.iter().sum::<f64>() / features.len() as f64;
    clamp_percentage(mean * FALLBACK_SCALE)
}
