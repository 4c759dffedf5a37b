//! Optional statistical classifier behind the feature scorer
//!
//! The scorer only talks to [`ClassifierPort`]. Any error from the port is
//! recovered by the caller with the fallback formula, so implementations are
//! free to fail.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Index of the malignant class in a predicted distribution
pub const MALIGNANT_CLASS_INDEX: usize = 1;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClassifierError {
    #[error("Failed to load classifier model: {0}")]
    Load(String),

    #[error("Feature vector has {actual} values, classifier expects {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Malformed class distribution: {0}")]
    MalformedOutput(String),
}

/// A model that maps a feature vector to class probabilities
pub trait ClassifierPort: Send + Sync {
    /// Number of features the model was trained on
    fn input_width(&self) -> usize;

    /// Probability per class, indexed by class id
    fn predict_probability(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}

/// Pad `features` with zeros to the classifier width and return the malignant
/// class probability as a percentage.
pub fn malignant_percentage(
    classifier: &dyn ClassifierPort,
    features: &[f64],
) -> Result<f64, ClassifierError> {
    let width = classifier.input_width();
    if features.len() > width {
        return Err(ClassifierError::WidthMismatch {
            expected: width,
            actual: features.len(),
        });
    }

    let mut vector = features.to_vec();
    vector.resize(width, 0.0);

    let distribution = classifier.predict_probability(&vector)?;
    let probability = distribution
        .get(MALIGNANT_CLASS_INDEX)
        .copied()
        .ok_or_else(|| {
            ClassifierError::MalformedOutput(format!(
                "expected at least {} classes, got {}",
                MALIGNANT_CLASS_INDEX + 1,
                distribution.len()
            ))
        })?;

    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(ClassifierError::MalformedOutput(format!(
            "malignant probability {} outside [0, 1]",
            probability
        )));
    }

    Ok(probability * 100.0)
}

/// Serialized logistic regression parameters
#[derive(Debug, Clone, Deserialize)]
struct LogisticModelFile {
    weights: Vec<f64>,
    #[serde(default)]
    bias: f64,
    /// Per-feature means for standardization
    #[serde(default)]
    means: Option<Vec<f64>>,
    /// Per-feature standard deviations for standardization
    #[serde(default)]
    scales: Option<Vec<f64>>,
}

/// Binary logistic regression over standardized features
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    weights: Vec<f64>,
    bias: f64,
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl LogisticClassifier {
    /// Build a classifier. Missing means/scales leave features unstandardized.
    pub fn new(
        weights: Vec<f64>,
        bias: f64,
        means: Option<Vec<f64>>,
        scales: Option<Vec<f64>>,
    ) -> Result<Self, ClassifierError> {
        let width = weights.len();
        if width == 0 {
            return Err(ClassifierError::Load("model has no weights".to_string()));
        }

        let means = means.unwrap_or_else(|| vec![0.0; width]);
        let scales = scales.unwrap_or_else(|| vec![1.0; width]);

        if means.len() != width || scales.len() != width {
            return Err(ClassifierError::Load(format!(
                "means/scales must have {} entries",
                width
            )));
        }
        if scales.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ClassifierError::Load("scales must be finite and non-zero".to_string()));
        }

        Ok(Self {
            weights,
            bias,
            means,
            scales,
        })
    }

    /// Load model parameters from a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ClassifierError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ClassifierError> {
        let file: LogisticModelFile =
            serde_yaml::from_str(contents).map_err(|e| ClassifierError::Load(e.to_string()))?;

        Self::new(file.weights, file.bias, file.means, file.scales)
    }
}

impl ClassifierPort for LogisticClassifier {
    fn input_width(&self) -> usize {
        self.weights.len()
    }

    fn predict_probability(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if features.len() != self.weights.len() {
            return Err(ClassifierError::WidthMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let logit = features
            .iter()
            .zip(&self.means)
            .zip(&self.scales)
            .zip(&self.weights)
            .map(|(((x, mean), scale), weight)| (x - mean) / scale * weight)
            .sum::<f64>()
            + self.bias;

        let p = 1.0 / (1.0 + (-logit).exp());
        if !p.is_finite() {
            return Err(ClassifierError::Prediction(format!("non-finite logit {}", logit)));
        }

        Ok(vec![1.0 - p, p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Width of the 30-measurement breast cancer model
    const MODEL_WIDTH: usize = 30;

    fn unstandardized(weights: Vec<f64>) -> LogisticClassifier {
        LogisticClassifier::new(weights, 0.0, None, None).unwrap()
    }

    #[test]
    fn test_logistic_zero_logit_is_even() {
        let classifier = unstandardized(vec![0.0; MODEL_WIDTH]);
        let distribution = classifier.predict_probability(&[1.0; MODEL_WIDTH]).unwrap();
        assert_eq!(distribution, vec![0.5, 0.5]);
    }

    #[test]
    fn test_malignant_percentage_pads_input() {
        let mut weights = vec![0.0; MODEL_WIDTH];
        weights[0] = 1.0;
        let classifier = unstandardized(weights);

        let pct = malignant_percentage(&classifier, &[0.0, 3.0, 3.0, 3.0, 3.0, 3.0]).unwrap();
        assert!((pct - 50.0).abs() < 1e-9);

        let pct = malignant_percentage(&classifier, &[10.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(pct > 99.0);
    }

    #[test]
    fn test_too_many_features_is_rejected() {
        let classifier = unstandardized(vec![0.0; 4]);
        let err = malignant_percentage(&classifier, &[0.0; 6]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::WidthMismatch {
                expected: 4,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_load_with_standardization() {
        let yaml = r#"
weights: [2.0, 0.0]
bias: -1.0
means: [10.0, 0.0]
scales: [2.0, 1.0]
"#;
        let classifier = LogisticClassifier::from_yaml(yaml).unwrap();
        assert_eq!(classifier.input_width(), 2);

        // (11 - 10) / 2 * 2 - 1 = 0
        let distribution = classifier.predict_probability(&[11.0, 5.0]).unwrap();
        assert!((distribution[MALIGNANT_CLASS_INDEX] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_load_rejects_inconsistent_model() {
        assert!(LogisticClassifier::from_yaml("weights: []").is_err());
        assert!(LogisticClassifier::from_yaml("weights: [1.0, 2.0]\nmeans: [0.0]").is_err());
        assert!(LogisticClassifier::from_yaml("weights: [1.0]\nscales: [0.0]").is_err());
        assert!(LogisticClassifier::from_file("/nonexistent/model.yaml").is_err());
    }
}
