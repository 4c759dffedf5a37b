//! Parsing of loosely typed request fields
//!
//! Yes/no answers are true only for the exact string `"yes"`. Numbers may be
//! JSON numbers or numeric strings. Absent and `null` fields take their zero
//! default. Negative values are clamped to zero.

use serde_json::Value;

use super::InvalidInputError;
use crate::model::{
    FeatureAssessmentInput, FeatureAssessmentRequest, SymptomAssessmentInput,
    SymptomAssessmentRequest,
};

const YES: &str = "yes";

pub fn parse_yes(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if s == YES)
}

pub fn parse_age(value: Option<&Value>) -> Result<u32, InvalidInputError> {
    let age: i64 = match value {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                i64::try_from(v).unwrap_or(i64::MAX)
            } else if let Some(v) = n.as_i64() {
                v
            } else {
                return Err(InvalidInputError::new(
                    "age",
                    format!("expected a whole number, got {}", n),
                ));
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            InvalidInputError::new("age", format!("expected a whole number, got {:?}", s))
        })?,
        Some(other) => {
            return Err(InvalidInputError::new(
                "age",
                format!("expected a whole number, got {}", other),
            ));
        }
    };

    if age < 0 {
        tracing::debug!(age = age, "Negative age clamped to zero");
    }

    Ok(u32::try_from(age.max(0)).unwrap_or(u32::MAX))
}

pub fn parse_measurement(field: &'static str, value: Option<&Value>) -> Result<f64, InvalidInputError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let measurement = parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| InvalidInputError::new(field, "expected a finite number"))?;

    if measurement < 0.0 {
        tracing::debug!(field = field, value = measurement, "Negative measurement clamped to zero");
        return Ok(0.0);
    }

    Ok(measurement)
}

impl TryFrom<&SymptomAssessmentRequest> for SymptomAssessmentInput {
    type Error = InvalidInputError;

    fn try_from(request: &SymptomAssessmentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            age: parse_age(request.age.as_ref())?,
            family_history: parse_yes(request.family_history.as_ref()),
            previous_conditions: parse_yes(request.previous_conditions.as_ref()),
            lump_present: parse_yes(request.lump_present.as_ref()),
            nipple_discharge: parse_yes(request.nipple_discharge.as_ref()),
            skin_changes: parse_yes(request.skin_changes.as_ref()),
            breast_pain: parse_yes(request.breast_pain.as_ref()),
            armpit_swelling: parse_yes(request.armpit_swelling.as_ref()),
            asymmetry: parse_yes(request.asymmetry.as_ref()),
        })
    }
}

impl TryFrom<&FeatureAssessmentRequest> for FeatureAssessmentInput {
    type Error = InvalidInputError;

    fn try_from(request: &FeatureAssessmentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            radius_mean: parse_measurement("radiusMean", request.radius_mean.as_ref())?,
            texture_mean: parse_measurement("textureMean", request.texture_mean.as_ref())?,
            perimeter_mean: parse_measurement("perimeterMean", request.perimeter_mean.as_ref())?,
            area_mean: parse_measurement("areaMean", request.area_mean.as_ref())?,
            smoothness_mean: parse_measurement("smoothnessMean", request.smoothness_mean.as_ref())?,
            compactness_mean: parse_measurement(
                "compactnessMean",
                request.compactness_mean.as_ref(),
            )?,
        })
    }
}
