//! Assessment request and result models
//!
//! Request types mirror the JSON the frontend posts: symptom answers arrive as
//! `"yes"` strings and numbers may arrive either as JSON numbers or strings, so
//! the raw values are kept as `serde_json::Value` until the scorers parse them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::RecommendationRecord;

/// Symptom questionnaire as posted by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAssessmentRequest {
    #[schema(value_type = Option<u32>, example = 45)]
    pub age: Option<Value>,
    #[schema(value_type = Option<String>, example = "yes")]
    pub family_history: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub previous_conditions: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub lump_present: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub nipple_discharge: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub skin_changes: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub breast_pain: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub armpit_swelling: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub asymmetry: Option<Value>,
}

/// Tumor measurement features as posted by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAssessmentRequest {
    #[schema(value_type = Option<f64>, example = 14.2)]
    pub radius_mean: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub texture_mean: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub perimeter_mean: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub area_mean: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub smoothness_mean: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub compactness_mean: Option<Value>,
}

/// Parsed symptom answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymptomAssessmentInput {
    pub age: u32,
    pub family_history: bool,
    pub previous_conditions: bool,
    pub lump_present: bool,
    pub nipple_discharge: bool,
    pub skin_changes: bool,
    pub breast_pain: bool,
    pub armpit_swelling: bool,
    pub asymmetry: bool,
}

/// Parsed tumor measurements, in the order the classifier expects them
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureAssessmentInput {
    pub radius_mean: f64,
    pub texture_mean: f64,
    pub perimeter_mean: f64,
    pub area_mean: f64,
    pub smoothness_mean: f64,
    pub compactness_mean: f64,
}

impl FeatureAssessmentInput {
    pub const FEATURE_COUNT: usize = 6;

    pub fn to_array(&self) -> [f64; Self::FEATURE_COUNT] {
        [
            self.radius_mean,
            self.texture_mean,
            self.perimeter_mean,
            self.area_mean,
            self.smoothness_mean,
            self.compactness_mean,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RiskOutcome {
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProbabilityOutcome {
    Malignant,
    Benign,
}

/// Symptom-path result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskResult {
    /// Composite score in [0, 100], two decimals
    pub risk_percentage: f64,
    pub outcome: RiskOutcome,
    pub preventions: Vec<RecommendationRecord>,
}

/// Feature-path result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProbabilityResult {
    pub malignant_probability: f64,
    pub benign_probability: f64,
    pub outcome: ProbabilityOutcome,
    pub preventions: Vec<RecommendationRecord>,
}

/// Either scorer's result, tagged with the assessment type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum AssessmentResult {
    #[serde(rename = "symptom-based")]
    SymptomBased(RiskResult),
    #[serde(rename = "technical")]
    Technical(ProbabilityResult),
}

impl AssessmentResult {
    pub fn type_name(&self) -> &'static str {
        match self {
            AssessmentResult::SymptomBased(_) => "symptom-based",
            AssessmentResult::Technical(_) => "technical",
        }
    }
}

/// An assessment result stamped for the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Caller the assessment was made for, `anonymous` without a token
    pub user_email: String,
    /// Request body as submitted
    #[schema(value_type = Object)]
    pub input_data: Value,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

impl AssessmentRecord {
    pub fn new(user_email: impl Into<String>, input_data: Value, result: AssessmentResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            user_email: user_email.into(),
            input_data,
            result,
        }
    }
}
