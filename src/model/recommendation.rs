use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Urgency of a recommendation. Variants are declared in ascending order so
/// the derived `Ord` ranks `Urgent` highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// One advisory entry returned alongside a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecommendationRecord {
    /// Grouping label such as "Screening", "Lifestyle" or "Urgent"
    pub category: String,
    /// Short imperative text
    pub recommendation: String,
    pub priority: Priority,
    /// Explanatory text
    pub details: String,
}
