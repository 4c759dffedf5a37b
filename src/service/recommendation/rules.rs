//! Static recommendation tables
//!
//! Row order is the order in which recommendations are emitted.

use crate::model::{Priority, RecommendationRecord, SymptomAssessmentInput};

/// A recommendation known at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTemplate {
    pub category: &'static str,
    pub recommendation: &'static str,
    pub priority: Priority,
    pub details: &'static str,
}

impl RecordTemplate {
    pub fn to_record(&self) -> RecommendationRecord {
        RecommendationRecord {
            category: self.category.to_string(),
            recommendation: self.recommendation.to_string(),
            priority: self.priority,
            details: self.details.to_string(),
        }
    }
}

/// Records emitted when `applies` holds for the context
pub struct FactorRule<C> {
    pub factor: &'static str,
    pub applies: fn(&C) -> bool,
    pub records: &'static [RecordTemplate],
}

/// Ages strictly above this trigger annual screening advice
const SCREENING_AGE: u32 = 40;

fn age_over_screening(input: &SymptomAssessmentInput) -> bool {
    input.age > SCREENING_AGE
}

fn family_history(input: &SymptomAssessmentInput) -> bool {
    input.family_history
}

fn lump_present(input: &SymptomAssessmentInput) -> bool {
    input.lump_present
}

fn nipple_discharge(input: &SymptomAssessmentInput) -> bool {
    input.nipple_discharge
}

fn skin_changes(input: &SymptomAssessmentInput) -> bool {
    input.skin_changes
}

fn armpit_swelling(input: &SymptomAssessmentInput) -> bool {
    input.armpit_swelling
}

fn asymmetry(input: &SymptomAssessmentInput) -> bool {
    input.asymmetry
}

pub static SYMPTOM_FACTOR_RULES: &[FactorRule<SymptomAssessmentInput>] = &[
    FactorRule {
        factor: "age_over_40",
        applies: age_over_screening,
        records: &[RecordTemplate {
            category: "Screening",
            recommendation: "Schedule annual mammograms",
            priority: Priority::High,
            details: "Women over 40 should have yearly mammograms for early detection.",
        }],
    },
    FactorRule {
        factor: "family_history",
        applies: family_history,
        records: &[
            RecordTemplate {
                category: "Genetic Testing",
                recommendation: "Consider BRCA1/BRCA2 genetic testing",
                priority: Priority::High,
                details: "Family history increases risk. Genetic counseling can help assess inherited risk.",
            },
            RecordTemplate {
                category: "Screening",
                recommendation: "Start screening earlier (age 30-35)",
                priority: Priority::High,
                details: "With family history, earlier and more frequent screening is recommended.",
            },
        ],
    },
    FactorRule {
        factor: "lump_present",
        applies: lump_present,
        records: &[RecordTemplate {
            category: "Immediate Action",
            recommendation: "Schedule clinical breast exam immediately",
            priority: Priority::Urgent,
            details: "Any new lump should be evaluated by a healthcare provider.",
        }],
    },
    FactorRule {
        factor: "nipple_discharge",
        applies: nipple_discharge,
        records: &[RecordTemplate {
            category: "Medical Evaluation",
            recommendation: "Consult doctor about nipple discharge",
            priority: Priority::High,
            details: "Nipple discharge can indicate various conditions and should be evaluated.",
        }],
    },
    FactorRule {
        factor: "skin_changes",
        applies: skin_changes,
        records: &[RecordTemplate {
            category: "Medical Evaluation",
            recommendation: "Get skin changes examined",
            priority: Priority::High,
            details: "Skin dimpling, redness, or texture changes should be evaluated promptly.",
        }],
    },
    FactorRule {
        factor: "armpit_swelling",
        applies: armpit_swelling,
        records: &[RecordTemplate {
            category: "Immediate Action",
            recommendation: "Evaluate lymph node swelling immediately",
            priority: Priority::Urgent,
            details: "Swelling in armpit or near collarbone may indicate lymph node involvement.",
        }],
    },
    FactorRule {
        factor: "asymmetry",
        applies: asymmetry,
        records: &[RecordTemplate {
            category: "Medical Evaluation",
            recommendation: "Assess sudden breast asymmetry",
            priority: Priority::High,
            details: "Sudden changes in breast size or shape should be evaluated.",
        }],
    },
];

pub static SYMPTOM_GENERAL: &[RecordTemplate] = &[
    RecordTemplate {
        category: "Lifestyle",
        recommendation: "Maintain healthy weight",
        priority: Priority::Medium,
        details: "Being overweight increases breast cancer risk, especially after menopause.",
    },
    RecordTemplate {
        category: "Lifestyle",
        recommendation: "Exercise regularly (150 min/week)",
        priority: Priority::Medium,
        details: "Regular physical activity can reduce breast cancer risk by 10-20%.",
    },
    RecordTemplate {
        category: "Lifestyle",
        recommendation: "Limit alcohol consumption",
        priority: Priority::Medium,
        details: "Even small amounts of alcohol can increase risk.",
    },
    RecordTemplate {
        category: "Diet",
        recommendation: "Eat a healthy diet rich in fruits and vegetables",
        priority: Priority::Medium,
        details: "A diet high in vegetables, fruits, and whole grains may help reduce risk.",
    },
    RecordTemplate {
        category: "Self-Care",
        recommendation: "Perform monthly breast self-exams",
        priority: Priority::Medium,
        details: "Know what's normal for you and report any changes to your doctor.",
    },
];

fn malignant(is_malignant: &bool) -> bool {
    *is_malignant
}

fn benign(is_malignant: &bool) -> bool {
    !*is_malignant
}

pub static FEATURE_FACTOR_RULES: &[FactorRule<bool>] = &[
    FactorRule {
        factor: "malignant",
        applies: malignant,
        records: &[
            RecordTemplate {
                category: "Urgent",
                recommendation: "Consult oncologist immediately",
                priority: Priority::Urgent,
                details: "High malignancy probability requires specialist consultation.",
            },
            RecordTemplate {
                category: "Diagnostic",
                recommendation: "Schedule biopsy and additional imaging",
                priority: Priority::Urgent,
                details: "Confirmatory tests are essential for accurate diagnosis.",
            },
            RecordTemplate {
                category: "Support",
                recommendation: "Consider genetic counseling",
                priority: Priority::High,
                details: "Understanding genetic factors can guide treatment and family screening.",
            },
        ],
    },
    FactorRule {
        factor: "benign",
        applies: benign,
        records: &[
            RecordTemplate {
                category: "Follow-up",
                recommendation: "Schedule follow-up in 6 months",
                priority: Priority::Medium,
                details: "Regular monitoring is important even for benign findings.",
            },
            RecordTemplate {
                category: "Screening",
                recommendation: "Continue regular mammograms",
                priority: Priority::Medium,
                details: "Maintain routine screening schedule as recommended by your doctor.",
            },
        ],
    },
];

pub static FEATURE_GENERAL: &[RecordTemplate] = &[
    RecordTemplate {
        category: "Lifestyle",
        recommendation: "Maintain healthy lifestyle",
        priority: Priority::Medium,
        details: "Regular exercise, healthy diet, and limited alcohol reduce cancer risk.",
    },
    RecordTemplate {
        category: "Monitoring",
        recommendation: "Track any changes in breast tissue",
        priority: Priority::Medium,
        details: "Report any new lumps, pain, or changes to your healthcare provider.",
    },
    RecordTemplate {
        category: "Education",
        recommendation: "Learn about breast health",
        priority: Priority::Low,
        details: "Understanding risk factors and symptoms empowers early detection.",
    },
];

pub const HIGH_SEVERITY_OVERRIDE: RecordTemplate = RecordTemplate {
    category: "Urgent",
    recommendation: "Schedule comprehensive medical evaluation",
    priority: Priority::Urgent,
    details: "High risk requires immediate medical attention.",
};

pub const MODERATE_SEVERITY_OVERRIDE: RecordTemplate = RecordTemplate {
    category: "Follow-up",
    recommendation: "Consult healthcare provider within 2 weeks",
    priority: Priority::High,
    details: "Moderate risk warrants professional evaluation.",
};
