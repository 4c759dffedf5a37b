//! Keyword-matched answers and static educational resources

use serde::Serialize;
use utoipa::ToSchema;

struct Topic {
    keywords: &'static [&'static str],
    response: &'static str,
}

/// Topics are checked in order; the first keyword hit wins
const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["symptom", "sign", "lump", "pain", "discharge", "change"],
        response: "Common breast cancer symptoms include: a lump in the breast or underarm, changes in breast size or shape, nipple discharge (especially bloody), skin changes (dimpling, redness), and persistent breast pain. However, many breast cancers have no symptoms in early stages, which is why regular screening is important.",
    },
    Topic {
        keywords: &["prevent", "avoid", "reduce risk", "lifestyle"],
        response: "While not all breast cancers can be prevented, you can reduce your risk by: maintaining a healthy weight, exercising regularly (at least 150 minutes per week), limiting alcohol consumption, avoiding smoking, breastfeeding if possible, and limiting hormone therapy. Regular screening is also crucial for early detection.",
    },
    Topic {
        keywords: &["screening", "mammogram", "test", "check", "exam"],
        response: "Screening recommendations: Women 40-44 can start annual mammograms, women 45-54 should get annual mammograms, women 55+ can switch to every 2 years or continue yearly. Monthly self-exams and clinical breast exams are also important. Talk to your doctor about your personal screening schedule based on your risk factors.",
    },
    Topic {
        keywords: &["treatment", "therapy", "cure", "surgery", "chemotherapy", "radiation"],
        response: "Breast cancer treatment depends on the type, stage, and individual factors. Options include: surgery (lumpectomy or mastectomy), radiation therapy, chemotherapy, hormone therapy, targeted therapy, and immunotherapy. Most patients receive a combination of treatments. Your oncologist will create a personalized treatment plan.",
    },
    Topic {
        keywords: &["risk", "chance", "likely", "factor", "cause"],
        response: "Risk factors include: age (risk increases with age), family history, genetic mutations (BRCA1/BRCA2), personal history of breast cancer, dense breast tissue, early menstruation or late menopause, never having children or having first child after 30, obesity, and alcohol consumption. Having risk factors doesn't mean you'll get cancer, and many people with cancer have no known risk factors.",
    },
    Topic {
        keywords: &["diagnose", "detect", "find", "biopsy"],
        response: "Breast cancer is diagnosed through: mammography, ultrasound, MRI, and biopsy (the definitive test). If an abnormality is found, a biopsy will be performed to examine tissue under a microscope. Additional tests may include blood tests and imaging to determine if cancer has spread.",
    },
];

const DEFAULT_RESPONSE: &str = "I can help answer questions about breast cancer symptoms, prevention, screening, treatment, risk factors, and diagnosis. Please ask a specific question about any of these topics, and I'll provide detailed information. Remember, for personalized medical advice, always consult with a healthcare professional.";

/// Answer a free-text question from the topic table
pub fn answer_question(question: &str) -> &'static str {
    let question = question.to_lowercase();

    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| question.contains(k)))
        .map(|topic| topic.response)
        .unwrap_or(DEFAULT_RESPONSE)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EducationalResource {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub fn educational_resources() -> Vec<EducationalResource> {
    vec![
        EducationalResource {
            id: 1,
            title: "Understanding Breast Cancer",
            description: "Learn about breast cancer types, stages, and how it develops.",
            category: "basics",
        },
        EducationalResource {
            id: 2,
            title: "Early Detection and Screening",
            description: "Importance of mammograms, self-exams, and clinical examinations.",
            category: "screening",
        },
        EducationalResource {
            id: 3,
            title: "Risk Factors and Prevention",
            description: "Understand risk factors and steps to reduce your risk.",
            category: "prevention",
        },
        EducationalResource {
            id: 4,
            title: "Treatment Options",
            description: "Overview of surgery, chemotherapy, radiation, and other treatments.",
            category: "treatment",
        },
        EducationalResource {
            id: 5,
            title: "Living with Breast Cancer",
            description: "Support resources, lifestyle tips, and coping strategies.",
            category: "support",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(answer_question("What are the SYMPTOMS?").starts_with("Common breast cancer symptoms"));
        assert!(answer_question("How do I prevent it").starts_with("While not all"));
        assert!(answer_question("tell me about biopsy").starts_with("Breast cancer is diagnosed"));
    }

    #[test]
    fn test_first_matching_topic_wins() {
        // "pain" (symptoms) precedes "treatment" in table order
        assert!(answer_question("treatment for pain").starts_with("Common breast cancer symptoms"));
    }

    #[test]
    fn test_unmatched_question_gets_default() {
        assert_eq!(answer_question("hello there"), DEFAULT_RESPONSE);
        assert_eq!(answer_question(""), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_resources() {
        let resources = educational_resources();
        assert_eq!(resources.len(), 5);
        assert_eq!(resources[1].category, "screening");
    }
}
