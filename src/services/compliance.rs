use crate::models::ComplianceAnswers;

pub const LEVEL_PROHIBITED: &str = "prohibited";
pub const LEVEL_HIGH: &str = "high";
pub const LEVEL_LIMITED: &str = "limited";
pub const LEVEL_MINIMAL: &str = "minimal";

fn high_risk_count(a: &ComplianceAnswers) -> i32 {
    [
        a.critical_infrastructure,
        a.employment_screening,
        a.credit_scoring,
        a.law_enforcement,
        a.migration_control,
        a.education_scoring,
        a.medical_component,
    ]
    .iter()
    .filter(|&&hit| hit)
    .count() as i32
}

fn has_prohibited(a: &ComplianceAnswers) -> bool {
    a.social_scoring || a.realtime_biometric_id || a.subliminal_manipulation
}

fn has_transparency_trigger(a: &ComplianceAnswers) -> bool {
    a.user_facing_chatbot || a.synthetic_content || a.emotion_recognition
}

/// Risk classification for a questionnaire. Prohibited practices dominate
/// everything else; high-risk domains stack up to a cap; transparency
/// triggers alone land in "limited".
pub fn evaluate(answers: &ComplianceAnswers) -> (&'static str, i32) {
    if has_prohibited(answers) {
        return (LEVEL_PROHIBITED, 100);
    }

    let high = high_risk_count(answers);
    if high > 0 {
        let score = (70 + (high - 1) * 5).min(95);
        return (LEVEL_HIGH, score);
    }

    if has_transparency_trigger(answers) {
        return (LEVEL_LIMITED, 40);
    }

    (LEVEL_MINIMAL, 10)
}
