use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Questionnaire answers describing an AI system. Every flag defaults to
/// false so partial payloads deserialize cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceAnswers {
    // prohibited practices
    #[serde(default)]
    pub social_scoring: bool,
    #[serde(default)]
    pub realtime_biometric_id: bool,
    #[serde(default)]
    pub subliminal_manipulation: bool,

    // high-risk domains
    #[serde(default)]
    pub critical_infrastructure: bool,
    #[serde(default)]
    pub employment_screening: bool,
    #[serde(default)]
    pub credit_scoring: bool,
    #[serde(default)]
    pub law_enforcement: bool,
    #[serde(default)]
    pub migration_control: bool,
    #[serde(default)]
    pub education_scoring: bool,
    #[serde(default)]
    pub medical_component: bool,

    // transparency obligations
    #[serde(default)]
    pub user_facing_chatbot: bool,
    #[serde(default)]
    pub synthetic_content: bool,
    #[serde(default)]
    pub emotion_recognition: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    pub system_name: String,
    pub answers: ComplianceAnswers,

    // "prohibited" | "high" | "limited" | "minimal"
    pub risk_level: String,
    pub score: i32,

    pub created_at: i64,
    pub updated_at: i64,
}
