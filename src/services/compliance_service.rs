use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::FindOptions;

use crate::{
    models::{ComplianceAnswers, ComplianceCheck},
    AppState,
};

use super::compliance;

pub async fn list_user_checks(
    state: &AppState,
    user_id: ObjectId,
) -> Result<Vec<ComplianceCheck>, String> {
    let checks = state.db.collection::<ComplianceCheck>("checks");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let mut cursor = checks
        .find(doc! { "user_id": user_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut items: Vec<ComplianceCheck> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| e.to_string())?);
    }

    Ok(items)
}

pub async fn create_check(
    state: &AppState,
    user_id: ObjectId,
    system_name: &str,
    answers: ComplianceAnswers,
) -> Result<ComplianceCheck, String> {
    let checks = state.db.collection::<ComplianceCheck>("checks");
    let now = Utc::now().timestamp();

    let (risk_level, score) = compliance::evaluate(&answers);

    let check = ComplianceCheck {
        id: ObjectId::new(),
        user_id,
        system_name: system_name.to_string(),
        answers,
        risk_level: risk_level.to_string(),
        score,
        created_at: now,
        updated_at: now,
    };

    checks
        .insert_one(&check, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(check)
}

pub async fn get_check(
    state: &AppState,
    user_id: ObjectId,
    check_id: ObjectId,
) -> Result<Option<ComplianceCheck>, String> {
    let checks = state.db.collection::<ComplianceCheck>("checks");
    checks
        .find_one(doc! { "_id": check_id, "user_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())
}

/// Replaces the answers and recomputes level and score.
pub async fn reevaluate_check(
    state: &AppState,
    user_id: ObjectId,
    check_id: ObjectId,
    system_name: &str,
    answers: ComplianceAnswers,
) -> Result<Option<ComplianceCheck>, String> {
    let checks = state.db.collection::<ComplianceCheck>("checks");
    let now = Utc::now().timestamp();

    let (risk_level, score) = compliance::evaluate(&answers);
    let answers_bson = to_bson(&answers).map_err(|e| e.to_string())?;

    let res = checks
        .update_one(
            doc! { "_id": check_id, "user_id": user_id },
            doc! {
                "$set": {
                    "system_name": system_name,
                    "answers": answers_bson,
                    "risk_level": risk_level,
                    "score": score,
                    "updated_at": now,
                }
            },
            None,
        )
        .await
        .map_err(|e| e.to_string())?;

    if res.matched_count == 0 {
        return Ok(None);
    }

    get_check(state, user_id, check_id).await
}

pub async fn delete_check(
    state: &AppState,
    user_id: ObjectId,
    check_id: ObjectId,
) -> Result<bool, String> {
    let checks = state.db.collection::<ComplianceCheck>("checks");

    let res = checks
        .delete_one(doc! { "_id": check_id, "user_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(res.deleted_count > 0)
}
