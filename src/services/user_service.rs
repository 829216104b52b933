use bcrypt::verify;
use mongodb::bson::{doc, oid::ObjectId};

use crate::{models::User, AppState};

use super::auth_service::FieldErrors;

pub async fn change_email(state: &AppState, user_id: ObjectId, new_email: &str) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::new();

    let users = state.db.collection::<User>("users");

    if let Err(e) = users
        .update_one(doc! { "_id": user_id }, doc! { "$set": { "email": new_email } }, None)
        .await
    {
        let msg = e.to_string();
        if msg.contains("E11000") {
            errs.insert("email".into(), "This email is already in use.".into());
        } else {
            errs.insert("_form".into(), format!("db error: {e}"));
        }
        return Err(errs);
    }

    Ok(())
}

pub async fn change_password(state: &AppState, user_id: ObjectId, new_password: &str) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::new();

    let users = state.db.collection::<User>("users");

    let db_user = match users.find_one(doc! { "_id": user_id }, None).await {
        Ok(Some(u)) => u,
        _ => {
            errs.insert("_form".into(), "User not found.".into());
            return Err(errs);
        }
    };

    if verify(new_password, &db_user.password_hash).unwrap_or(false) {
        errs.insert(
            "password".into(),
            "New password must be different from your current password.".into(),
        );
        return Err(errs);
    }

    let pw_hash = match bcrypt::hash(new_password, bcrypt::DEFAULT_COST) {
        Ok(h) => h,
        Err(_) => {
            errs.insert("_form".into(), "Failed to hash password.".into());
            return Err(errs);
        }
    };

    if let Err(e) = users
        .update_one(doc! { "_id": user_id }, doc! { "$set": { "password_hash": pw_hash } }, None)
        .await
    {
        errs.insert("_form".into(), format!("db error: {e}"));
        return Err(errs);
    }

    Ok(())
}

pub async fn find_user(state: &AppState, user_id: ObjectId) -> Result<Option<User>, String> {
    let users = state.db.collection::<User>("users");
    users
        .find_one(doc! { "_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())
}
