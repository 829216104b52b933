use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub email: String,
    pub username: String,

    pub password_hash: String,

    pub created_at: i64,
}

/// Projection of the logged-in user carried in request extensions.
/// Never holds the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub email: String,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(u: User) -> Self {
        CurrentUser {
            id: u.id,
            email: u.email,
            username: u.username,
        }
    }
}
