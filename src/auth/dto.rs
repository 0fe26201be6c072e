use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Public part of the user returned to the client. Never carries
/// email or phone number.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_omits_contact_fields() {
        let user = User {
            id: Uuid::new_v4(),
            username: "croissant_fan".into(),
            email: Some("secret@example.com".into()),
            phone_number: Some("+123456".into()),
            full_name: None,
            avatar_url: "https://example.com/a.svg".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("croissant_fan"));
        assert!(json.contains("avatarUrl"));
        assert!(!json.contains("secret@example.com"));
        assert!(!json.contains("+123456"));
    }
}
