use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. Only the identity routes ever see this type.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    /// Regenerated whenever credentials change; refresh tokens carry a copy.
    pub security_stamp: String,
}

/// Everything needed to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub security_stamp: String,
}

impl NewUser {
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            email: email.trim().to_string(),
            password_hash,
            security_stamp: Uuid::new_v4().to_string(),
        }
    }
}

/// Lookup key used for uniqueness checks. Emails compare case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public view of the current user, returned by `/identity/manage/info`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub is_email_confirmed: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            is_email_confirmed: false,
        }
    }
}
