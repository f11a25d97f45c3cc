use serde::{Deserialize, Serialize};
use crate::models::{Session, UserType};

/// Cuenta tal como la maneja la colección `users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl User {
    /// Cuenta creada al primer login: el nombre es la parte local del email
    pub fn from_session(session: &Session) -> Self {
        let name = session
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            user_type: session.user_type,
            name,
            email: session.email.clone(),
            password: session.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub selector: String,
    pub data: User,
}
