use serde::{Deserialize, Serialize};
use crate::app::Route;

// ============================================================================
// SESIÓN - Usuario conectado (clave "user" en localStorage)
// ============================================================================

/// Rol del usuario conectado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserType {
    Employee,
    Admin,
}

impl UserType {
    /// Página de aterrizaje después del login
    pub fn landing_route(&self) -> Route {
        match self {
            UserType::Employee => Route::Bills,
            UserType::Admin => Route::Dashboard,
        }
    }

    /// Prefijo de los identificadores del formulario de login
    pub fn form_prefix(&self) -> &'static str {
        match self {
            UserType::Employee => "employee",
            UserType::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Connected,
}

/// Registro persistido tal cual: `{"type","email","password","status"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub status: SessionStatus,
}

impl Session {
    pub fn connected(user_type: UserType, email: &str, password: &str) -> Self {
        Self {
            user_type,
            email: email.to_string(),
            password: password.to_string(),
            status: SessionStatus::Connected,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Cuerpo de `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Valores leídos del formulario de login (employee o admin)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub jwt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serializes_in_stored_order() {
        let session = Session::connected(UserType::Employee, "johndoe@email.com", "azerty");
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Employee","email":"johndoe@email.com","password":"azerty","status":"connected"}"#
        );
    }

    #[test]
    fn test_partial_session_is_readable() {
        let session: Session = serde_json::from_str(r#"{"type":"Admin"}"#).unwrap();
        assert_eq!(session.user_type, UserType::Admin);
        assert!(session.email.is_empty());
        assert_eq!(session.status, SessionStatus::Connected);
    }

    #[test]
    fn test_landing_routes() {
        assert_eq!(UserType::Employee.landing_route(), Route::Bills);
        assert_eq!(UserType::Admin.landing_route(), Route::Dashboard);
    }
}
