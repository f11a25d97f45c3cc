use std::future::Future;
use crate::errors::StoreError;
use crate::models::{Credentials, LoginForm, Session, User, UserType};
use crate::services::store::{RequestOptions, StoreHandle};
use crate::state::Command;
use crate::utils::BACKGROUND_WHITE;

/// Resultado del pipeline `login -> or_else(create_user -> login)`
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Primer login aceptado
    Authenticated { jwt: String },
    /// Login rechazado, cuenta creada y segundo login aceptado
    Provisioned { jwt: String },
    /// Falló también después de la creación; se navega igual
    Unconfirmed(StoreError),
    /// Sin store configurado
    Offline,
}

impl LoginOutcome {
    pub fn jwt(&self) -> Option<&str> {
        match self {
            LoginOutcome::Authenticated { jwt } | LoginOutcome::Provisioned { jwt } => Some(jwt),
            _ => None,
        }
    }
}

/// Lo que devuelve un submit: comandos para `App` + cómo terminó la autenticación
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSubmission {
    pub outcome: LoginOutcome,
    pub commands: Vec<Command>,
}

#[derive(Clone)]
pub struct AuthService {
    store: StoreHandle,
}

impl AuthService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// `POST /auth/login` sin token. `None` si no hay store.
    pub fn login(&self, credentials: Credentials) -> Option<impl Future<Output = Result<String, StoreError>>> {
        let store = self.store.clone()?;
        Some(async move {
            store
                .login(&credentials, RequestOptions::anonymous())
                .await
                .map(|response| response.jwt)
        })
    }

    /// Crea la cuenta en `users`. `None` si no hay store.
    pub fn create_user(&self, session: &Session) -> Option<impl Future<Output = Result<(), StoreError>>> {
        let store = self.store.clone()?;
        let user = User::from_session(session);
        Some(async move {
            let created = store.users().create(user.clone()).await;
            if created.is_ok() {
                log::info!("👤 [LOGIN] Usuario {} creado", user.email);
            }
            created
        })
    }

    /// Un solo intento de respaldo: si el login falla se crea la cuenta y se reintenta una vez
    pub async fn authenticate(&self, session: &Session) -> LoginOutcome {
        let Some(first_attempt) = self.login(session.credentials()) else {
            log::warn!("⚠️ [LOGIN] Sin store configurado, se continúa sin autenticación");
            return LoginOutcome::Offline;
        };

        let first_error = match first_attempt.await {
            Ok(jwt) => return LoginOutcome::Authenticated { jwt },
            Err(e) => e,
        };
        log::info!("🔐 [LOGIN] Login rechazado ({}), creando cuenta para {}", first_error, session.email);

        match self.create_then_retry(session, first_error).await {
            Ok(jwt) => LoginOutcome::Provisioned { jwt },
            Err(e) => {
                log::warn!("⚠️ [LOGIN] Autenticación no confirmada para {}: {}", session.email, e);
                LoginOutcome::Unconfirmed(e)
            }
        }
    }

    async fn create_then_retry(&self, session: &Session, first_error: StoreError) -> Result<String, StoreError> {
        if let Some(create) = self.create_user(session) {
            create.await?;
        }
        match self.login(session.credentials()) {
            Some(login) => login.await,
            None => Err(first_error),
        }
    }

    pub async fn handle_submit_employee(&self, form: &LoginForm) -> LoginSubmission {
        self.handle_submit(UserType::Employee, form).await
    }

    pub async fn handle_submit_admin(&self, form: &LoginForm) -> LoginSubmission {
        self.handle_submit(UserType::Admin, form).await
    }

    /// Siempre termina en sesión persistida + navegación a la página del rol
    async fn handle_submit(&self, user_type: UserType, form: &LoginForm) -> LoginSubmission {
        let session = Session::connected(user_type, &form.email, &form.password);
        let outcome = self.authenticate(&session).await;

        let mut commands = vec![Command::PersistSession(session)];
        if let Some(jwt) = outcome.jwt() {
            commands.push(Command::PersistToken(jwt.to_string()));
        }
        if let LoginOutcome::Unconfirmed(e) = &outcome {
            commands.push(Command::AuthWarning(e.to_string()));
        }
        commands.push(Command::SetBackground(BACKGROUND_WHITE.to_string()));
        commands.push(Command::Navigate(user_type.landing_route()));

        LoginSubmission { outcome, commands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use futures::executor::block_on;
    use crate::app::Route;
    use crate::services::MockStore;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_login_and_create_user_without_store_return_none() {
        let auth = AuthService::new(None);
        let session = Session::connected(UserType::Employee, "x", "y");
        assert!(auth.login(session.credentials()).is_none());
        assert!(auth.create_user(&session).is_none());
    }

    #[test]
    fn test_login_is_sent_without_authorization() {
        let store = Rc::new(MockStore::new());
        let auth = AuthService::new(Some(store.clone()));
        let jwt = block_on(auth.login(Credentials {
            email: "a@a".to_string(),
            password: "p".to_string(),
        }).unwrap()).unwrap();

        assert_eq!(jwt, "jwt-a@a");
        let calls = store.login_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.no_authorization);
    }

    #[test]
    fn test_employee_submit_with_accepted_login() {
        let store = Rc::new(MockStore::new());
        let auth = AuthService::new(Some(store.clone()));
        let submission = block_on(auth.handle_submit_employee(&form("johndoe@email.com", "azerty")));

        assert_eq!(submission.outcome, LoginOutcome::Authenticated { jwt: "jwt-johndoe@email.com".to_string() });
        assert!(store.created_users().is_empty());
        assert_eq!(
            submission.commands,
            vec![
                Command::PersistSession(Session::connected(UserType::Employee, "johndoe@email.com", "azerty")),
                Command::PersistToken("jwt-johndoe@email.com".to_string()),
                Command::SetBackground("rgb(255, 255, 255)".to_string()),
                Command::Navigate(Route::Bills),
            ]
        );
    }

    #[test]
    fn test_employee_login_failure_creates_user_then_navigates_to_bills() {
        let store = Rc::new(MockStore::new());
        store.fail_next_login(StoreError::Rejected("fail".to_string()));
        let auth = AuthService::new(Some(store.clone()));

        let submission = block_on(auth.handle_submit_employee(&form("emp@b.com", "pwd")));

        assert!(matches!(submission.outcome, LoginOutcome::Provisioned { .. }));
        assert_eq!(store.login_calls().len(), 2);
        let created = store.created_users();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].email, "emp@b.com");
        assert_eq!(created[0].name, "emp");
        assert_eq!(submission.commands.last(), Some(&Command::Navigate(Route::Bills)));
        assert!(submission.commands.contains(&Command::SetBackground(BACKGROUND_WHITE.to_string())));
    }

    #[test]
    fn test_admin_login_failure_creates_user_then_navigates_to_dashboard() {
        let store = Rc::new(MockStore::new());
        store.fail_next_login(StoreError::Rejected("fail".to_string()));
        let auth = AuthService::new(Some(store.clone()));

        let submission = block_on(auth.handle_submit_admin(&form("admin@b.com", "pwd")));

        assert_eq!(store.created_users().len(), 1);
        assert_eq!(store.created_users()[0].user_type, UserType::Admin);
        assert_eq!(submission.commands.last(), Some(&Command::Navigate(Route::Dashboard)));
        assert!(submission.commands.contains(&Command::PersistSession(
            Session::connected(UserType::Admin, "admin@b.com", "pwd")
        )));
    }

    #[test]
    fn test_second_failure_is_not_retried_but_still_navigates() {
        let store = Rc::new(MockStore::new());
        store.fail_next_login(StoreError::Http(401));
        store.fail_next_login(StoreError::Http(500));
        let auth = AuthService::new(Some(store.clone()));

        let submission = block_on(auth.handle_submit_employee(&form("emp@b.com", "pwd")));

        assert_eq!(submission.outcome, LoginOutcome::Unconfirmed(StoreError::Http(500)));
        assert_eq!(store.login_calls().len(), 2);
        assert_eq!(store.created_users().len(), 1);
        assert!(submission.commands.contains(&Command::AuthWarning("Erreur 500".to_string())));
        assert!(!submission.commands.iter().any(|c| matches!(c, Command::PersistToken(_))));
        assert_eq!(submission.commands.last(), Some(&Command::Navigate(Route::Bills)));
    }

    #[test]
    fn test_submit_without_store_still_persists_and_navigates() {
        let auth = AuthService::new(None);
        let submission = block_on(auth.handle_submit_admin(&form("a@a", "p")));
        assert_eq!(submission.outcome, LoginOutcome::Offline);
        assert_eq!(submission.commands.len(), 3);
        assert_eq!(submission.commands.last(), Some(&Command::Navigate(Route::Dashboard)));
    }
}
