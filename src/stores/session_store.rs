// ============================================================================
// SESSION STORE - Usuario conectado persistido en "user" (+ token en "jwt")
// ============================================================================
// Único escritor: AuthService (vía App). El resto solo lee.
// ============================================================================

use std::rc::Rc;
use crate::errors::AppResult;
use crate::models::Session;
use crate::utils::{Storage, USER_STORAGE_KEY, JWT_STORAGE_KEY, save_to_storage, load_from_storage};

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        save_to_storage(self.storage.as_ref(), USER_STORAGE_KEY, session)?;
        log::info!("💾 [SESSION] Sesión guardada para {}", session.email);
        Ok(())
    }

    pub fn load(&self) -> AppResult<Option<Session>> {
        load_from_storage(self.storage.as_ref(), USER_STORAGE_KEY)
    }

    /// Sesión actual; un registro ilegible cuenta como "sin sesión"
    pub fn current(&self) -> Option<Session> {
        match self.load() {
            Ok(session) => session,
            Err(e) => {
                log::error!("❌ [SESSION] Sesión ilegible en storage: {}", e);
                None
            }
        }
    }

    /// Email del usuario conectado, vacío si no hay sesión
    pub fn current_email(&self) -> String {
        self.current().map(|s| s.email).unwrap_or_default()
    }

    pub fn save_token(&self, jwt: &str) -> AppResult<()> {
        self.storage.set_item(JWT_STORAGE_KEY, jwt)
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(JWT_STORAGE_KEY).ok().flatten()
    }

    /// Logout - limpiar todo
    pub fn clear(&self) -> AppResult<()> {
        self.storage.remove_item(USER_STORAGE_KEY)?;
        self.storage.remove_item(JWT_STORAGE_KEY)?;
        log::info!("🗑️ [SESSION] Sesión eliminada");
        Ok(())
    }
}
