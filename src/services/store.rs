// ============================================================================
// REMOTE STORE - Interfaz del backend (colecciones `bills` y `users` + login)
// ============================================================================
// Implementaciones: ApiClient (HTTP, wasm32) y MockStore (memoria, tests)
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use crate::errors::StoreError;
use crate::models::{Bill, BillUpdate, BillUpload, CreatedBill, Credentials, LoginResponse, User, UserUpdate};

/// Flags por petición
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// No enviar `Authorization: Bearer <jwt>`
    pub no_authorization: bool,
    /// Dejar que el navegador ponga el Content-Type (multipart)
    pub no_content_type: bool,
}

impl RequestOptions {
    /// Login: sin token
    pub fn anonymous() -> Self {
        Self {
            no_authorization: true,
            no_content_type: false,
        }
    }
}

#[async_trait(?Send)]
pub trait BillsApi {
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;
    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError>;
    async fn update(&self, update: BillUpdate) -> Result<Bill, StoreError>;
}

#[async_trait(?Send)]
pub trait UsersApi {
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn create(&self, user: User) -> Result<(), StoreError>;
    async fn update(&self, update: UserUpdate) -> Result<User, StoreError>;
}

#[async_trait(?Send)]
pub trait RemoteStore {
    async fn login(&self, credentials: &Credentials, options: RequestOptions) -> Result<LoginResponse, StoreError>;
    fn bills(&self) -> &dyn BillsApi;
    fn users(&self) -> &dyn UsersApi;
}

/// `None` = sin backend: toda operación dependiente devuelve `None`
pub type StoreHandle = Option<Rc<dyn RemoteStore>>;
