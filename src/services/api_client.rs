// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Implementa RemoteStore sobre el backend REST. Sin lógica de negocio:
// mapea cada operación a una petición y cada respuesta a StoreError.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};
use crate::config::CONFIG;
use crate::errors::StoreError;
use crate::models::{decode_bills, Bill, BillUpdate, BillUpload, CreatedBill, Credentials, LoginResponse, User, UserUpdate};
use crate::services::store::{BillsApi, RemoteStore, RequestOptions, UsersApi};
use crate::stores::SessionStore;

/// Cliente API - SOLO comunicación HTTP
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    sessions: SessionStore,
}

impl ApiClient {
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            base_url: CONFIG.backend_url().trim_end_matches('/').to_string(),
            sessions,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Cabeceras comunes: JSON + token guardado, salvo que se pidan sin ellas
    fn prepare(&self, builder: RequestBuilder, options: RequestOptions) -> RequestBuilder {
        let builder = if options.no_content_type {
            builder
        } else {
            builder.header("Content-Type", "application/json")
        };
        match (options.no_authorization, self.sessions.token()) {
            (false, Some(jwt)) => builder.header("Authorization", &format!("Bearer {}", jwt)),
            _ => builder,
        }
    }

    async fn send(request: Result<Request, gloo_net::Error>) -> Result<Response, StoreError> {
        let request = request.map_err(|e| StoreError::Decode(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if !response.ok() {
            log::error!("❌ [API] HTTP {} en {}", response.status(), response.url());
            return Err(StoreError::Http(response.status()));
        }
        Ok(response)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn multipart(upload: &BillUpload) -> Result<FormData, StoreError> {
        let js_error = |e: JsValue| StoreError::Decode(format!("{:?}", e));
        let bytes = js_sys::Uint8Array::from(upload.file.content.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &blob, &upload.file.name)
            .map_err(js_error)?;
        form.append_with_str("email", &upload.email).map_err(js_error)?;
        Ok(form)
    }
}

#[async_trait(?Send)]
impl RemoteStore for ApiClient {
    async fn login(&self, credentials: &Credentials, options: RequestOptions) -> Result<LoginResponse, StoreError> {
        log::info!("🔐 [API] Login para {}", credentials.email);
        let builder = self.prepare(Request::post(&self.url("auth/login")), options);
        let response = Self::send(builder.json(credentials)).await?;
        Self::read(response).await
    }

    fn bills(&self) -> &dyn BillsApi {
        self
    }

    fn users(&self) -> &dyn UsersApi {
        self
    }
}

#[async_trait(?Send)]
impl BillsApi for ApiClient {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let builder = self.prepare(Request::get(&self.url("bills")), RequestOptions::default());
        let response = Self::send(builder.build()).await?;
        let records: Vec<serde_json::Value> = Self::read(response).await?;
        Ok(decode_bills(records))
    }

    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError> {
        log::info!("📤 [API] Subiendo justificatif {}", upload.file.name);
        let options = RequestOptions {
            no_content_type: true,
            ..RequestOptions::default()
        };
        let form = Self::multipart(&upload)?;
        let builder = self.prepare(Request::post(&self.url("bills")), options);
        let response = Self::send(builder.body(form)).await?;
        Self::read(response).await
    }

    async fn update(&self, update: BillUpdate) -> Result<Bill, StoreError> {
        let path = format!("bills/{}", update.selector);
        let builder = self.prepare(Request::patch(&self.url(&path)), RequestOptions::default());
        let response = Self::send(builder.json(&update.data)).await?;
        Self::read(response).await
    }
}

#[async_trait(?Send)]
impl UsersApi for ApiClient {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let builder = self.prepare(Request::get(&self.url("users")), RequestOptions::default());
        let response = Self::send(builder.build()).await?;
        Self::read(response).await
    }

    async fn create(&self, user: User) -> Result<(), StoreError> {
        let builder = self.prepare(Request::post(&self.url("users")), RequestOptions::default());
        Self::send(builder.json(&user)).await.map(|_| ())
    }

    async fn update(&self, update: UserUpdate) -> Result<User, StoreError> {
        let path = format!("users/{}", update.selector);
        let builder = self.prepare(Request::patch(&self.url(&path)), RequestOptions::default());
        let response = Self::send(builder.json(&update.data)).await?;
        Self::read(response).await
    }
}
