pub mod store;
pub mod auth_service;
#[cfg(test)]
pub mod mock_store;
#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use store::{RemoteStore, BillsApi, UsersApi, RequestOptions, StoreHandle};
pub use auth_service::{AuthService, LoginOutcome, LoginSubmission};
#[cfg(test)]
pub use mock_store::{MockStore, fixture_bills};
#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
