// ============================================================================
// BILLED - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// - Views: Funciones que renderizan DOM (solo wasm32)
// - ViewModels: Handlers que devuelven comandos
// - Services: AuthService + store remoto (HTTP o memoria)
// - State: AppState con Rc<RefCell> + notificaciones
// - Stores: sesión persistida en storage
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod utils;
pub mod stores;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod app;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

pub use app::{App, Route};

#[cfg(target_arch = "wasm32")]
pub use web::{main, rerender_app};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;
    use crate::app::{App, Route};
    use crate::config::CONFIG;
    use crate::dom::{append_child, get_element_by_id, on_hash_change, set_body_background, set_inner_html, window};
    use crate::services::{ApiClient, StoreHandle};
    use crate::state::Command;
    use crate::stores::SessionStore;
    use crate::utils::{LocalStorage, Storage};
    use crate::views;

    // Instancia global de App (las vistas reciben un Rc)
    thread_local! {
        static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
        static RENDER_SCHEDULED: Cell<bool> = Cell::new(false);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::default());
        }
        log::info!("🚀 Billed - Rust + MVVM ({})", CONFIG.backend_url());

        let storage: Rc<dyn Storage> = Rc::new(LocalStorage);
        let store: StoreHandle = Some(Rc::new(ApiClient::new(SessionStore::new(storage.clone()))));
        let app = Rc::new(App::new(storage, store));

        // Varios cambios en el mismo tick = un solo render
        app.state().subscribe_to_changes(|| {
            if RENDER_SCHEDULED.with(|flag| flag.replace(true)) {
                return;
            }
            Timeout::new(0, || {
                RENDER_SCHEDULED.with(|flag| flag.set(false));
                rerender_app();
            })
            .forget();
        });

        APP.with(|cell| *cell.borrow_mut() = Some(app.clone()));

        {
            let app = app.clone();
            on_hash_change(move |_| {
                let route = Route::from_path(&current_hash());
                if route != app.state().route() {
                    views::dispatch(&app, vec![Command::Navigate(route)]);
                }
            })?;
        }

        views::dispatch(&app, vec![Command::Navigate(Route::from_path(&current_hash()))]);
        rerender_app();
        Ok(())
    }

    fn current_hash() -> String {
        window()
            .and_then(|win| win.location().hash().ok())
            .unwrap_or_default()
    }

    /// Re-render completo de la página actual
    pub fn rerender_app() {
        let Some(app) = APP.with(|cell| cell.borrow().clone()) else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
            return;
        };
        let Some(root) = get_element_by_id("root") else {
            log::error!("❌ [RERENDER] No #root element found");
            return;
        };

        if let Some(color) = app.state().background_color.borrow().as_deref() {
            if let Err(e) = set_body_background(color) {
                log::warn!("⚠️ [RERENDER] Fondo no aplicado: {:?}", e);
            }
        }

        set_inner_html(&root, "");
        match views::render_app(&app).and_then(|page| append_child(&root, &page)) {
            Ok(()) => log::debug!("✅ [RERENDER] {} renderizada", app.state().route().path()),
            Err(e) => log::error!("❌ Error re-renderizando: {:?}", e),
        }
    }
}
