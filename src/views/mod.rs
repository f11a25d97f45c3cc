// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================
// Cada vista lee AppState y manda los eventos a su ViewModel; los comandos
// que devuelve el ViewModel pasan por `dispatch`.
// ============================================================================

pub mod login;
pub mod bills;
pub mod new_bill;
pub mod dashboard;
pub mod layout;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::{App, Route};
use crate::dom::window;
use crate::state::Command;

/// Página de la ruta actual
pub fn render_app(app: &Rc<App>) -> Result<Element, JsValue> {
    match app.state().route() {
        Route::Login => login::render_login(app),
        Route::Bills => layout::with_layout(app, bills::render_bills(app)?),
        Route::NewBill => layout::with_layout(app, new_bill::render_new_bill(app)?),
        Route::Dashboard => layout::with_layout(app, dashboard::render_dashboard(app)?),
    }
}

/// Aplica los comandos de un handler; si hay navegación sincroniza el hash
/// y carga los datos de la nueva página
pub fn dispatch(app: &Rc<App>, commands: Vec<Command>) {
    let navigates = commands.iter().any(|c| matches!(c, Command::Navigate(_)));
    if let Err(e) = app.apply_all(commands) {
        log::error!("❌ [VIEW] Error aplicando comandos: {}", e);
    }
    if navigates {
        after_navigation(app);
    }
}

pub fn after_navigation(app: &Rc<App>) {
    let route = app.state().route();
    if let Some(win) = window() {
        let hash = route.path().trim_start_matches('#');
        let hash = if route == Route::Login { "" } else { hash };
        if let Err(e) = win.location().set_hash(hash) {
            log::warn!("⚠️ [VIEW] No se pudo actualizar el hash: {:?}", e);
        }
    }
    if matches!(route, Route::Bills | Route::Dashboard) {
        let app = app.clone();
        spawn_local(async move {
            app.load_current_page().await;
        });
    }
}
