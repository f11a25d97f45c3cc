// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los listeners viven en elementos que se destruyen en cada render
// (set_inner_html("")); el navegador los limpia con ellos, así que
// closure.forget() no acumula nada. Los listeners de window se registran
// una sola vez en el arranque.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, MouseEvent};

fn listen<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(target, "click", handler)
}

/// `change` (inputs file, selects)
pub fn on_change<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(target, "change", handler)
}

/// `submit` sin recargar la página
pub fn on_submit<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(target, "submit", move |event: Event| {
        event.prevent_default();
        handler(event);
    })
}

/// `hashchange` de window (solo en el arranque)
pub fn on_hash_change<F>(handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    listen(&win, "hashchange", handler)
}
