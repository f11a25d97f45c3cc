// ============================================================================
// LAYOUT - Barra vertical + contenido de las páginas conectadas
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::App;
use crate::dom::{on_click, ElementBuilder};

pub fn with_layout(app: &Rc<App>, content: Element) -> Result<Element, JsValue> {
    let brand = ElementBuilder::new("div")?
        .class("layout-title")
        .text("Billed")
        .build();

    let disconnect = ElementBuilder::new("button")?
        .class("layout-disconnect")
        .attr("id", "layout-disconnect")?
        .text("Se déconnecter")
        .build();
    {
        let app = app.clone();
        on_click(&disconnect, move |_| {
            if let Err(e) = app.logout() {
                log::error!("❌ [LAYOUT] Error en logout: {}", e);
            }
            super::after_navigation(&app);
        })?;
    }

    let nav = ElementBuilder::new("div")?
        .class("vertical-navbar")
        .children(vec![brand, disconnect])?
        .build();

    let mut page = ElementBuilder::new("div")?.class("content");
    if let Some(warning) = app.state().auth_warning.borrow().clone() {
        let banner = ElementBuilder::new("div")?
            .class("auth-warning")
            .test_id("auth-warning")?
            .text(&format!("Connexion non confirmée : {}", warning))
            .build();
        page = page.child(banner)?;
    }
    let page = page.child(content)?.build();

    ElementBuilder::new("div")?
        .class("page")
        .children(vec![nav, page])
        .map(|builder| builder.build())
}
