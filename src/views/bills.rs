// ============================================================================
// BILLS VIEW - "Mes notes de frais"
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::App;
use crate::dom::{get_attribute, on_click, ElementBuilder};
use crate::models::Bill;
use crate::state::BillsPage;
use crate::utils::{field, BILLS_TITLE};

pub fn render_bills(app: &Rc<App>) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("div")?
        .class("content-title")
        .text(BILLS_TITLE)
        .build();

    let new_bill = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .test_id(field::BTN_NEW_BILL)?
        .text("Nouvelle note de frais")
        .build();
    {
        let app = app.clone();
        on_click(&new_bill, move |_| {
            let command = app.bills().handle_click_new_bill();
            super::dispatch(&app, vec![command]);
        })?;
    }

    let header = ElementBuilder::new("div")?
        .class("content-header")
        .children(vec![title, new_bill])?
        .build();

    let page = app.state().bills_page.borrow().clone();
    let body = match page {
        BillsPage::Loading => ElementBuilder::new("div")?
            .attr("id", "loading")?
            .text("Loading...")
            .build(),
        BillsPage::Failed(message) => render_error(&message)?,
        BillsPage::Loaded(bills) => render_table(app, &bills)?,
    };

    let mut container = ElementBuilder::new("div")?
        .class("bills-page")
        .children(vec![header, body])?;
    if let Some(url) = app.state().proof_modal.borrow().clone() {
        container = container.child(render_proof_modal(app, &url)?)?;
    }
    Ok(container.build())
}

pub fn render_error(message: &str) -> Result<Element, JsValue> {
    let element = ElementBuilder::new("div")?
        .class("error-page")
        .test_id("error-message")?
        .text(message)
        .build();
    Ok(element)
}

fn render_table(app: &Rc<App>, bills: &[Bill]) -> Result<Element, JsValue> {
    let mut head_row = ElementBuilder::new("tr")?;
    for label in ["Type", "Nom", "Date", "Montant", "Statut", "Actions"] {
        head_row = head_row.child(ElementBuilder::new("th")?.text(label).build())?;
    }
    let thead = ElementBuilder::new("thead")?.child(head_row.build())?.build();

    let mut tbody = ElementBuilder::new("tbody")?.test_id(field::BILLS_TBODY)?;
    for bill in bills {
        tbody = tbody.child(render_row(app, bill)?)?;
    }

    ElementBuilder::new("table")?
        .class("table")
        .attr("id", "example")?
        .children(vec![thead, tbody.build()])
        .map(|builder| builder.build())
}

fn render_row(app: &Rc<App>, bill: &Bill) -> Result<Element, JsValue> {
    let amount = format!("{} €", bill.amount);
    let mut row = ElementBuilder::new("tr")?;
    for text in [
        bill.expense_type.as_str(),
        bill.name.as_str(),
        bill.date.as_str(),
        amount.as_str(),
        bill.status.label(),
    ] {
        row = row.child(ElementBuilder::new("td")?.text(text).build())?;
    }

    let eye = ElementBuilder::new("div")?
        .class("icon-eye")
        .test_id(field::ICON_EYE)?
        .attr(field::BILL_URL_ATTR, bill.file_url.as_deref().unwrap_or_default())?
        .text("👁")
        .build();
    {
        let app = app.clone();
        let target = eye.clone();
        on_click(&eye, move |_| {
            let url = get_attribute(&target, field::BILL_URL_ATTR).unwrap_or_default();
            let command = app.bills().handle_click_icon_eye(&url);
            super::dispatch(&app, vec![command]);
        })?;
    }

    row.child(ElementBuilder::new("td")?.child(eye)?.build())
        .map(|builder| builder.build())
}

/// Modal del justificatif, también usado por el dashboard
pub fn render_proof_modal(app: &Rc<App>, url: &str) -> Result<Element, JsValue> {
    let close = ElementBuilder::new("button")?
        .class("close")
        .attr("type", "button")?
        .text("×")
        .build();
    {
        let app = app.clone();
        on_click(&close, move |_| app.state().set_proof_modal(None))?;
    }

    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .child(ElementBuilder::new("h5")?.text("Justificatif").build())?
        .child(close)?
        .build();

    let image = ElementBuilder::new("img")?
        .attr("src", url)?
        .attr("alt", "Bill")?
        .attr("width", "500")?
        .build();

    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .child(ElementBuilder::new("div")?.class("bill-proof-container").child(image)?.build())?
        .build();

    ElementBuilder::new("div")?
        .class("modal show")
        .attr("id", field::PROOF_MODAL)?
        .test_id(field::PROOF_MODAL)?
        .children(vec![header, body])
        .map(|builder| builder.build())
}
